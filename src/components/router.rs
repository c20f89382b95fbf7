//! Application router component.
//!
//! One bundle serves both pages. The query string decides which one renders:
//! launch parameters with a `src` select the viewer, anything else the folder
//! browser. The route is read once; moving between pages is a full load.

use leptos::prelude::*;

use crate::components::browser::Browser;
use crate::components::viewer::Viewer;
use crate::models::AppRoute;

/// Main application router.
///
/// - `?src=...&audioBase=...&title=...` → Viewer
/// - anything else → Browser
#[component]
pub fn AppRouter() -> impl IntoView {
    match AppRoute::current() {
        AppRoute::View(params) => view! { <Viewer params=params /> }.into_any(),
        AppRoute::Browse => view! { <Browser /> }.into_any(),
    }
}
