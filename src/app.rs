//! Root application module.

use leptos::prelude::*;

use crate::components::AppRouter;

/// Root application component.
///
/// Page state lives in the page components themselves (the browser's
/// `BrowserContext`, the viewer's sync session), so no global context is
/// provided here.
#[component]
pub fn App() -> impl IntoView {
    view! { <AppRouter /> }
}
