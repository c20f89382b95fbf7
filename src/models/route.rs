//! Query-based routing between the browser and viewer pages.

use crate::core::LaunchParameters;

/// Application routes.
///
/// Both pages ship the same bundle; the viewer is reached through
/// `viewer.html?src=...&audioBase=...&title=...`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppRoute {
    /// Folder browser: no `src` in the query
    Browse,
    /// Flipbook viewer for one document
    View(LaunchParameters),
}

impl AppRoute {
    /// Parse a `location.search` string into a route
    pub fn from_search(search: &str) -> Self {
        LaunchParameters::from_query(search).map_or(Self::Browse, Self::View)
    }

    /// Get current route from browser URL
    pub fn current() -> Self {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        Self::from_search(&search)
    }
}
