//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`ManifestNode`], [`NodeKind`] - Folder manifest (`file-list.json`)
//! - [`BrowseItem`], [`NavigationState`] - Folder listing view model
//! - [`AppRoute`] - Query-based page selection

mod browse;
mod manifest;
mod route;

pub use browse::{BrowseItem, NavigationState};
pub use manifest::{ManifestNode, NodeKind};
pub use route::AppRoute;
