//! Flipbook viewer page.
//!
//! Components:
//! - [`Viewer`] - Title bar, sync status and the book container
//!
//! The page-audio wiring lives in `session`.

mod session;
#[allow(clippy::module_inception)]
mod viewer;

pub use viewer::Viewer;
