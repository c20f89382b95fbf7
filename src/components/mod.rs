//! UI components built with Leptos.
//!
//! - [`router`] - Application routing (main entry point)
//! - [`browser`] - Folder browser page
//! - [`viewer`] - Flipbook viewer page
//! - [`icons`] - Centralized icon definitions (change theme here)

pub mod browser;
pub mod icons;
pub mod router;
pub mod viewer;

pub use router::AppRouter;
