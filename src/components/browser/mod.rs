//! Folder browser page.
//!
//! Components:
//! - [`Browser`] - Page root, owns the [`BrowserContext`]
//! - [`Header`] - Breadcrumb, Back button and audio folder field
//! - [`FileList`] - Listing of the current folder

#[allow(clippy::module_inception)]
mod browser;
mod file_list;
mod header;

pub use browser::{Browser, BrowserContext};
pub use file_list::FileList;
pub use header::Header;
