//! Core logic, independent of the browser.
//!
//! This module provides:
//! - [`DirectoryBrowser`] folder navigation over a [`ManifestTree`] or the
//!   server's directory index
//! - [`LaunchParameters`] for opening the viewer
//! - [`PageAudioSync`] and [`AudioGate`] for page-synchronized audio
//!
//! Platform access goes through the [`Fetch`], [`AudioOutput`] and
//! [`PagingWidget`] traits.

pub mod audio;
pub mod browser;
pub mod error;
pub mod fetch;
pub mod launcher;
pub mod listing;
pub mod manifest;
pub mod path;
pub mod sync;

pub use audio::{AudioGate, AudioOutput, PlayOutcome};
pub use browser::{BrowserConfig, BrowserState, DirectoryBrowser, Navigation};
pub use fetch::{Fetch, ProbeMethod};
pub use launcher::{LaunchParameters, build_launch_parameters};
pub use manifest::ManifestTree;
pub use sync::{ObserverChain, PageAudioSync, PageEvent, PagingWidget, SyncMode};
