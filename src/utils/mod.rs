//! Browser adapters for the core seams.
//!
//! Provides:
//! - [`HttpFetcher`] - Fetch API transport with timeout
//! - [`HtmlAudioOutput`] - `HtmlAudioElement` playback
//! - [`DflipWidget`] - dFlip page-change hook and page polling
//! - [`dom`] - Window, script loading and event helpers
//! - [`log`] - Console sink for the `log` facade

mod audio;
mod dflip;
pub mod dom;
mod fetch;
pub mod log;

pub use audio::HtmlAudioOutput;
pub use dflip::DflipWidget;
pub use fetch::HttpFetcher;
