//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name shown in the browser header.
pub const APP_NAME: &str = "flipshelf";

/// Application version.
pub const APP_VERSION: &str = "0.1.0";

// =============================================================================
// Content Locations
// =============================================================================

/// Folder manifest, relative to the page.
pub const MANIFEST_URL: &str = "./file-list.json";

/// Server directory index used when no manifest is published.
pub const INDEX_URL: &str = "./";

/// Page that hosts the flipbook viewer.
pub const VIEWER_PAGE: &str = "viewer.html";

/// Folder holding `audio-{page}.mp3` clips when the reader sets none.
pub const DEFAULT_AUDIO_BASE: &str = "./audio";

/// Viewer title when the launch parameters carry none.
pub const DEFAULT_VIEWER_TITLE: &str = "Flipbook";

// =============================================================================
// Network Configuration
// =============================================================================

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: i32 = 10000;

/// Check that a clip exists before loading it.
pub const PROBE_AUDIO: bool = true;

// =============================================================================
// Page Sync Configuration
// =============================================================================

/// Page-to-audio sync timing (milliseconds).
pub mod sync_timing {
    /// Wait after mounting the book before hooking the widget.
    pub const HOOK_GRACE_DELAY_MS: u32 = 1200;
    /// Polling interval when the widget cannot be hooked.
    pub const POLL_INTERVAL_MS: u32 = 800;
}

/// Paging widget assets, injected when the host page did not load them.
pub mod widget {
    /// jQuery, required by dFlip.
    pub const JQUERY_SCRIPT: &str = "dflip/js/libs/jquery.min.js";
    /// dFlip itself.
    pub const DFLIP_SCRIPT: &str = "dflip/js/dflip.min.js";
    /// `id` of the book container.
    pub const BOOK_ELEMENT_ID: &str = "viewer_book";
    /// Class dFlip scans for.
    pub const BOOK_CLASS: &str = "_df_book";
}

// =============================================================================
// Logging
// =============================================================================

/// Maximum level forwarded to the browser console.
pub const LOG_LEVEL: log::LevelFilter = if cfg!(debug_assertions) {
    log::LevelFilter::Debug
} else {
    log::LevelFilter::Info
};

// =============================================================================
// UI Configuration
// =============================================================================

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
/// Change this value to switch icon styles globally.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;

/// Message shown when the folder listing is empty.
pub const EMPTY_LISTING_TEXT: &str = "No items to show.";
