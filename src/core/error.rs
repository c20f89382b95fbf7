//! Custom error types for the application.
//!
//! Every error reports an [`ErrorKind`] so callers can pick a fallback
//! without matching on individual variants:
//!
//! - [`FetchError`] - Network/fetch-related errors for HTTP requests
//! - [`ManifestError`] - Loading the folder manifest
//! - [`ListingError`] - Fetching or parsing a server directory index
//! - [`AudioError`] - Audio element and output context failures
//! - [`HookError`] - Attaching to the paging widget

use thiserror::Error;

/// Failure taxonomy shared by all components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure or timeout.
    Unreachable,
    /// Resource absent. Expected during normal operation.
    NotFound,
    /// Something was there but could not be parsed.
    Malformed,
    /// The paging widget does not expose its notification channel.
    Unattached,
}

impl ErrorKind {
    /// Whether the condition is part of normal operation (no warning needed).
    pub fn is_expected(self) -> bool {
        matches!(self, Self::NotFound | Self::Unattached)
    }
}

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// Failed to create HTTP request
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Network request failed (CORS, connection reset, etc.)
    #[error("Network error: {0}")]
    NetworkError(String),
    /// HTTP error response (non-2xx status)
    #[error("HTTP error: {0}")]
    HttpError(u16),
    /// Failed to read response body
    #[error("Failed to read response")]
    ResponseReadFailed,
    /// Invalid response content (not text)
    #[error("Invalid response content")]
    InvalidContent,
    /// Request timed out
    #[error("Request timed out")]
    Timeout,
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::HttpError(404 | 410) => ErrorKind::NotFound,
            Self::InvalidContent => ErrorKind::Malformed,
            _ => ErrorKind::Unreachable,
        }
    }
}

/// Errors from loading the folder manifest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    /// The server has no manifest (404/410).
    #[error("manifest not present")]
    Absent,
    /// The manifest exists but is not a valid folder tree.
    #[error("manifest malformed: {0}")]
    Malformed(String),
    /// The manifest could not be fetched.
    #[error("manifest unreachable: {0}")]
    Unreachable(FetchError),
}

impl ManifestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Absent => ErrorKind::NotFound,
            Self::Malformed(_) => ErrorKind::Malformed,
            Self::Unreachable(_) => ErrorKind::Unreachable,
        }
    }
}

impl From<FetchError> for ManifestError {
    fn from(err: FetchError) -> Self {
        match err.kind() {
            ErrorKind::NotFound => Self::Absent,
            ErrorKind::Malformed => Self::Malformed(err.to_string()),
            _ => Self::Unreachable(err),
        }
    }
}

/// Errors from the directory index fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    /// The index page could not be fetched.
    #[error("{0}")]
    Fetch(#[from] FetchError),
    /// The index page is not an HTML document.
    #[error("unparsable directory index: {0}")]
    Malformed(String),
    /// The index page parsed but contains no entries.
    #[error("No anchors parsed")]
    Empty,
}

impl ListingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Fetch(err) => err.kind(),
            Self::Malformed(_) => ErrorKind::Malformed,
            Self::Empty => ErrorKind::NotFound,
        }
    }
}

/// Audio playback errors. Always logged, never surfaced to the reader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioError {
    /// No audio asset at the requested URL.
    #[error("audio missing: {0}")]
    Missing(String),
    /// Existence probe failed on the network.
    #[error("audio probe failed: {0}")]
    Probe(FetchError),
    /// The audio element could not be created.
    #[error("failed to create audio element: {0}")]
    CreateFailed(String),
    /// `play()` was rejected (autoplay policy, decode error, ...).
    #[error("playback rejected: {0}")]
    PlayRejected(String),
    /// The output context could not be created or resumed.
    #[error("audio output unavailable: {0}")]
    OutputUnavailable(String),
}

impl AudioError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Missing(_) => ErrorKind::NotFound,
            Self::Probe(err) => err.kind(),
            _ => ErrorKind::Unreachable,
        }
    }
}

/// Errors from attaching to the paging widget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HookError {
    /// The widget exposes no page-change channel.
    #[error("page-change hook unavailable: {0}")]
    Unattached(String),
}

impl HookError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Unattached
    }
}
