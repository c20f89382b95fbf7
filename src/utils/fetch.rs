//! Network fetching with timeout support.
//!
//! [`HttpFetcher`] implements the core [`Fetch`] seam on top of the browser
//! Fetch API. Every request races [`FETCH_TIMEOUT_MS`].

use js_sys::{Array, Promise};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCache, RequestInit, RequestMode, Response};

use crate::config::FETCH_TIMEOUT_MS;
use crate::core::error::FetchError;
use crate::core::{Fetch, ProbeMethod};

// =============================================================================
// Promise Racing Utilities
// =============================================================================

/// Result of a promise race with timeout.
#[derive(Debug)]
pub enum RaceResult {
    /// The promise completed before timeout.
    Completed(JsValue),
    /// Timeout occurred before promise completed.
    TimedOut,
    /// Promise rejected with an error.
    Error(String),
}

/// Race a promise against a timeout.
///
/// # Returns
/// * `RaceResult::Completed` if promise resolves before timeout
/// * `RaceResult::TimedOut` if timeout occurs first
/// * `RaceResult::Error` if promise rejects
pub async fn race_with_timeout(promise: Promise, timeout_ms: i32) -> RaceResult {
    let Some(window) = web_sys::window() else {
        return RaceResult::Error("Window not available".to_string());
    };

    // Create timeout promise that resolves to undefined
    let timeout_promise = Promise::new(&mut |resolve, _| {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout_ms);
    });

    let race_array = Array::new();
    race_array.push(&promise);
    race_array.push(&timeout_promise);
    let race_promise = Promise::race(&race_array);

    match JsFuture::from(race_promise).await {
        Ok(result) => {
            if result.is_undefined() {
                RaceResult::TimedOut
            } else {
                RaceResult::Completed(result)
            }
        }
        Err(e) => RaceResult::Error(describe_js_error(&e)),
    }
}

/// Best-effort message from a rejected promise value.
pub fn describe_js_error(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| "Unknown error".to_string())
}

// =============================================================================
// HttpFetcher
// =============================================================================

/// Fetch API transport. Responses are never served from the HTTP cache, so a
/// republished manifest or index is picked up on reload.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpFetcher {
    timeout_ms: i32,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            timeout_ms: FETCH_TIMEOUT_MS,
        }
    }

    async fn send(&self, url: &str, method: &str, range: Option<&str>) -> Result<Response, FetchError> {
        let window = web_sys::window().ok_or(FetchError::NoWindow)?;

        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);
        opts.set_cache(RequestCache::NoStore);

        let request = Request::new_with_str_and_init(url, &opts)
            .map_err(|_| FetchError::RequestCreationFailed)?;
        if let Some(range) = range {
            request
                .headers()
                .set("Range", range)
                .map_err(|_| FetchError::RequestCreationFailed)?;
        }

        let timeout_ms = if self.timeout_ms > 0 {
            self.timeout_ms
        } else {
            FETCH_TIMEOUT_MS
        };

        match race_with_timeout(window.fetch_with_request(&request), timeout_ms).await {
            RaceResult::TimedOut => Err(FetchError::Timeout),
            RaceResult::Error(msg) => Err(FetchError::NetworkError(msg)),
            RaceResult::Completed(result) => {
                result.dyn_into().map_err(|_| FetchError::InvalidContent)
            }
        }
    }
}

impl Fetch for HttpFetcher {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.send(url, "GET", None).await?;
        if !resp.ok() {
            return Err(FetchError::HttpError(resp.status()));
        }

        let text = JsFuture::from(resp.text().map_err(|_| FetchError::ResponseReadFailed)?)
            .await
            .map_err(|_| FetchError::ResponseReadFailed)?;

        text.as_string().ok_or(FetchError::InvalidContent)
    }

    async fn probe(&self, url: &str, method: ProbeMethod) -> Result<u16, FetchError> {
        let resp = match method {
            ProbeMethod::Head => self.send(url, "HEAD", None).await?,
            ProbeMethod::Range => self.send(url, "GET", Some("bytes=0-1")).await?,
        };
        Ok(resp.status())
    }
}
