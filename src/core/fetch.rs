//! Transport seam used by the manifest loader, the directory browser and the
//! audio gate.
//!
//! The browser implementation lives in [`crate::utils::HttpFetcher`]; tests
//! use in-memory fakes.

use super::error::FetchError;

/// How to check that a resource exists without downloading it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProbeMethod {
    /// `HEAD` request.
    Head,
    /// `GET` with `Range: bytes=0-1`, for servers that refuse `HEAD`.
    Range,
}

/// Asynchronous text and status fetching with a bounded timeout.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    /// Fetch a URL as text. Non-2xx responses are `FetchError::HttpError`.
    async fn get_text(&self, url: &str) -> Result<String, FetchError>;

    /// Issue a probe request and return the HTTP status.
    async fn probe(&self, url: &str, method: ProbeMethod) -> Result<u16, FetchError>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory [`Fetch`] fake shared by the core tests.

    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    /// Canned responses keyed by URL. Unknown URLs answer 404.
    ///
    /// Every call yields once so concurrent callers interleave the way real
    /// network requests do.
    #[derive(Default)]
    pub struct FakeFetcher {
        texts: HashMap<String, Result<String, FetchError>>,
        statuses: HashMap<(String, ProbeMethod), Result<u16, FetchError>>,
        pub requests: RefCell<Vec<String>>,
    }

    impl FakeFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_text(mut self, url: &str, body: &str) -> Self {
            self.texts.insert(url.to_string(), Ok(body.to_string()));
            self
        }

        pub fn with_error(mut self, url: &str, err: FetchError) -> Self {
            self.texts.insert(url.to_string(), Err(err));
            self
        }

        pub fn with_status(mut self, url: &str, method: ProbeMethod, status: u16) -> Self {
            self.statuses.insert((url.to_string(), method), Ok(status));
            self
        }

        pub fn with_probe_error(mut self, url: &str, method: ProbeMethod, err: FetchError) -> Self {
            self.statuses.insert((url.to_string(), method), Err(err));
            self
        }

        pub fn requested(&self) -> Vec<String> {
            self.requests.borrow().clone()
        }
    }

    impl Fetch for FakeFetcher {
        async fn get_text(&self, url: &str) -> Result<String, FetchError> {
            self.requests.borrow_mut().push(url.to_string());
            tokio::task::yield_now().await;
            self.texts
                .get(url)
                .cloned()
                .unwrap_or(Err(FetchError::HttpError(404)))
        }

        async fn probe(&self, url: &str, method: ProbeMethod) -> Result<u16, FetchError> {
            self.requests
                .borrow_mut()
                .push(format!("{:?} {}", method, url));
            tokio::task::yield_now().await;
            self.statuses
                .get(&(url.to_string(), method))
                .cloned()
                .unwrap_or(Ok(404))
        }
    }
}
