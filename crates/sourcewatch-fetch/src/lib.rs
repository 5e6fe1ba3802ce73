//! Sourcewatch Document Fetching
//!
//! Implementations of the `DocumentFetcher` trait from `sourcewatch-domain`.
//!
//! # Architecture
//!
//! Fetching is split in two layers:
//!
//! - A `Transport` performs exactly one GET and reports status, `Location`
//!   and body. It never follows redirects.
//! - `HttpFetcher` drives a transport through a bounded redirect loop and
//!   applies the per-request timeout.
//!
//! This keeps the redirect bound and the timeout testable without a network.
//!
//! # Fetchers
//!
//! - `MockFetcher`: Scripted responses per URL for testing
//! - `HttpFetcher<ReqwestTransport>`: Real HTTP(S) via `reqwest`
//!
//! # Examples
//!
//! ```
//! use sourcewatch_fetch::MockFetcher;
//! use sourcewatch_domain::traits::DocumentFetcher;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let fetcher = MockFetcher::new();
//! fetcher.add_body("https://example.gov/doc", "all men are created equal");
//! let body = fetcher.fetch("https://example.gov/doc").await.unwrap();
//! assert_eq!(body, "all men are created equal");
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod http;
pub mod transport;

use sourcewatch_domain::traits::DocumentFetcher;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use config::FetchConfig;
pub use http::HttpFetcher;
pub use transport::{RawResponse, ReqwestTransport, Transport};

/// Errors that can occur while fetching a document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection-level failure (DNS, refused, TLS, reset)
    #[error("Network error fetching {url}: {reason}")]
    Network {
        /// URL being requested
        url: String,
        /// Underlying cause
        reason: String,
    },

    /// No response within the request timeout
    #[error("Timeout fetching {url}")]
    Timeout {
        /// URL being requested
        url: String,
    },

    /// Final response was not 200
    #[error("HTTP {status} for {url}")]
    HttpStatus {
        /// URL that answered
        url: String,
        /// Status code received
        status: u16,
    },

    /// Redirect chain exceeded the configured bound
    #[error("Too many redirects for {url}")]
    TooManyRedirects {
        /// URL whose response would have required one redirect too many
        url: String,
    },

    /// URL (or a redirect target) could not be parsed or uses an unsupported scheme
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl {
        /// Offending URL text
        url: String,
        /// Parser message
        reason: String,
    },

    /// HTTP client could not be constructed
    #[error("HTTP client setup failed: {0}")]
    Setup(String),

    /// Response body could not be read or decoded
    #[error("Failed to read body of {url}: {reason}")]
    Body {
        /// URL that answered
        url: String,
        /// Underlying cause
        reason: String,
    },
}

#[derive(Debug, Clone)]
enum MockResponse {
    Body(String),
    Error(FetchError),
    Panic(String),
}

/// Mock fetcher for deterministic testing
///
/// Returns pre-configured bodies or errors per URL without touching the
/// network. Unscripted URLs fail with a `Network` error. Clones share state,
/// so a test can keep a handle after moving the fetcher into a verifier.
///
/// # Examples
///
/// ```
/// use sourcewatch_fetch::{FetchError, MockFetcher};
/// use sourcewatch_domain::traits::DocumentFetcher;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let fetcher = MockFetcher::new();
/// fetcher.add_error("https://down.example/", FetchError::Timeout {
///     url: "https://down.example/".to_string(),
/// });
///
/// assert!(fetcher.fetch("https://down.example/").await.is_err());
/// assert_eq!(fetcher.call_count(), 1);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    /// Create a fetcher with no scripted responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`
    pub fn add_body(&self, url: impl Into<String>, body: impl Into<String>) {
        self.script(url.into(), MockResponse::Body(body.into()));
    }

    /// Fail requests for `url` with `error`
    pub fn add_error(&self, url: impl Into<String>, error: FetchError) {
        self.script(url.into(), MockResponse::Error(error));
    }

    /// Panic with `message` when `url` is requested
    pub fn add_panic(&self, url: impl Into<String>, message: impl Into<String>) {
        self.script(url.into(), MockResponse::Panic(message.into()));
    }

    /// Number of fetches performed
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// URLs fetched, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Reset the call log
    pub fn reset_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn script(&self, url: String, response: MockResponse) {
        self.responses.lock().unwrap().insert(url, response);
    }
}

impl DocumentFetcher for MockFetcher {
    type Error = FetchError;

    async fn fetch(&self, url: &str) -> Result<String, Self::Error> {
        self.calls.lock().unwrap().push(url.to_string());

        let response = self.responses.lock().unwrap().get(url).cloned();
        match response {
            Some(MockResponse::Body(body)) => Ok(body),
            Some(MockResponse::Error(error)) => Err(error),
            Some(MockResponse::Panic(message)) => panic!("{}", message),
            None => Err(FetchError::Network {
                url: url.to_string(),
                reason: "no scripted response".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_fetcher_body() {
        let fetcher = MockFetcher::new();
        fetcher.add_body("https://a.example/", "hello");

        assert_eq!(fetcher.fetch("https://a.example/").await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_mock_fetcher_unscripted_is_network_error() {
        let fetcher = MockFetcher::new();
        let result = fetcher.fetch("https://nowhere.example/").await;

        assert!(matches!(result, Err(FetchError::Network { .. })));
    }

    #[tokio::test]
    async fn test_mock_fetcher_error() {
        let fetcher = MockFetcher::new();
        fetcher.add_error(
            "https://a.example/",
            FetchError::HttpStatus {
                url: "https://a.example/".to_string(),
                status: 404,
            },
        );

        let err = fetcher.fetch("https://a.example/").await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 404 for https://a.example/");
    }

    #[tokio::test]
    async fn test_mock_fetcher_call_log_shared_between_clones() {
        let fetcher = MockFetcher::new();
        let handle = fetcher.clone();
        fetcher.add_body("https://a.example/", "a");

        fetcher.fetch("https://a.example/").await.unwrap();
        fetcher.fetch("https://b.example/").await.unwrap_err();

        assert_eq!(handle.call_count(), 2);
        assert_eq!(handle.calls(), vec!["https://a.example/", "https://b.example/"]);

        handle.reset_calls();
        assert_eq!(fetcher.call_count(), 0);
    }

    #[test]
    fn test_error_messages() {
        let timeout = FetchError::Timeout {
            url: "https://slow.example/".to_string(),
        };
        assert_eq!(timeout.to_string(), "Timeout fetching https://slow.example/");

        let redirects = FetchError::TooManyRedirects {
            url: "https://loop.example/".to_string(),
        };
        assert_eq!(redirects.to_string(), "Too many redirects for https://loop.example/");
    }
}
