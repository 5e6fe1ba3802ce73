//! HTTP fetcher with bounded redirect following
//!
//! # Features
//!
//! - Manual redirect loop, bounded by `FetchConfig::max_redirects`
//! - Relative `Location` values resolved against the URL that sent them
//! - Per-request timeout, each hop timed from its own start
//! - Distinct errors for network, timeout, status and redirect failures
//!
//! # Examples
//!
//! ```no_run
//! use sourcewatch_fetch::{FetchConfig, HttpFetcher};
//! use sourcewatch_domain::traits::DocumentFetcher;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), sourcewatch_fetch::FetchError> {
//! let fetcher = HttpFetcher::from_config(FetchConfig::default())?;
//! let text = fetcher.fetch("https://www.archives.gov/founding-docs/declaration-transcript").await?;
//! println!("{} bytes", text.len());
//! # Ok(())
//! # }
//! ```

use crate::transport::{ReqwestTransport, Transport};
use crate::{FetchConfig, FetchError};
use reqwest::Url;
use sourcewatch_domain::traits::DocumentFetcher;
use std::time::Duration;

/// Fetches document text, following redirects up to a bound
pub struct HttpFetcher<T = ReqwestTransport> {
    transport: T,
    timeout: Duration,
    max_redirects: u32,
}

impl HttpFetcher<ReqwestTransport> {
    /// Create a fetcher backed by `reqwest`
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Setup` if the HTTP client cannot be built.
    pub fn from_config(config: FetchConfig) -> Result<Self, FetchError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::new(transport, &config))
    }
}

impl<T: Transport> HttpFetcher<T> {
    /// Create a fetcher over an arbitrary transport
    pub fn new(transport: T, config: &FetchConfig) -> Self {
        Self {
            transport,
            timeout: config.timeout(),
            max_redirects: config.max_redirects,
        }
    }

    /// Get the configured redirect bound
    pub fn max_redirects(&self) -> u32 {
        self.max_redirects
    }

    /// Fetch the text at `url`
    ///
    /// # Errors
    ///
    /// - `InvalidUrl` if `url` or a redirect target is unusable
    /// - `Timeout` if any single request exceeds the timeout
    /// - `Network` on connection failure
    /// - `TooManyRedirects` if more than `max_redirects` redirects are needed
    /// - `HttpStatus` if the final response is not `200`
    pub async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let mut current = parse_http_url(url)?;

        for redirects in 0..=self.max_redirects {
            let response = tokio::time::timeout(self.timeout, self.transport.get(&current))
                .await
                .map_err(|_| FetchError::Timeout {
                    url: current.to_string(),
                })??;

            if let Some(location) = response.redirect_target() {
                let next = current.join(location).map_err(|e| FetchError::InvalidUrl {
                    url: location.to_string(),
                    reason: e.to_string(),
                })?;
                ensure_http_scheme(&next)?;

                tracing::debug!(
                    "Redirect {}/{}: {} -> {} (HTTP {})",
                    redirects + 1,
                    self.max_redirects,
                    current,
                    next,
                    response.status
                );
                current = next;
                continue;
            }

            if response.status != 200 {
                return Err(FetchError::HttpStatus {
                    url: current.to_string(),
                    status: response.status,
                });
            }

            return Ok(response.body);
        }

        Err(FetchError::TooManyRedirects {
            url: url.to_string(),
        })
    }
}

impl<T: Transport> DocumentFetcher for HttpFetcher<T> {
    type Error = FetchError;

    async fn fetch(&self, url: &str) -> Result<String, Self::Error> {
        self.fetch_text(url).await
    }
}

fn parse_http_url(raw: &str) -> Result<Url, FetchError> {
    let url = Url::parse(raw).map_err(|e| FetchError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    ensure_http_scheme(&url)?;
    Ok(url)
}

fn ensure_http_scheme(url: &Url) -> Result<(), FetchError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(FetchError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RawResponse;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Transport answering from a table keyed by full URL
    #[derive(Clone, Default)]
    struct ScriptedTransport {
        routes: Arc<Mutex<HashMap<String, RawResponse>>>,
        requested: Arc<Mutex<Vec<String>>>,
        stall: Option<Duration>,
    }

    impl ScriptedTransport {
        fn route(&self, url: &str, response: RawResponse) {
            self.routes.lock().unwrap().insert(url.to_string(), response);
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }

        /// Chain of `n` redirects /r0 -> /r1 -> ... -> /rn, ending in 200
        fn chain(n: usize) -> Self {
            let transport = Self::default();
            for i in 0..n {
                transport.route(
                    &format!("http://docs.example/r{}", i),
                    RawResponse::redirect(302, format!("/r{}", i + 1)),
                );
            }
            transport.route(&format!("http://docs.example/r{}", n), RawResponse::ok("end"));
            transport
        }
    }

    impl Transport for ScriptedTransport {
        async fn get(&self, url: &Url) -> Result<RawResponse, FetchError> {
            self.requested.lock().unwrap().push(url.to_string());
            if let Some(stall) = self.stall {
                tokio::time::sleep(stall).await;
            }
            let route = self.routes.lock().unwrap().get(url.as_str()).cloned();
            route.ok_or_else(|| FetchError::Network {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            })
        }
    }

    fn fetcher(transport: ScriptedTransport) -> HttpFetcher<ScriptedTransport> {
        HttpFetcher::new(transport, &FetchConfig::default())
    }

    #[tokio::test]
    async fn test_plain_200() {
        let transport = ScriptedTransport::default();
        transport.route("https://docs.example/a", RawResponse::ok("hello"));

        let body = fetcher(transport).fetch_text("https://docs.example/a").await.unwrap();
        assert_eq!(body, "hello");
    }

    #[tokio::test]
    async fn test_five_redirects_succeed() {
        let transport = ScriptedTransport::chain(5);
        let handle = transport.clone();

        let body = fetcher(transport).fetch_text("http://docs.example/r0").await.unwrap();
        assert_eq!(body, "end");
        assert_eq!(handle.requested().len(), 6);
    }

    #[tokio::test]
    async fn test_six_redirects_fail() {
        let transport = ScriptedTransport::chain(6);
        let handle = transport.clone();

        let result = fetcher(transport).fetch_text("http://docs.example/r0").await;
        assert_eq!(
            result,
            Err(FetchError::TooManyRedirects {
                url: "http://docs.example/r0".to_string()
            })
        );
        // The seventh URL is never requested
        assert_eq!(handle.requested().len(), 6);
    }

    #[tokio::test]
    async fn test_zero_redirect_bound() {
        let transport = ScriptedTransport::chain(1);
        let config = FetchConfig {
            max_redirects: 0,
            ..Default::default()
        };
        let fetcher = HttpFetcher::new(transport, &config);

        let result = fetcher.fetch_text("http://docs.example/r0").await;
        assert!(matches!(result, Err(FetchError::TooManyRedirects { .. })));
    }

    #[tokio::test]
    async fn test_relative_and_absolute_locations() {
        let transport = ScriptedTransport::default();
        transport.route(
            "http://old.example/doc",
            RawResponse::redirect(301, "https://new.example/start"),
        );
        transport.route(
            "https://new.example/start",
            RawResponse::redirect(302, "/final?id=7"),
        );
        transport.route("https://new.example/final?id=7", RawResponse::ok("moved"));
        let handle = transport.clone();

        let body = fetcher(transport).fetch_text("http://old.example/doc").await.unwrap();
        assert_eq!(body, "moved");
        assert_eq!(
            handle.requested(),
            vec![
                "http://old.example/doc",
                "https://new.example/start",
                "https://new.example/final?id=7",
            ]
        );
    }

    #[tokio::test]
    async fn test_non_200_is_status_error() {
        let transport = ScriptedTransport::default();
        transport.route("https://docs.example/gone", RawResponse::status(410));

        let result = fetcher(transport).fetch_text("https://docs.example/gone").await;
        assert_eq!(
            result,
            Err(FetchError::HttpStatus {
                url: "https://docs.example/gone".to_string(),
                status: 410
            })
        );
    }

    #[tokio::test]
    async fn test_redirect_without_location_is_status_error() {
        let transport = ScriptedTransport::default();
        transport.route("https://docs.example/a", RawResponse::status(304));

        let result = fetcher(transport).fetch_text("https://docs.example/a").await;
        assert!(matches!(result, Err(FetchError::HttpStatus { status: 304, .. })));
    }

    #[tokio::test]
    async fn test_other_2xx_is_status_error() {
        let transport = ScriptedTransport::default();
        transport.route("https://docs.example/a", RawResponse::status(204));

        let result = fetcher(transport).fetch_text("https://docs.example/a").await;
        assert!(matches!(result, Err(FetchError::HttpStatus { status: 204, .. })));
    }

    #[tokio::test]
    async fn test_network_error_propagates() {
        let result = fetcher(ScriptedTransport::default())
            .fetch_text("https://unrouted.example/")
            .await;
        assert!(matches!(result, Err(FetchError::Network { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout() {
        let transport = ScriptedTransport {
            stall: Some(Duration::from_secs(31)),
            ..Default::default()
        };
        transport.route("https://slow.example/", RawResponse::ok("late"));

        let result = fetcher(transport).fetch_text("https://slow.example/").await;
        assert_eq!(
            result,
            Err(FetchError::Timeout {
                url: "https://slow.example/".to_string()
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_under_timeout_succeeds() {
        let transport = ScriptedTransport {
            stall: Some(Duration::from_secs(29)),
            ..Default::default()
        };
        transport.route("https://slow.example/", RawResponse::ok("in time"));

        let body = fetcher(transport).fetch_text("https://slow.example/").await.unwrap();
        assert_eq!(body, "in time");
    }

    #[tokio::test]
    async fn test_invalid_urls() {
        let f = fetcher(ScriptedTransport::default());

        assert!(matches!(
            f.fetch_text("not a url").await,
            Err(FetchError::InvalidUrl { .. })
        ));
        assert!(matches!(
            f.fetch_text("ftp://docs.example/file.txt").await,
            Err(FetchError::InvalidUrl { .. })
        ));
    }

    #[tokio::test]
    async fn test_redirect_to_unsupported_scheme() {
        let transport = ScriptedTransport::default();
        transport.route(
            "https://docs.example/a",
            RawResponse::redirect(302, "mailto:someone@example.org"),
        );

        let result = fetcher(transport).fetch_text("https://docs.example/a").await;
        assert!(matches!(result, Err(FetchError::InvalidUrl { .. })));
    }
}
