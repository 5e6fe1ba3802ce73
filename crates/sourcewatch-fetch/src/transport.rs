//! Single-request HTTP transports
//!
//! A transport issues one GET and hands back what the server said. Redirects
//! are reported, never followed; `HttpFetcher` owns that policy.

use crate::{FetchConfig, FetchError};
use reqwest::header::LOCATION;
use reqwest::Url;
use std::future::Future;

/// What one GET produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// Status code
    pub status: u16,

    /// `Location` header, when present and readable
    pub location: Option<String>,

    /// Body text; only read for `200` responses
    pub body: String,
}

impl RawResponse {
    /// A `200` response carrying `body`
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            location: None,
            body: body.into(),
        }
    }

    /// A redirect response pointing at `location`
    pub fn redirect(status: u16, location: impl Into<String>) -> Self {
        Self {
            status,
            location: Some(location.into()),
            body: String::new(),
        }
    }

    /// A bodiless response with `status`
    pub fn status(status: u16) -> Self {
        Self {
            status,
            location: None,
            body: String::new(),
        }
    }

    /// Whether this response asks the client to go elsewhere
    ///
    /// Any 3xx counts, provided it names a target.
    pub fn redirect_target(&self) -> Option<&str> {
        if (300..400).contains(&self.status) {
            self.location.as_deref()
        } else {
            None
        }
    }
}

/// Trait for performing exactly one GET request
pub trait Transport: Send + Sync {
    /// Issue a GET for `url` without following redirects
    fn get(&self, url: &Url) -> impl Future<Output = Result<RawResponse, FetchError>> + Send;
}

/// `reqwest`-backed transport for `http` and `https` URLs
///
/// The client is built with automatic redirects disabled, the configured
/// timeout and the configured `User-Agent`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport from fetch settings
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Setup` if the TLS backend cannot be initialized.
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| FetchError::Setup(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<RawResponse, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| request_error(url, e))?;

        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body = if status == 200 {
            response.text().await.map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout {
                        url: url.to_string(),
                    }
                } else {
                    FetchError::Body {
                        url: url.to_string(),
                        reason: e.to_string(),
                    }
                }
            })?
        } else {
            String::new()
        };

        Ok(RawResponse {
            status,
            location,
            body,
        })
    }
}

fn request_error(url: &Url, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_target_requires_3xx_and_location() {
        assert_eq!(RawResponse::redirect(301, "/next").redirect_target(), Some("/next"));
        assert_eq!(RawResponse::redirect(399, "/next").redirect_target(), Some("/next"));
        assert_eq!(RawResponse::status(302).redirect_target(), None);
        assert_eq!(RawResponse::ok("x").redirect_target(), None);

        let odd = RawResponse {
            status: 404,
            location: Some("/elsewhere".to_string()),
            body: String::new(),
        };
        assert_eq!(odd.redirect_target(), None);
    }

    #[test]
    fn test_reqwest_transport_builds_with_defaults() {
        assert!(ReqwestTransport::new(&FetchConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let transport = ReqwestTransport::new(&FetchConfig::default()).unwrap();
        let url = Url::parse(&format!("http://127.0.0.1:{}/", port)).unwrap();

        let result = transport.get(&url).await;
        assert!(matches!(result, Err(FetchError::Network { .. })));
    }
}
