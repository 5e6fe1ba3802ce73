//! Configuration for document fetching

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default timeout per request (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default bound on redirects followed for one document
pub const DEFAULT_MAX_REDIRECTS: u32 = 5;

/// Default client identification sent with every request
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; SourceVerifier/1.0; +https://github.com/piconate/website-civil-war)";

/// Fetch settings
///
/// # Examples
///
/// ```
/// use sourcewatch_fetch::FetchConfig;
/// use std::time::Duration;
///
/// let config = FetchConfig::default();
/// assert_eq!(config.timeout(), Duration::from_secs(30));
/// assert_eq!(config.max_redirects, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Time allowed for each request, from send to full body
    pub timeout_secs: u64,

    /// Redirects followed before giving up
    pub max_redirects: u32,

    /// `User-Agent` header value
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchConfig {
    /// Get the request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
