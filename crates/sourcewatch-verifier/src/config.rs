//! Configuration for verification runs
//!
//! Defines the politeness delay between sources and the persistence mode.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the verification runner
///
/// # Examples
///
/// ```
/// use sourcewatch_verifier::RunnerConfig;
/// use std::time::Duration;
///
/// let config = RunnerConfig::default();
/// assert_eq!(config.request_delay(), Duration::from_secs(2));
/// assert!(!config.dry_run);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Pause between consecutive sources (in milliseconds)
    /// Default: 2000, to avoid hammering archive and government hosts
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Dry-run mode: verify everything but do not write the store
    /// Default: false
    #[serde(default)]
    pub dry_run: bool,
}

fn default_request_delay_ms() -> u64 {
    2000
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: default_request_delay_ms(),
            dry_run: false,
        }
    }
}

impl RunnerConfig {
    /// Get the inter-source delay as Duration
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RunnerConfig::default();
        assert_eq!(config.request_delay_ms, 2000);
        assert!(!config.dry_run);
    }

    #[test]
    fn test_serde_defaults() {
        let config: RunnerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RunnerConfig::default());

        let config: RunnerConfig = serde_json::from_str(r#"{"dry_run": true}"#).unwrap();
        assert!(config.dry_run);
        assert_eq!(config.request_delay(), Duration::from_millis(2000));
    }
}
