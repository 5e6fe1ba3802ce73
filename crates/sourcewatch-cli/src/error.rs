//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
///
/// Every variant is fatal and maps to exit code 2.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Verification run aborted
    #[error("{0}")]
    Runner(#[from] sourcewatch_verifier::RunnerError),

    /// HTTP client could not be set up
    #[error("{0}")]
    Fetch(#[from] sourcewatch_fetch::FetchError),

    /// Store could not be read
    #[error("{0}")]
    Store(#[from] sourcewatch_store::StoreError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}
