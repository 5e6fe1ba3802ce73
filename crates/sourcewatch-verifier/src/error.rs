//! Error types for verification runs

use thiserror::Error;

/// Errors that abort a verification run
///
/// Per-source failures never appear here; they are recorded on the source
/// itself and the run continues.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// Verification document could not be loaded
    #[error("Failed to load verification store: {0}")]
    StoreRead(String),

    /// Updated document could not be persisted
    #[error("Failed to persist verification store: {0}")]
    StoreWrite(String),
}
