//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::VerificationRun;
use std::future::Future;

/// Trait for retrieving a document's full text
///
/// Implemented by the infrastructure layer (sourcewatch-fetch)
pub trait DocumentFetcher: Send + Sync {
    /// Error type for fetch operations
    type Error: std::fmt::Display + Send;

    /// Fetch the text body found at `url`, following redirects
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Trait for loading and persisting the verification document
///
/// Implemented by the infrastructure layer (sourcewatch-store)
pub trait RunStore {
    /// Error type for store operations
    type Error;

    /// Load the current verification document
    fn load(&self) -> Result<VerificationRun, Self::Error>;

    /// Replace the persisted document with `run`
    fn save(&mut self, run: &VerificationRun) -> Result<(), Self::Error>;
}
