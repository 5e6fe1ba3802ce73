//! Sourcewatch Verifier
//!
//! Decides, for every tracked quotation, whether it is still present in the
//! live document, and coordinates a full pass over the verification store.
//!
//! # Overview
//!
//! - **SourceVerifier**: fetches the live then the archived document for one
//!   record and applies the decision table
//! - **VerificationRunner**: loads the store, verifies every record in order,
//!   pauses between records, and writes the document back once
//! - **RunSummary**: counts and status of a finished run
//!
//! # Decision Table
//!
//! | Live | Archive | verified | Warning |
//! |------|---------|----------|---------|
//! | found | found | `true` | none |
//! | found | missing or failed | `true` | archive note |
//! | missing | found | `false` | tampering |
//! | failed | found | `null` | temporary issue |
//! | otherwise | | `null` | manual review |
//!
//! A failed live fetch is never reported as tampering.
//!
//! # Usage
//!
//! ```no_run
//! use sourcewatch_fetch::{FetchConfig, HttpFetcher};
//! use sourcewatch_store::JsonFileStore;
//! use sourcewatch_verifier::{RunnerConfig, VerificationRunner};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = HttpFetcher::from_config(FetchConfig::default())?;
//! let runner = VerificationRunner::new(fetcher, RunnerConfig::default());
//!
//! let mut store = JsonFileStore::new("src/_data/sourceVerification.json");
//! let summary = runner
//!     .run_with(&mut store, |p| println!("[{}/{}] {}", p.index + 1, p.total, p.record.name))
//!     .await?;
//!
//! if summary.is_tampered() {
//!     eprintln!("{}", summary.summary());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod runner;
mod summary;
mod verifier;

pub use config::RunnerConfig;
pub use error::RunnerError;
pub use runner::{Progress, VerificationRunner};
pub use summary::RunSummary;
pub use verifier::{Check, SourceVerifier};
