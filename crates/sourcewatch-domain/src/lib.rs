//! Sourcewatch Domain Layer
//!
//! Core model and pure logic for primary-source tampering detection.
//! Network and filesystem concerns live in other crates; this crate defines
//! the records, the matching rules, the verdict table, and the trait seams
//! those crates implement.
//!
//! ## Key Concepts
//!
//! - **SourceRecord**: A tracked quotation with a live and an archived location
//! - **Verdict**: Outcome of one verification, derived from a fixed decision table
//! - **VerificationRun**: The whole collection after a pass, with derived status
//! - **Normalization**: Case, whitespace and quote-glyph folding before matching
//!
//! ## Architecture
//!
//! - Pure logic only, no I/O
//! - `DocumentFetcher` and `RunStore` are the boundaries to infrastructure
//! - Tests inject fakes at those boundaries

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod run;
pub mod source;
pub mod text;
pub mod timestamp;
pub mod traits;
pub mod verdict;

// Re-exports for convenience
pub use run::{RunStatus, TamperingWarning, VerificationRun};
pub use source::SourceRecord;
pub use text::{contains_text, normalize};
pub use verdict::{FetchOutcome, Verdict};
