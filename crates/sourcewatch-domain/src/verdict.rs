//! Verdict decision table
//!
//! A verification fetches the live and the archived document, and each side
//! lands in one of three outcomes. The verdict is a pure function of the pair:
//!
//! | Live | Archive | Verdict | `verified` |
//! |------|---------|---------|------------|
//! | Found | Found | `Verified` | `true` |
//! | Found | Missing / Failed | `ArchiveIssue` | `true` |
//! | Missing | Found | `Tampering` | `false` |
//! | Failed | Found | `TemporaryIssue` | `null` |
//! | Missing / Failed | Missing / Failed | `NeedsReview` | `null` |
//!
//! `false` is only reachable from a live fetch that succeeded and came back
//! without the passage while the archive still has it.

use crate::text::contains_text;
use std::fmt;

/// Characters of the quotation echoed in a tampering warning
const QUOTE_PREVIEW_CHARS: usize = 50;

/// Result of fetching one side and searching it for the quotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Document fetched and the quotation is present
    Found,

    /// Document fetched and the quotation is absent
    Missing,

    /// Document could not be fetched (message describes why)
    Failed(String),
}

impl FetchOutcome {
    /// Classify a fetch result against the quotation
    ///
    /// An empty body is treated as a failed fetch rather than a clean
    /// negative, so a blank page never reads as a removed quote.
    pub fn classify<E: fmt::Display>(result: Result<String, E>, search_text: &str) -> Self {
        match result {
            Ok(body) if body.trim().is_empty() => {
                FetchOutcome::Failed("empty response body".to_string())
            }
            Ok(body) if contains_text(&body, search_text) => FetchOutcome::Found,
            Ok(_) => FetchOutcome::Missing,
            Err(e) => FetchOutcome::Failed(e.to_string()),
        }
    }

    /// Whether the document was fetched at all
    pub fn fetched(&self) -> bool {
        !matches!(self, FetchOutcome::Failed(_))
    }
}

impl fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchOutcome::Found => write!(f, "quote found"),
            FetchOutcome::Missing => write!(f, "quote NOT found"),
            FetchOutcome::Failed(reason) => write!(f, "fetch failed ({})", reason),
        }
    }
}

/// Outcome of verifying one source record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Quotation intact in both documents
    Verified,

    /// Quotation intact in the live document; archive side could not confirm
    ArchiveIssue,

    /// Quotation removed from the live document but kept in the archive
    Tampering,

    /// Live document unavailable while the archive confirms the quotation
    TemporaryIssue,

    /// Quotation confirmed nowhere; a person needs to look
    NeedsReview,
}

impl Verdict {
    /// Apply the decision table
    pub fn decide(live: &FetchOutcome, archive: &FetchOutcome) -> Self {
        use FetchOutcome::{Failed, Found, Missing};

        match (live, archive) {
            (Found, Found) => Verdict::Verified,
            (Found, Missing | Failed(_)) => Verdict::ArchiveIssue,
            (Missing, Found) => Verdict::Tampering,
            (Failed(_), Found) => Verdict::TemporaryIssue,
            (Missing | Failed(_), Missing | Failed(_)) => Verdict::NeedsReview,
        }
    }

    /// Tri-state value persisted as `verified`
    pub fn verified(&self) -> Option<bool> {
        match self {
            Verdict::Verified | Verdict::ArchiveIssue => Some(true),
            Verdict::Tampering => Some(false),
            Verdict::TemporaryIssue | Verdict::NeedsReview => None,
        }
    }

    /// Warning persisted alongside the verdict
    pub fn warning(&self, search_text: &str) -> Option<String> {
        match self {
            Verdict::Verified => None,
            Verdict::ArchiveIssue => Some(
                "Note: Quote found in live version but archive fetch may have failed.".to_string(),
            ),
            Verdict::Tampering => Some(format!(
                "TAMPERING DETECTED: The quote \"{}...\" has been REMOVED from the live document but exists in the archived version.",
                quote_preview(search_text)
            )),
            Verdict::TemporaryIssue => Some(
                "Temporary issue: Live site returned an error. Will retry on next verification."
                    .to_string(),
            ),
            Verdict::NeedsReview => Some(
                "Unable to verify: Quote not found in either version. May require manual review."
                    .to_string(),
            ),
        }
    }

    /// Short status label for progress output
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Verified => "VERIFIED",
            Verdict::ArchiveIssue => "ARCHIVE ISSUE",
            Verdict::Tampering => "TAMPERING DETECTED",
            Verdict::TemporaryIssue => "TEMPORARY ISSUE",
            Verdict::NeedsReview => "REVIEW NEEDED",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn quote_preview(search_text: &str) -> String {
    search_text.chars().take(QUOTE_PREVIEW_CHARS).collect()
}
