//! Source records - the tracked quotations

use crate::timestamp;
use crate::verdict::Verdict;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A tracked claim about a primary-source document
///
/// The same passage (`search_text`) is expected in both the live document and
/// its archived snapshot. `verified` is tri-state:
/// - `Some(true)`: intact in the live document
/// - `Some(false)`: removed from the live document while the archive keeps it
/// - `None`: indeterminate (fetch trouble, or not found anywhere)
///
/// Fields this crate does not know about are kept in `extra` and written back
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRecord {
    /// Stable identifier, unique within the collection
    pub id: String,

    /// Human-readable label
    pub name: String,

    /// Currently hosted document
    pub live_url: String,

    /// Archived snapshot of the same document
    pub archive_url: String,

    /// Exact passage that must be present in both documents
    pub search_text: String,

    /// Most recent verification attempt
    #[serde(default, with = "timestamp::option")]
    pub last_checked: Option<DateTime<Utc>>,

    /// Verification outcome
    #[serde(default)]
    pub verified: Option<bool>,

    /// Explanation whenever `verified` is not an unqualified `true`
    #[serde(default)]
    pub warning: Option<String>,

    /// Site-owned fields carried through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SourceRecord {
    /// Create a record that has never been checked
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        live_url: impl Into<String>,
        archive_url: impl Into<String>,
        search_text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            live_url: live_url.into(),
            archive_url: archive_url.into(),
            search_text: search_text.into(),
            last_checked: None,
            verified: None,
            warning: None,
            extra: Map::new(),
        }
    }

    /// Copy of this record carrying the outcome of a verification
    pub fn with_verdict(&self, verdict: Verdict, checked_at: DateTime<Utc>) -> Self {
        Self {
            last_checked: Some(checked_at),
            verified: verdict.verified(),
            warning: verdict.warning(&self.search_text),
            ..self.clone()
        }
    }

    /// Copy of this record for a verification that broke down unexpectedly
    pub fn with_failure(&self, message: &str, checked_at: DateTime<Utc>) -> Self {
        Self {
            last_checked: Some(checked_at),
            verified: None,
            warning: Some(format!("Verification failed: {}", message)),
            ..self.clone()
        }
    }

    /// Confirmed intact
    pub fn is_verified(&self) -> bool {
        self.verified == Some(true)
    }

    /// Confirmed removed from the live document
    pub fn is_tampered(&self) -> bool {
        self.verified == Some(false)
    }

    /// Indeterminate
    pub fn is_unknown(&self) -> bool {
        self.verified.is_none()
    }
}
