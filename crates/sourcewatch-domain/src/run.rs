//! Verification runs - the whole collection after one pass

use crate::source::SourceRecord;
use crate::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Overall state of a verification run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunStatus {
    /// No run has been recorded yet (or the store holds a status this
    /// version does not know)
    #[default]
    Pending,

    /// Every source is confirmed intact
    Verified,

    /// No tampering, but at least one source is indeterminate
    Partial,

    /// At least one source lost its quotation
    TamperingDetected,
}

impl RunStatus {
    /// Derive the run status from a set of records
    ///
    /// Tampering dominates; otherwise the run is verified only when every
    /// record is. An empty collection is vacuously verified.
    pub fn derive(sources: &[SourceRecord]) -> Self {
        if sources.iter().any(SourceRecord::is_tampered) {
            RunStatus::TamperingDetected
        } else if sources.iter().all(SourceRecord::is_verified) {
            RunStatus::Verified
        } else {
            RunStatus::Partial
        }
    }

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Pending => "pending",
            RunStatus::Verified => "verified",
            RunStatus::Partial => "partial",
            RunStatus::TamperingDetected => "tampering_detected",
        }
    }

    /// Parse a wire name (internal use)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(RunStatus::Pending),
            "verified" => Some(RunStatus::Verified),
            "partial" => Some(RunStatus::Partial),
            "tampering_detected" => Some(RunStatus::TamperingDetected),
            _ => None,
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RunStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RunStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(RunStatus::parse).unwrap_or_default())
    }
}

/// Projection of a tampered record, rendered on the site's evidence page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TamperingWarning {
    /// Id of the tampered record
    pub source_id: String,

    /// Name of the tampered record
    pub source_name: String,

    /// Warning text of the record
    #[serde(default)]
    pub warning: Option<String>,

    /// When the tampering was observed
    #[serde(default, with = "timestamp::option")]
    pub detected_at: Option<DateTime<Utc>>,

    /// Live document location
    pub live_url: String,

    /// Archived document location
    pub archive_url: String,
}

impl From<&SourceRecord> for TamperingWarning {
    fn from(record: &SourceRecord) -> Self {
        Self {
            source_id: record.id.clone(),
            source_name: record.name.clone(),
            warning: record.warning.clone(),
            detected_at: record.last_checked,
            live_url: record.live_url.clone(),
            archive_url: record.archive_url.clone(),
        }
    }
}

/// The verification store's document
///
/// Loaded at the start of a run, every record replaced with a fresh result,
/// then written back whole.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRun {
    /// Tracked records, in persisted order
    pub sources: Vec<SourceRecord>,

    /// When the last run finished
    #[serde(default, with = "timestamp::option")]
    pub last_verified: Option<DateTime<Utc>>,

    /// Derived status of the last run
    #[serde(default)]
    pub status: RunStatus,

    /// Tampered records of the last run
    #[serde(default)]
    pub warnings: Vec<TamperingWarning>,

    /// Site-owned fields carried through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VerificationRun {
    /// Create a run document that has never been verified
    pub fn new(sources: Vec<SourceRecord>) -> Self {
        Self {
            sources,
            ..Default::default()
        }
    }

    /// Replace every record with its fresh result and recompute the
    /// derived fields
    pub fn apply_results(&mut self, results: Vec<SourceRecord>, verified_at: DateTime<Utc>) {
        self.warnings = results
            .iter()
            .filter(|r| r.is_tampered())
            .map(TamperingWarning::from)
            .collect();
        self.status = RunStatus::derive(&results);
        self.sources = results;
        self.last_verified = Some(verified_at);
    }

    /// Records confirmed intact
    pub fn verified_count(&self) -> usize {
        self.sources.iter().filter(|r| r.is_verified()).count()
    }

    /// Records confirmed tampered
    pub fn tampered_count(&self) -> usize {
        self.sources.iter().filter(|r| r.is_tampered()).count()
    }

    /// Records without a determinate verdict
    pub fn unknown_count(&self) -> usize {
        self.sources.iter().filter(|r| r.is_unknown()).count()
    }
}
