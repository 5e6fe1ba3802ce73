//! Summary of a completed verification run

use sourcewatch_domain::{RunStatus, TamperingWarning, VerificationRun};
use std::time::Duration;

/// Counts and outcome of one verification run
///
/// Built from the document after results were applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Sources processed
    pub total: usize,

    /// Sources confirmed intact
    pub verified: usize,

    /// Sources confirmed tampered
    pub tampered: usize,

    /// Sources without a determinate verdict
    pub unknown: usize,

    /// Derived run status
    pub status: RunStatus,

    /// Tampered sources, in persisted order
    pub warnings: Vec<TamperingWarning>,

    /// Wall time of the run
    pub elapsed: Duration,

    /// Whether the document was written back
    pub persisted: bool,
}

impl RunSummary {
    /// Summarize a run document
    pub fn from_run(run: &VerificationRun, elapsed: Duration, persisted: bool) -> Self {
        Self {
            total: run.sources.len(),
            verified: run.verified_count(),
            tampered: run.tampered_count(),
            unknown: run.unknown_count(),
            status: run.status,
            warnings: run.warnings.clone(),
            elapsed,
            persisted,
        }
    }

    /// Whether any source was found tampered
    pub fn is_tampered(&self) -> bool {
        self.status == RunStatus::TamperingDetected
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Verification Summary".to_string(),
            "====================".to_string(),
            format!("Total sources: {}", self.total),
            format!("Verified: {}/{}", self.verified, self.total),
            format!("Tampered: {}/{}", self.tampered, self.total),
            format!("Unknown/Issues: {}/{}", self.unknown, self.total),
            format!("Status: {}", self.status.as_str().to_uppercase()),
            format!("Elapsed: {:.1}s", self.elapsed.as_secs_f64()),
        ];

        if !self.persisted {
            lines.push("DRY RUN: store not updated".to_string());
        }

        if !self.warnings.is_empty() {
            lines.push(String::new());
            lines.push("TAMPERING WARNINGS:".to_string());
            for warning in &self.warnings {
                lines.push(format!("  - {}", warning.source_name));
                if let Some(text) = &warning.warning {
                    lines.push(format!("    {}", text));
                }
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sourcewatch_domain::{SourceRecord, Verdict};

    fn run_with(verdicts: &[Option<Verdict>]) -> VerificationRun {
        let now = sourcewatch_domain::timestamp::now();
        let results = verdicts
            .iter()
            .enumerate()
            .map(|(i, verdict)| {
                let record = SourceRecord::new(
                    format!("s{}", i),
                    format!("Source {}", i),
                    format!("https://live.example/{}", i),
                    format!("https://archive.example/{}", i),
                    "quote",
                );
                match verdict {
                    Some(v) => record.with_verdict(*v, now),
                    None => record.with_failure("boom", now),
                }
            })
            .collect();

        let mut run = VerificationRun::default();
        run.apply_results(results, now);
        run
    }

    #[test]
    fn test_counts() {
        let run = run_with(&[
            Some(Verdict::Verified),
            Some(Verdict::Tampering),
            Some(Verdict::TemporaryIssue),
            None,
        ]);
        let summary = RunSummary::from_run(&run, Duration::from_secs(6), true);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.verified, 1);
        assert_eq!(summary.tampered, 1);
        assert_eq!(summary.unknown, 2);
        assert_eq!(summary.warnings.len(), 1);
        assert!(summary.is_tampered());
    }

    #[test]
    fn test_archive_issue_counts_as_verified() {
        let run = run_with(&[Some(Verdict::ArchiveIssue)]);
        let summary = RunSummary::from_run(&run, Duration::ZERO, true);

        assert_eq!(summary.verified, 1);
        assert_eq!(summary.status, RunStatus::Verified);
    }

    #[test]
    fn test_summary_text() {
        let run = run_with(&[Some(Verdict::Verified), Some(Verdict::Tampering)]);
        let text = RunSummary::from_run(&run, Duration::from_millis(2500), false).summary();

        assert!(text.contains("Total sources: 2"));
        assert!(text.contains("Verified: 1/2"));
        assert!(text.contains("Tampered: 1/2"));
        assert!(text.contains("Status: TAMPERING_DETECTED"));
        assert!(text.contains("Elapsed: 2.5s"));
        assert!(text.contains("DRY RUN"));
        assert!(text.contains("  - Source 1\n    TAMPERING DETECTED: The quote"));
        assert!(!text.contains("https://live.example/1"));
    }

    #[test]
    fn test_summary_text_clean_run() {
        let run = run_with(&[Some(Verdict::Verified)]);
        let text = RunSummary::from_run(&run, Duration::ZERO, true).summary();

        assert!(!text.contains("TAMPERING WARNINGS"));
        assert!(!text.contains("DRY RUN"));
    }
}
