//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use sourcewatch_domain::{timestamp, RunStatus, SourceRecord, Verdict, VerificationRun};
use sourcewatch_verifier::{Progress, RunSummary};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const WARNING_COLUMN_CHARS: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Get the output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format the line printed after each source is checked.
    ///
    /// Returns `None` in JSON mode, which prints only the final document.
    pub fn progress_line(&self, progress: &Progress<'_>) -> Option<String> {
        if self.format == OutputFormat::Json {
            return None;
        }

        let label = match progress.verdict {
            Some(Verdict::Verified) => self.success(Verdict::Verified.label()),
            Some(Verdict::Tampering) => self.error(Verdict::Tampering.label()),
            Some(verdict @ (Verdict::ArchiveIssue | Verdict::TemporaryIssue)) => {
                self.warning(verdict.label())
            }
            Some(Verdict::NeedsReview) => {
                self.colorize(&format!("? {}", Verdict::NeedsReview.label()), "magenta")
            }
            None => self.error("VERIFICATION FAILED"),
        };

        Some(format!(
            "[{}/{}] {} ... {}",
            progress.index + 1,
            progress.total,
            progress.record.name,
            label
        ))
    }

    /// Format the result of a check run.
    pub fn format_summary(&self, summary: &RunSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "total": summary.total,
                    "verified": summary.verified,
                    "tampered": summary.tampered,
                    "unknown": summary.unknown,
                    "status": summary.status,
                    "warnings": summary.warnings,
                    "elapsedMs": summary.elapsed.as_millis() as u64,
                    "persisted": summary.persisted,
                });
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                let mut text = summary.summary();
                if summary.is_tampered() {
                    text.push('\n');
                    text.push_str(&self.error(
                        "Tampering detected. Compare the live documents against their archives.",
                    ));
                }
                Ok(text)
            }
        }
    }

    /// Format a persisted run for the status command.
    pub fn format_status(&self, run: &VerificationRun) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(run)?),
            OutputFormat::Table => Ok(self.format_status_table(run)),
        }
    }

    fn format_status_table(&self, run: &VerificationRun) -> String {
        let last_verified = run
            .last_verified
            .as_ref()
            .map(timestamp::format)
            .unwrap_or_else(|| "never".to_string());

        let mut lines = vec![
            format!("Status: {}", self.status(run.status)),
            format!("Last verified: {}", last_verified),
            String::new(),
        ];

        if run.sources.is_empty() {
            lines.push(self.colorize("No sources tracked.", "yellow"));
            return lines.join("\n");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Name", "Verified", "Last Checked", "Warning"]);

        for source in &run.sources {
            let checked = source
                .last_checked
                .as_ref()
                .map(timestamp::format)
                .unwrap_or_else(|| "-".to_string());
            let warning = source
                .warning
                .as_deref()
                .map(truncate)
                .unwrap_or_default();
            builder.push_record([
                source.id.as_str(),
                source.name.as_str(),
                verified_cell(source),
                checked.as_str(),
                warning.as_str(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        lines.push(table.to_string());

        for warning in &run.warnings {
            lines.push(self.error(&format!(
                "{}: {}",
                warning.source_name,
                warning.warning.as_deref().unwrap_or("tampering detected")
            )));
        }

        lines.join("\n")
    }

    fn status(&self, status: RunStatus) -> String {
        let text = status.as_str().to_uppercase();
        match status {
            RunStatus::Verified => self.colorize(&text, "green"),
            RunStatus::Partial => self.colorize(&text, "yellow"),
            RunStatus::TamperingDetected => self.colorize(&text, "red"),
            RunStatus::Pending => text,
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().bold().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn verified_cell(source: &SourceRecord) -> &'static str {
    match source.verified {
        Some(true) => "yes",
        Some(false) => "NO",
        None => "unknown",
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= WARNING_COLUMN_CHARS {
        text.to_string()
    } else {
        let head: String = text.chars().take(WARNING_COLUMN_CHARS - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn record(id: &str) -> SourceRecord {
        SourceRecord::new(
            id,
            format!("Source {}", id),
            format!("https://live.example/{}", id),
            format!("https://archive.example/{}", id),
            "all men are created equal",
        )
    }

    fn tampered_run() -> VerificationRun {
        let now = timestamp::now();
        let mut run = VerificationRun::default();
        run.apply_results(
            vec![
                record("a").with_verdict(Verdict::Verified, now),
                record("b").with_verdict(Verdict::Tampering, now),
            ],
            now,
        );
        run
    }

    #[test]
    fn test_progress_line() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let source = record("a");
        let progress = Progress {
            index: 0,
            total: 3,
            record: &source,
            verdict: Some(Verdict::Tampering),
        };

        assert_eq!(
            formatter.progress_line(&progress).unwrap(),
            "[1/3] Source a ... ✗ TAMPERING DETECTED"
        );
    }

    #[test]
    fn test_progress_line_suppressed_in_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let source = record("a");
        let progress = Progress {
            index: 0,
            total: 1,
            record: &source,
            verdict: None,
        };
        assert!(formatter.progress_line(&progress).is_none());
    }

    #[test]
    fn test_summary_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let summary = RunSummary::from_run(&tampered_run(), Duration::from_millis(1500), true);

        let output = formatter.format_summary(&summary).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["status"], "tampering_detected");
        assert_eq!(json["tampered"], 1);
        assert_eq!(json["elapsedMs"], 1500);
        assert_eq!(json["warnings"][0]["sourceId"], "b");
    }

    #[test]
    fn test_summary_table_flags_tampering() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let summary = RunSummary::from_run(&tampered_run(), Duration::ZERO, true);

        let output = formatter.format_summary(&summary).unwrap();
        assert!(output.contains("Status: TAMPERING_DETECTED"));
        assert!(output.contains("✗ Tampering detected"));
    }

    #[test]
    fn test_status_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_status(&tampered_run()).unwrap();

        assert!(output.contains("Status: TAMPERING_DETECTED"));
        assert!(output.contains("Source a"));
        assert!(output.contains("NO"));
        assert!(output.contains("✗ Source b: TAMPERING DETECTED"));
    }

    #[test]
    fn test_status_never_verified() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_status(&VerificationRun::default()).unwrap();

        assert!(output.contains("Status: PENDING"));
        assert!(output.contains("Last verified: never"));
        assert!(output.contains("No sources tracked."));
    }

    #[test]
    fn test_status_json_is_store_document() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_status(&tampered_run()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["status"], "tampering_detected");
        assert_eq!(json["sources"][1]["verified"], false);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short"), "short");
        let long = "x".repeat(100);
        let cut = truncate(&long);
        assert_eq!(cut.chars().count(), WARNING_COLUMN_CHARS);
        assert!(cut.ends_with("..."));
    }
}
