//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sourcewatch - detect silent edits to quoted primary-source documents.
#[derive(Debug, Parser)]
#[command(name = "sourcewatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SOURCEWATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug detail (per redirect hop) to stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Log only warnings and errors to stderr
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Human-readable text and tables (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify every tracked source and update the store
    Check(CheckArgs),

    /// Show the last persisted verification run
    Status(StatusArgs),
}

/// Arguments for the check command.
#[derive(Debug, Default, Parser)]
pub struct CheckArgs {
    /// Verification store (JSON)
    #[arg(short, long, env = "SOURCEWATCH_STORE")]
    pub store: Option<PathBuf>,

    /// Pause between sources in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Redirects followed per document
    #[arg(long)]
    pub max_redirects: Option<u32>,

    /// User-Agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Fetch and report without writing the store
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the status command.
#[derive(Debug, Default, Parser)]
pub struct StatusArgs {
    /// Verification store (JSON)
    #[arg(short, long, env = "SOURCEWATCH_STORE")]
    pub store: Option<PathBuf>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_command() {
        let cli = Cli::parse_from([
            "sourcewatch",
            "check",
            "--store",
            "data/sources.json",
            "--delay-ms",
            "0",
            "--max-redirects",
            "3",
            "--dry-run",
        ]);
        match cli.command {
            Command::Check(args) => {
                assert_eq!(args.store, Some(PathBuf::from("data/sources.json")));
                assert_eq!(args.delay_ms, Some(0));
                assert_eq!(args.max_redirects, Some(3));
                assert_eq!(args.timeout_secs, None);
                assert!(args.dry_run);
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["sourcewatch", "status", "--format", "json", "--no-color", "-q"]);
        assert_eq!(cli.format, Some(CliFormat::Json));
        assert!(cli.no_color);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Command::Status(_)));
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        let result = Cli::try_parse_from(["sourcewatch", "-v", "-q", "status"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["sourcewatch"]).is_err());
    }
}
