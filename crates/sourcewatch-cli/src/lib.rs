//! Sourcewatch CLI library.
//!
//! Argument parsing, configuration loading, output formatting and the
//! `check` and `status` commands behind the `sourcewatch` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;

use sourcewatch_domain::RunStatus;

/// Process exit code for a verified or partial run
pub const EXIT_OK: i32 = 0;

/// Process exit code when tampering was detected
pub const EXIT_TAMPERING: i32 = 1;

/// Process exit code for a fatal error (store, config or write failure)
pub const EXIT_FATAL: i32 = 2;

/// Map a run status to the process exit code.
///
/// Only tampering fails the process.
pub fn exit_code(status: RunStatus) -> i32 {
    match status {
        RunStatus::TamperingDetected => EXIT_TAMPERING,
        RunStatus::Verified | RunStatus::Partial | RunStatus::Pending => EXIT_OK,
    }
}
