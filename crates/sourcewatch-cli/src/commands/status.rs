//! Status command implementation.

use crate::cli::StatusArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use sourcewatch_domain::traits::RunStore;
use sourcewatch_domain::RunStatus;
use sourcewatch_store::JsonFileStore;

/// Execute the status command.
///
/// Reads the store only; no document is fetched. Returns the persisted status.
pub fn execute_status(args: StatusArgs, config: &Config, formatter: &Formatter) -> Result<RunStatus> {
    let path = args.store.unwrap_or_else(|| config.store.clone());
    let run = JsonFileStore::new(&path).load()?;

    println!("{}", formatter.format_status(&run)?);
    Ok(run.status)
}
