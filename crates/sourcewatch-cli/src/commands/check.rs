//! Check command implementation.

use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use sourcewatch_domain::RunStatus;
use sourcewatch_fetch::HttpFetcher;
use sourcewatch_store::JsonFileStore;
use sourcewatch_verifier::VerificationRunner;

/// Execute the check command.
///
/// Returns the status of the finished run.
pub async fn execute_check(
    args: CheckArgs,
    mut config: Config,
    formatter: &Formatter,
) -> Result<RunStatus> {
    config.apply_check_args(&args)?;

    let fetcher = HttpFetcher::from_config(config.fetch.clone())?;
    let runner = VerificationRunner::new(fetcher, config.runner.clone());
    let mut store = JsonFileStore::new(&config.store);

    tracing::info!("Using store {}", config.store.display());
    let summary = runner
        .run_with(&mut store, |progress| {
            if let Some(line) = formatter.progress_line(&progress) {
                println!("{}", line);
            }
        })
        .await?;

    println!("{}", formatter.format_summary(&summary)?);
    Ok(summary.status)
}
