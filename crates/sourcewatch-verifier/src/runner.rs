//! Verification run coordination
//!
//! Loads the store, verifies every source in order with a pause between
//! sources, then writes the whole document back once.

use crate::{RunSummary, RunnerConfig, RunnerError, SourceVerifier};
use sourcewatch_domain::traits::{DocumentFetcher, RunStore};
use sourcewatch_domain::{timestamp, SourceRecord, Verdict};
use std::any::Any;
use std::fmt::Display;
use std::sync::Arc;
use tokio::time::Instant;

/// Progress report for one processed source
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// Zero-based position in the collection
    pub index: usize,

    /// Collection size
    pub total: usize,

    /// Updated record
    pub record: &'a SourceRecord,

    /// Verdict reached, or `None` when verification itself failed
    pub verdict: Option<Verdict>,
}

/// Runs a verification pass over a store
///
/// Sources are processed one at a time, in persisted order. A failure while
/// verifying one source is recorded on that source and never stops the run.
///
/// # Examples
///
/// ```no_run
/// use sourcewatch_fetch::{FetchConfig, HttpFetcher};
/// use sourcewatch_store::JsonFileStore;
/// use sourcewatch_verifier::{RunnerConfig, VerificationRunner};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = HttpFetcher::from_config(FetchConfig::default())?;
/// let runner = VerificationRunner::new(fetcher, RunnerConfig::default());
///
/// let mut store = JsonFileStore::new("src/_data/sourceVerification.json");
/// let summary = runner.run(&mut store).await?;
/// println!("{}", summary.summary());
/// # Ok(())
/// # }
/// ```
pub struct VerificationRunner<F> {
    verifier: Arc<SourceVerifier<F>>,
    config: RunnerConfig,
}

impl<F> VerificationRunner<F>
where
    F: DocumentFetcher + 'static,
{
    /// Create a runner over `fetcher`
    pub fn new(fetcher: F, config: RunnerConfig) -> Self {
        Self {
            verifier: Arc::new(SourceVerifier::new(fetcher)),
            config,
        }
    }

    /// Get the runner configuration
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Get the per-source verifier
    pub fn verifier(&self) -> &SourceVerifier<F> {
        &self.verifier
    }

    /// Run a full verification pass
    ///
    /// # Errors
    ///
    /// - `StoreRead` if the document cannot be loaded; nothing is fetched
    /// - `StoreWrite` if the updated document cannot be persisted
    pub async fn run<S>(&self, store: &mut S) -> Result<RunSummary, RunnerError>
    where
        S: RunStore,
        S::Error: Display,
    {
        self.run_with(store, |_| {}).await
    }

    /// Run a full verification pass, reporting each processed source
    pub async fn run_with<S, P>(
        &self,
        store: &mut S,
        mut on_progress: P,
    ) -> Result<RunSummary, RunnerError>
    where
        S: RunStore,
        S::Error: Display,
        P: FnMut(Progress<'_>),
    {
        let start = Instant::now();

        let mut run = store
            .load()
            .map_err(|e| RunnerError::StoreRead(e.to_string()))?;
        let total = run.sources.len();
        tracing::info!("Verifying {} sources", total);

        let mut results = Vec::with_capacity(total);
        for (index, record) in run.sources.iter().enumerate() {
            if index > 0 && !self.config.request_delay().is_zero() {
                tokio::time::sleep(self.config.request_delay()).await;
            }

            tracing::info!("[{}/{}] Checking: {}", index + 1, total, record.name);
            let (updated, verdict) = self.verify_isolated(record).await;

            on_progress(Progress {
                index,
                total,
                record: &updated,
                verdict,
            });
            results.push(updated);
        }

        run.apply_results(results, timestamp::now());

        let persisted = !self.config.dry_run;
        if persisted {
            store
                .save(&run)
                .map_err(|e| RunnerError::StoreWrite(e.to_string()))?;
        } else {
            tracing::info!("DRY RUN: would write {} sources", total);
        }

        let summary = RunSummary::from_run(&run, start.elapsed(), persisted);
        tracing::info!(
            "Run completed: {} verified, {} tampered, {} unknown ({})",
            summary.verified,
            summary.tampered,
            summary.unknown,
            summary.status
        );
        Ok(summary)
    }

    /// Verify one record on its own task so a panic stays contained
    async fn verify_isolated(&self, record: &SourceRecord) -> (SourceRecord, Option<Verdict>) {
        let checked_at = timestamp::now();
        let verifier = Arc::clone(&self.verifier);
        let owned = record.clone();

        let handle = tokio::spawn(async move {
            let (updated, check) = verifier.verify_with_check(&owned).await;
            (updated, check.verdict)
        });

        match handle.await {
            Ok((updated, verdict)) => (updated, Some(verdict)),
            Err(e) => {
                let message = if e.is_panic() {
                    panic_message(e.into_panic())
                } else {
                    e.to_string()
                };
                tracing::error!("Verification of {} failed: {}", record.id, message);
                (record.with_failure(&message, checked_at), None)
            }
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
