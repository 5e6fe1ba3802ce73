//! Per-source verification

use sourcewatch_domain::traits::DocumentFetcher;
use sourcewatch_domain::{timestamp, FetchOutcome, SourceRecord, Verdict};

/// What one verification observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    /// Live document outcome
    pub live: FetchOutcome,

    /// Archived document outcome
    pub archive: FetchOutcome,

    /// Verdict derived from the two outcomes
    pub verdict: Verdict,
}

/// Verifies one source record against its live and archived documents
///
/// Fetch failures are folded into the verdict; `verify` cannot fail.
///
/// # Examples
///
/// ```
/// use sourcewatch_domain::SourceRecord;
/// use sourcewatch_fetch::MockFetcher;
/// use sourcewatch_verifier::SourceVerifier;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let fetcher = MockFetcher::new();
/// fetcher.add_body("https://live.example/doc", "all men are created equal");
/// fetcher.add_body("https://archive.example/doc", "all men are created equal");
///
/// let record = SourceRecord::new(
///     "doc", "Doc", "https://live.example/doc", "https://archive.example/doc",
///     "all men are created equal",
/// );
/// let updated = SourceVerifier::new(fetcher).verify(&record).await;
/// assert_eq!(updated.verified, Some(true));
/// # }
/// ```
pub struct SourceVerifier<F> {
    fetcher: F,
}

impl<F: DocumentFetcher> SourceVerifier<F> {
    /// Create a verifier over `fetcher`
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Get a reference to the fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch both documents and apply the decision table
    ///
    /// The live document is fetched first, then the archive.
    pub async fn check(&self, record: &SourceRecord) -> Check {
        let live = self.outcome(&record.live_url, &record.search_text).await;
        tracing::debug!("{}: live {}", record.id, live);

        let archive = self.outcome(&record.archive_url, &record.search_text).await;
        tracing::debug!("{}: archive {}", record.id, archive);

        let verdict = Verdict::decide(&live, &archive);
        Check {
            live,
            archive,
            verdict,
        }
    }

    /// Verify `record`, returning the updated copy
    ///
    /// `last_checked` is stamped with the time the check started.
    pub async fn verify(&self, record: &SourceRecord) -> SourceRecord {
        self.verify_with_check(record).await.0
    }

    /// Verify `record`, returning the updated copy and what was observed
    pub async fn verify_with_check(&self, record: &SourceRecord) -> (SourceRecord, Check) {
        let checked_at = timestamp::now();
        let check = self.check(record).await;

        match check.verdict {
            Verdict::Tampering => tracing::warn!(
                "{}: quote removed from live document {}",
                record.id,
                record.live_url
            ),
            Verdict::Verified => {}
            other => tracing::info!("{}: {}", record.id, other),
        }

        (record.with_verdict(check.verdict, checked_at), check)
    }

    async fn outcome(&self, url: &str, search_text: &str) -> FetchOutcome {
        let result = self.fetcher.fetch(url).await;
        if let Err(e) = &result {
            tracing::warn!("Fetch failed: {}", e);
        }
        FetchOutcome::classify(result, search_text)
    }
}
