//! ID-space discovery scanner
//!
//! Walks a bounded integer ID range in ascending, fixed-size batches and
//! classifies each candidate by probing its canonical page URL. Valid IDs are
//! merged into the checkpoint after every batch, before the inter-batch
//! sleep, so an interrupted scan resumes without re-probing resolved IDs and
//! without losing discovered results.
//!
//! Invalid outcomes (non-2xx, transport failure) are never persisted: a
//! candidate that was unavailable today is re-probed by the next full scan.

use crate::checkpoint::CheckpointStore;
use crate::config::SiteConfig;
use crate::crawler::fetcher::probe_url;
use crate::Result;
use reqwest::Client;
use std::collections::BTreeSet;
use std::time::Duration;

/// Scanner over the candidate ID space of the catalog site
pub struct Scanner<S: CheckpointStore> {
    client: Client,
    site: SiteConfig,
    store: S,
}

impl<S: CheckpointStore> Scanner<S> {
    /// Creates a new scanner
    ///
    /// # Arguments
    ///
    /// * `client` - The shared HTTP client
    /// * `site` - Site layout used to build candidate URLs
    /// * `store` - Checkpoint store holding already-confirmed IDs
    pub fn new(client: Client, site: SiteConfig, store: S) -> Self {
        Self { client, site, store }
    }

    /// Consumes the scanner, returning the checkpoint store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Scans `[low, high]` and returns every ID confirmed valid so far
    ///
    /// Candidates already present in the checkpoint are skipped. Each batch
    /// is probed sequentially in ascending order; newly valid IDs are merged
    /// into the checkpoint and persisted before the scanner sleeps `delay`
    /// and moves on. The returned set is the union of the prior checkpoint
    /// and this run's discoveries.
    ///
    /// A single candidate's failure only classifies that candidate as
    /// not-yet-valid. A checkpoint persist failure aborts the scan.
    pub async fn scan(
        &mut self,
        low: u32,
        high: u32,
        batch_size: u32,
        delay: Duration,
    ) -> Result<BTreeSet<u32>> {
        let low = low.max(1);
        let batch_size = batch_size.max(1);

        let mut known = self.store.load()?;
        tracing::info!(
            "Scanning ids {}..={} in batches of {} ({} already checkpointed)",
            low,
            high,
            batch_size,
            known.len()
        );

        let mut batch_start = low;
        while batch_start <= high {
            let batch_end = high.min(batch_start.saturating_add(batch_size - 1));

            let mut batch_valid = BTreeSet::new();
            for id in batch_start..=batch_end {
                if known.contains(&id) {
                    continue;
                }

                let url = self.site.anime_url(id);
                if probe_url(&self.client, &url).await {
                    batch_valid.insert(id);
                }
            }

            tracing::info!(
                "Batch {}..={}: {} newly valid",
                batch_start,
                batch_end,
                batch_valid.len()
            );

            // Persist before sleeping; the scan must not continue as if
            // progress were saved.
            self.store.merge_and_persist(&batch_valid)?;
            known.extend(batch_valid);

            if batch_end == high {
                break;
            }
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            batch_start = batch_end + 1;
        }

        Ok(known)
    }
}
