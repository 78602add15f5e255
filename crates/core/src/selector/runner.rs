//! Random selector implementation.
//!
//! One search runs strictly sequentially:
//! - Bound discovery: one `fetch_latest`, fatal on failure
//! - Attempt loop: draw a key, fetch it, filter it; one fetch per attempt
//!
//! Individual fetch failures are expected (the key space has holes) and only
//! consume their attempt.

use std::sync::Arc;
use std::time::Instant;

use tokio::time::timeout;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::{Catalog, CatalogKey, Item};
use crate::filter::{self, FilterCriteria};
use crate::library::Library;
use crate::metrics::{
    CANDIDATES_REJECTED, FETCH_FAILURES, SEARCHES_TOTAL, SEARCH_ATTEMPTS, SEARCH_DURATION,
};

use super::config::SelectorConfig;
use super::sampler::KeySampler;
use super::types::SearchOutcome;

/// Picks random catalog items that pass a filter.
pub struct RandomSelector {
    catalog: Arc<dyn Catalog>,
    library: Arc<dyn Library>,
    sampler: KeySampler,
    config: SelectorConfig,
}

impl RandomSelector {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        library: Arc<dyn Library>,
        config: SelectorConfig,
    ) -> Self {
        Self {
            catalog,
            library,
            sampler: KeySampler::new(),
            config,
        }
    }

    /// Replace the key sampler (e.g. with a seeded one).
    pub fn with_sampler(mut self, sampler: KeySampler) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Search with the configured attempt budget.
    pub async fn find_with_defaults(&self, criteria: Option<&FilterCriteria>) -> SearchOutcome {
        self.find_random_acceptable_item(criteria, self.config.max_retries)
            .await
    }

    /// Search for a random item that passes `criteria`, giving up after
    /// `max_retries` fetch-and-evaluate cycles.
    ///
    /// The first acceptable candidate wins. Dropping the returned future
    /// abandons the fetch in flight.
    pub async fn find_random_acceptable_item(
        &self,
        criteria: Option<&FilterCriteria>,
        max_retries: u32,
    ) -> SearchOutcome {
        let search_id = Uuid::new_v4();
        let started = Instant::now();

        info!(
            "[{}] Searching for random map on {} (max {} attempts, filter: {})",
            search_id,
            self.catalog.name(),
            max_retries,
            if criteria.is_some() { "on" } else { "off" }
        );

        // Maps installed since the last search must count as owned.
        if let Err(e) = self.library.refresh() {
            warn!(
                "[{}] Could not refresh local library, using last scan: {}",
                search_id, e
            );
        }

        let upper = match self
            .sampler
            .establish_upper_bound(self.catalog.as_ref(), self.config.fetch_timeout())
            .await
        {
            Ok(upper) => upper,
            Err(e) => {
                warn!("[{}] Search aborted: {}", search_id, e);
                let outcome = SearchOutcome::from(e);
                record_outcome(&outcome, started);
                return outcome;
            }
        };

        let mut attempts = 0;
        let mut misses = 0;
        let mut rejections = 0;

        while attempts < max_retries {
            attempts += 1;
            let key = self.sampler.draw_key(upper);
            debug!(
                "[{}] Attempt {}/{}: key {} (upper bound {})",
                search_id, attempts, max_retries, key, upper
            );

            let Some(item) = self.fetch_candidate(search_id, &key).await else {
                misses += 1;
                continue;
            };

            match filter::evaluate(&item, criteria, self.library.as_ref()) {
                Ok(()) => {
                    info!(
                        "[{}] Picked {} ({}) after {} attempt(s)",
                        search_id,
                        item.key,
                        item.display_title(),
                        attempts
                    );
                    let outcome = SearchOutcome::Accepted { attempts, item };
                    record_outcome(&outcome, started);
                    return outcome;
                }
                Err(rejection) => {
                    rejections += 1;
                    debug!("[{}] Rejected {}: {}", search_id, item.key, rejection);
                    CANDIDATES_REJECTED
                        .with_label_values(&[rejection.label()])
                        .inc();
                }
            }
        }

        info!(
            "[{}] No acceptable map found after {} attempt(s) ({} missing, {} rejected)",
            search_id, attempts, misses, rejections
        );
        let outcome = SearchOutcome::Exhausted { attempts };
        record_outcome(&outcome, started);
        outcome
    }

    /// Fetch one candidate. Every failure is absorbed and reported as `None`.
    async fn fetch_candidate(&self, search_id: Uuid, key: &CatalogKey) -> Option<Item> {
        match timeout(self.config.fetch_timeout(), self.catalog.fetch_by_key(key)).await {
            Ok(Ok(item)) => {
                info!(
                    "[{}] Found map {}: {}",
                    search_id,
                    key,
                    item.display_title()
                );
                Some(item)
            }
            Ok(Err(e)) if e.is_not_found() => {
                info!(
                    "[{}] Failed to fetch map with key '{}'. Map was most likely deleted.",
                    search_id, key
                );
                FETCH_FAILURES.with_label_values(&["not_found"]).inc();
                None
            }
            Ok(Err(e)) => {
                warn!(
                    "[{}] Unexpected error fetching map '{}': {}",
                    search_id, key, e
                );
                FETCH_FAILURES.with_label_values(&[e.kind()]).inc();
                None
            }
            Err(_) => {
                warn!(
                    "[{}] Fetching map '{}' timed out after {:?}",
                    search_id,
                    key,
                    self.config.fetch_timeout()
                );
                FETCH_FAILURES.with_label_values(&["timeout"]).inc();
                None
            }
        }
    }
}

fn record_outcome(outcome: &SearchOutcome, started: Instant) {
    let label = outcome.label();
    SEARCHES_TOTAL.with_label_values(&[label]).inc();
    SEARCH_ATTEMPTS
        .with_label_values(&[label])
        .observe(outcome.attempts() as f64);
    SEARCH_DURATION
        .with_label_values(&[label])
        .observe(started.elapsed().as_secs_f64());
}
