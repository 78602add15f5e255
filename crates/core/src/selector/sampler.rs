//! Key space sampling.
//!
//! Catalog keys are handed out densely and in publishing order, so a uniform
//! draw over `[0, newest]` approximates a uniform draw over published items.
//! Gaps (deleted or never published keys) simply show up as fetch misses.

use std::sync::Mutex;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::timeout;
use tracing::debug;

use crate::catalog::{Catalog, CatalogKey};

use super::types::SelectorError;

/// Draws random candidate keys from a catalog's key space.
pub struct KeySampler {
    rng: Mutex<StdRng>,
}

impl Default for KeySampler {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySampler {
    /// Sampler seeded from the OS.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Deterministic sampler for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Learn the current top of the key space from the newest item.
    ///
    /// Must be called once per search; the catalog grows between searches.
    pub async fn establish_upper_bound(
        &self,
        catalog: &dyn Catalog,
        fetch_timeout: Duration,
    ) -> Result<CatalogKey, SelectorError> {
        let latest = timeout(fetch_timeout, catalog.fetch_latest())
            .await
            .map_err(|_| {
                SelectorError::CatalogUnavailable(format!(
                    "latest item request to {} timed out after {:?}",
                    catalog.name(),
                    fetch_timeout
                ))
            })?
            .map_err(|e| SelectorError::CatalogUnavailable(e.to_string()))?;

        debug!(
            "Newest {} item is {} ({} possible keys)",
            catalog.name(),
            latest.key,
            latest.key.value().saturating_add(1)
        );

        Ok(latest.key)
    }

    /// Draw a key uniformly from `[0, upper]`.
    ///
    /// Draws are independent; the same key can come up twice in one search.
    pub fn draw_key(&self, upper: CatalogKey) -> CatalogKey {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        CatalogKey::new(rng.random_range(0..=upper.value()))
    }
}
