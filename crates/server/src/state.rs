use std::sync::Arc;

use randomsong_core::{Config, RandomSelector};
use tokio::sync::{Mutex, MutexGuard};

/// Shared application state
pub struct AppState {
    config: Config,
    selector: Arc<RandomSelector>,
    /// Held for the duration of a search; at most one runs at a time.
    search_gate: Mutex<()>,
}

impl AppState {
    pub fn new(config: Config, selector: Arc<RandomSelector>) -> Self {
        Self {
            config,
            selector,
            search_gate: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn selector(&self) -> &RandomSelector {
        self.selector.as_ref()
    }

    /// Claim the search slot, or `None` if a search is already running.
    pub fn try_begin_search(&self) -> Option<MutexGuard<'_, ()>> {
        self.search_gate.try_lock().ok()
    }

    pub fn search_in_progress(&self) -> bool {
        self.search_gate.try_lock().is_err()
    }
}
