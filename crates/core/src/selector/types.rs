//! Selector types.

use serde::Serialize;
use thiserror::Error;

use crate::catalog::Item;

/// Errors that end a search before any candidate is drawn.
#[derive(Debug, Error)]
pub enum SelectorError {
    /// The newest item could not be fetched, so the key space is unknown.
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),
}

/// Result of one random search.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// A candidate passed the filter.
    Accepted { attempts: u32, item: Item },
    /// The attempt budget ran out without an acceptable candidate.
    Exhausted { attempts: u32 },
    /// Bound discovery failed.
    Unreachable { reason: String },
}

impl SearchOutcome {
    pub fn item(&self) -> Option<&Item> {
        match self {
            SearchOutcome::Accepted { item, .. } => Some(item),
            _ => None,
        }
    }

    pub fn into_item(self) -> Option<Item> {
        match self {
            SearchOutcome::Accepted { item, .. } => Some(item),
            _ => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, SearchOutcome::Accepted { .. })
    }

    /// Fetch-and-evaluate cycles spent.
    pub fn attempts(&self) -> u32 {
        match self {
            SearchOutcome::Accepted { attempts, .. } | SearchOutcome::Exhausted { attempts } => {
                *attempts
            }
            SearchOutcome::Unreachable { .. } => 0,
        }
    }

    /// Label used for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            SearchOutcome::Accepted { .. } => "accepted",
            SearchOutcome::Exhausted { .. } => "exhausted",
            SearchOutcome::Unreachable { .. } => "unreachable",
        }
    }
}

impl From<SelectorError> for SearchOutcome {
    fn from(err: SelectorError) -> Self {
        SearchOutcome::Unreachable {
            reason: err.to_string(),
        }
    }
}
