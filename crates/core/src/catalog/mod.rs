//! Remote beatmap catalog access.
//!
//! The selector only needs two operations from a catalog: the most recently
//! published item (to learn the size of the key space) and an item by key.

mod beatsaver;
mod types;

pub use beatsaver::{BeatSaverClient, BeatSaverConfig};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when talking to a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// No item at this key (never published or deleted).
    #[error("Item not found: {0}")]
    NotFound(String),

    /// The catalog has no published items.
    #[error("Catalog returned no items")]
    EmptyCatalog,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Key is not valid base-16.
    #[error("Invalid catalog key: '{0}'")]
    InvalidKey(String),
}

impl CatalogError {
    /// Expected miss in a sparse key space.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }

    /// Label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogError::NotFound(_) => "not_found",
            CatalogError::RateLimitExceeded => "rate_limited",
            _ => "error",
        }
    }
}

/// A key-indexed remote catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch the most recently published item.
    async fn fetch_latest(&self) -> Result<Item, CatalogError>;

    /// Fetch the item published at `key`.
    async fn fetch_by_key(&self, key: &CatalogKey) -> Result<Item, CatalogError>;

    /// Backend name for logs.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind() {
        assert_eq!(CatalogError::NotFound("ab".into()).kind(), "not_found");
        assert_eq!(CatalogError::RateLimitExceeded.kind(), "rate_limited");
        assert_eq!(CatalogError::EmptyCatalog.kind(), "error");
        assert_eq!(
            CatalogError::ApiError {
                status: 500,
                message: "boom".into()
            }
            .kind(),
            "error"
        );
    }

    #[test]
    fn test_is_not_found() {
        assert!(CatalogError::NotFound("1".into()).is_not_found());
        assert!(!CatalogError::ParseError("bad".into()).is_not_found());
    }
}
