//! Mock catalog for testing.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::catalog::{Catalog, CatalogError, CatalogKey, Item};

/// A recorded catalog query for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCatalogQuery {
    FetchLatest,
    FetchByKey { key: CatalogKey },
}

/// One scripted answer to `fetch_by_key`, returned regardless of the key.
#[derive(Debug, Clone)]
pub enum ScriptedFetch {
    Item(Item),
    NotFound,
    RateLimited,
    /// Any other failure, reported as a 500 API error.
    Error(String),
}

/// Mock implementation of the Catalog trait.
///
/// Provides controllable behavior for testing:
/// - Newest item (or an empty catalog when unset)
/// - Items by key, or a script of answers consumed in order
/// - Artificial latency for timeout tests
/// - Track queries for assertions
///
/// # Example
///
/// ```rust,ignore
/// use randomsong_core::testing::{fixtures, MockCatalog, ScriptedFetch};
///
/// let catalog = MockCatalog::new();
/// catalog.set_latest(fixtures::item(0xffff)).await;
/// catalog.set_script(vec![ScriptedFetch::NotFound, ScriptedFetch::Item(fixtures::item(0x570))]).await;
/// ```
#[derive(Debug)]
pub struct MockCatalog {
    /// Newest item; `None` means the catalog is empty.
    latest: Arc<RwLock<Option<Item>>>,
    /// Items by key, used when the script is empty.
    items: Arc<RwLock<HashMap<CatalogKey, Item>>>,
    /// Scripted answers for `fetch_by_key`.
    script: Arc<RwLock<VecDeque<ScriptedFetch>>>,
    /// Recorded queries.
    queries: Arc<RwLock<Vec<RecordedCatalogQuery>>>,
    /// If set, the next `fetch_latest` fails with this error.
    latest_error: Arc<RwLock<Option<CatalogError>>>,
    latest_delay: Arc<RwLock<Duration>>,
    fetch_delay: Arc<RwLock<Duration>>,
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCatalog {
    /// Create a new empty mock catalog.
    pub fn new() -> Self {
        Self {
            latest: Arc::new(RwLock::new(None)),
            items: Arc::new(RwLock::new(HashMap::new())),
            script: Arc::new(RwLock::new(VecDeque::new())),
            queries: Arc::new(RwLock::new(Vec::new())),
            latest_error: Arc::new(RwLock::new(None)),
            latest_delay: Arc::new(RwLock::new(Duration::ZERO)),
            fetch_delay: Arc::new(RwLock::new(Duration::ZERO)),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Set the newest item.
    pub async fn set_latest(&self, item: Item) {
        *self.latest.write().await = Some(item);
    }

    /// Make the catalog empty again.
    pub async fn clear_latest(&self) {
        *self.latest.write().await = None;
    }

    /// Add an item reachable by its key.
    pub async fn add_item(&self, item: Item) {
        self.items.write().await.insert(item.key, item);
    }

    /// Replace the scripted answers.
    pub async fn set_script(&self, script: Vec<ScriptedFetch>) {
        *self.script.write().await = script.into();
    }

    /// Append one scripted answer.
    pub async fn push_script(&self, fetch: ScriptedFetch) {
        self.script.write().await.push_back(fetch);
    }

    /// Configure the next `fetch_latest` to fail with the given error.
    pub async fn set_latest_error(&self, error: CatalogError) {
        *self.latest_error.write().await = Some(error);
    }

    /// Delay every `fetch_latest`.
    pub async fn set_latest_delay(&self, delay: Duration) {
        *self.latest_delay.write().await = delay;
    }

    /// Delay every `fetch_by_key`.
    pub async fn set_fetch_delay(&self, delay: Duration) {
        *self.fetch_delay.write().await = delay;
    }

    // =========================================================================
    // Query Recording
    // =========================================================================

    /// Get all recorded queries.
    pub async fn recorded_queries(&self) -> Vec<RecordedCatalogQuery> {
        self.queries.read().await.clone()
    }

    /// Clear recorded queries.
    pub async fn clear_recorded(&self) {
        self.queries.write().await.clear();
    }

    /// Number of `fetch_latest` calls.
    pub async fn fetch_latest_count(&self) -> usize {
        self.queries
            .read()
            .await
            .iter()
            .filter(|q| matches!(q, RecordedCatalogQuery::FetchLatest))
            .count()
    }

    /// Number of `fetch_by_key` calls.
    pub async fn fetch_by_key_count(&self) -> usize {
        self.queries
            .read()
            .await
            .iter()
            .filter(|q| matches!(q, RecordedCatalogQuery::FetchByKey { .. }))
            .count()
    }

    /// Record a query.
    async fn record(&self, query: RecordedCatalogQuery) {
        self.queries.write().await.push(query);
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn fetch_latest(&self) -> Result<Item, CatalogError> {
        self.record(RecordedCatalogQuery::FetchLatest).await;

        let delay = *self.latest_delay.read().await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.latest_error.write().await.take() {
            return Err(err);
        }

        self.latest
            .read()
            .await
            .clone()
            .ok_or(CatalogError::EmptyCatalog)
    }

    async fn fetch_by_key(&self, key: &CatalogKey) -> Result<Item, CatalogError> {
        self.record(RecordedCatalogQuery::FetchByKey { key: *key })
            .await;

        let delay = *self.fetch_delay.read().await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if let Some(scripted) = self.script.write().await.pop_front() {
            return match scripted {
                ScriptedFetch::Item(item) => Ok(item),
                ScriptedFetch::NotFound => Err(CatalogError::NotFound(key.to_hex())),
                ScriptedFetch::RateLimited => Err(CatalogError::RateLimitExceeded),
                ScriptedFetch::Error(message) => Err(CatalogError::ApiError {
                    status: 500,
                    message,
                }),
            };
        }

        self.items
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(key.to_hex()))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_empty_catalog() {
        let catalog = MockCatalog::new();
        assert!(matches!(
            catalog.fetch_latest().await,
            Err(CatalogError::EmptyCatalog)
        ));
    }

    #[tokio::test]
    async fn test_script_consumed_in_order_then_items() {
        let catalog = MockCatalog::new();
        catalog.add_item(fixtures::item(0x5)).await;
        catalog
            .set_script(vec![
                ScriptedFetch::NotFound,
                ScriptedFetch::Item(fixtures::item(0x9)),
            ])
            .await;

        let key = CatalogKey::new(0x5);
        assert!(catalog.fetch_by_key(&key).await.unwrap_err().is_not_found());
        assert_eq!(catalog.fetch_by_key(&key).await.unwrap().key.value(), 0x9);
        assert_eq!(catalog.fetch_by_key(&key).await.unwrap().key.value(), 0x5);
        assert_eq!(catalog.fetch_by_key_count().await, 3);
    }

    #[tokio::test]
    async fn test_latest_error_is_one_shot() {
        let catalog = MockCatalog::new();
        catalog.set_latest(fixtures::item(0x10)).await;
        catalog.set_latest_error(CatalogError::RateLimitExceeded).await;

        assert!(catalog.fetch_latest().await.is_err());
        assert!(catalog.fetch_latest().await.is_ok());
        assert_eq!(
            catalog.recorded_queries().await,
            vec![
                RecordedCatalogQuery::FetchLatest,
                RecordedCatalogQuery::FetchLatest
            ]
        );
    }
}
