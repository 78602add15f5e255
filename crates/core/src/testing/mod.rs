//! Testing utilities and mock implementations.
//!
//! This module provides a mock catalog and fixtures so searches can be
//! exercised without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use randomsong_core::testing::{fixtures, MockCatalog};
//!
//! let catalog = MockCatalog::new();
//! catalog.set_latest(fixtures::item(0x1a3f)).await;
//! catalog.add_item(fixtures::item(0x570)).await;
//!
//! // Use in RandomSelector...
//! ```

mod mock_catalog;

pub use mock_catalog::{MockCatalog, RecordedCatalogQuery, ScriptedFetch};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::catalog::{CatalogKey, Difficulties, Item, Metadata, Stats};

    /// A well-rated three minute map at `key` that passes the default filter.
    pub fn item(key: u64) -> Item {
        let key = CatalogKey::new(key);
        Item {
            id: key.to_hex(),
            key,
            name: format!("Map {}", key),
            hash: Some(format!("{:040x}", key.value())),
            metadata: Metadata {
                song_name: format!("Song {}", key),
                song_sub_name: String::new(),
                song_author_name: "Test Artist".to_string(),
                level_author_name: "Test Mapper".to_string(),
                bpm: 128.0,
                duration: 180.0,
                difficulties: Difficulties {
                    easy: false,
                    normal: true,
                    hard: true,
                    expert: true,
                    expert_plus: true,
                },
            },
            stats: Stats {
                rating: 0.85,
                downloads: 2_500,
                plays: 400,
                up_votes: 120,
                down_votes: 8,
            },
        }
    }

    /// Like [`item`] but with custom tempo, duration and rating.
    pub fn item_with(key: u64, bpm: f64, duration: f64, rating: f64) -> Item {
        let mut item = item(key);
        item.metadata.bpm = bpm;
        item.metadata.duration = duration;
        item.stats.rating = rating;
        item
    }
}
