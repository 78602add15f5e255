//! Local library membership checks.
//!
//! A library answers one question: is this item already installed locally?
//! The answer is synchronous and infallible; backends that can fail while
//! loading report it at construction time.

mod directory;

pub use directory::DirectoryLibrary;

use std::collections::HashSet;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Library directory not found: {0}")]
    NotFound(String),

    #[error("Failed to read library directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Local-library membership check.
pub trait Library: Send + Sync {
    /// Whether the item with this id is already owned.
    fn is_owned(&self, item_id: &str) -> bool;

    /// Pick up changes made since the library was loaded.
    ///
    /// Called once at the start of every search. Libraries held entirely in
    /// memory have nothing to do.
    fn refresh(&self) -> Result<(), LibraryError> {
        Ok(())
    }
}

/// Library configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Custom levels directory. Without one nothing counts as owned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<std::path::PathBuf>,
}

/// A library that owns nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLibrary;

impl Library for NoLibrary {
    fn is_owned(&self, _item_id: &str) -> bool {
        false
    }
}

/// An in-memory set of owned ids. Ids compare case-insensitively.
#[derive(Debug, Default)]
pub struct MemoryLibrary {
    ids: RwLock<HashSet<String>>,
}

impl MemoryLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let library = Self::new();
        for id in ids {
            library.insert(id.as_ref());
        }
        library
    }

    /// Mark an item as owned.
    pub fn insert(&self, item_id: &str) {
        self.ids
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(item_id.to_lowercase());
    }

    /// Forget an item.
    pub fn remove(&self, item_id: &str) -> bool {
        self.ids
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&item_id.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.ids
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Library for MemoryLibrary {
    fn is_owned(&self, item_id: &str) -> bool {
        self.ids
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(&item_id.to_lowercase())
    }
}
