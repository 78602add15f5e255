//! Custom levels folder backed library.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{debug, info, warn};

use super::{Library, LibraryError};

/// Treats every subfolder of a custom levels directory as an owned item.
///
/// Downloaded maps live in folders named `<id>` or `<id> (<song> - <mapper>)`;
/// the leading id is what counts.
#[derive(Debug)]
pub struct DirectoryLibrary {
    root: PathBuf,
    ids: RwLock<HashSet<String>>,
}

impl DirectoryLibrary {
    /// Scan `root` and build the library.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, LibraryError> {
        let root = root.into();
        let ids = scan(&root)?;
        info!("Loaded {} owned maps from {:?}", ids.len(), root);

        Ok(Self {
            root,
            ids: RwLock::new(ids),
        })
    }

    /// Rescan the directory, picking up maps installed since the last scan.
    pub fn reload(&self) -> Result<usize, LibraryError> {
        let ids = scan(&self.root)?;
        let count = ids.len();
        *self
            .ids
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = ids;
        debug!("Reloaded library {:?}: {} maps", self.root, count);
        Ok(count)
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

impl Library for DirectoryLibrary {
    fn is_owned(&self, item_id: &str) -> bool {
        self.ids
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(&item_id.to_lowercase())
    }

    fn refresh(&self) -> Result<(), LibraryError> {
        self.reload().map(|_| ())
    }
}

fn scan(root: &Path) -> Result<HashSet<String>, LibraryError> {
    if !root.is_dir() {
        return Err(LibraryError::NotFound(root.display().to_string()));
    }

    let mut ids = HashSet::new();
    for entry in fs::read_dir(root)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable library entry in {:?}: {}", root, e);
                continue;
            }
        };

        if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }

        if let Some(id) = folder_id(&entry.file_name().to_string_lossy()) {
            ids.insert(id);
        }
    }

    Ok(ids)
}

/// Extract the id from a folder name: everything before the first space.
fn folder_id(name: &str) -> Option<String> {
    let id = name.split_whitespace().next()?;
    Some(id.to_lowercase())
}
