//! Key-Value Persistence Backing
//!
//! Collections persist as whole JSON documents under logical keys. Each key
//! is read once at startup and rewritten in full on every mutation of its
//! owning collection; there is no incremental persistence.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::StorageError;

/// Logical keys for every persisted collection.
pub mod keys {
    pub const ITEMS: &str = "items";
    pub const SHOPS: &str = "shops";
    pub const CITIES: &str = "cities";
    pub const NPCS: &str = "npcs";
    pub const SHOP_TYPES: &str = "shop-types";
    pub const ITEM_TYPES: &str = "item-types";
    pub const SYSTEMS: &str = "systems";
    pub const RARITIES: &str = "rarities";
    pub const SETTINGS: &str = "settings";
}

/// A local, process-scoped, best-effort durable key-value store.
/// Values are whole serialized documents.
pub trait StorageBackend {
    /// Read the document stored under `key`, if any.
    fn read(&self, key: &str) -> Option<String>;

    /// Replace the document stored under `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Directory-backed store: one `<key>.json` document per logical key.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for FileStore {
    fn read(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read {:?}: {}", path, e);
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
