//! # In-Memory Storage
//!
//! `HashMap`-backed [`KeyValueStore`]. Used by tests and by sessions that
//! should leave nothing on disk.

use std::collections::HashMap;

use crate::error::StorageResult;
use crate::port::KeyValueStore;

/// Volatile key-value store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Creates a store pre-filled with `entries`, e.g. to simulate what a
    /// previous session left behind.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        MemoryStore {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Raw value under `key`, without going through the trait.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
