//! # File Storage
//!
//! [`KeyValueStore`] backed by a single JSON object on disk:
//!
//! ```json
//! { "theme": "dark", "cart": "[{\"id\":1, ...}]" }
//! ```
//!
//! Every call reads the file, so two processes sharing a data directory see
//! each other's last write. Writes go to a sibling temp file first and are
//! renamed into place, so a crash never leaves half a file behind.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{StorageError, StorageResult};
use crate::port::KeyValueStore;

/// File name used inside a data directory.
pub const STATE_FILE_NAME: &str = "state.json";

type Entries = BTreeMap<String, String>;

/// JSON-file key-value store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Uses `path` as the backing file. Nothing is touched until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    /// Uses `state.json` inside `dir`, creating the directory if needed.
    pub fn in_dir(dir: impl AsRef<Path>) -> StorageResult<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;
        Ok(FileStore::new(dir.join(STATE_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all entries. A missing file is an empty store.
    fn read_entries(&self) -> StorageResult<Entries> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };

        if raw.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_entries(&self, entries: &Entries) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
            }
        }

        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| StorageError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StorageError::io(&self.path, e))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let mut entries = self.read_entries()?;
        Ok(entries.remove(key))
    }

    /// Read-modify-write of the whole file.
    ///
    /// A corrupt file is replaced rather than left blocking every future
    /// write; the other keys it held are lost.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(err @ StorageError::Corrupt { .. }) => {
                warn!(error = %err, "Discarding unreadable storage file");
                Entries::new()
            }
            Err(err) => return Err(err),
        };

        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)?;
        debug!(key, path = %self.path.display(), "Persisted key");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nothing-here.json"));
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn test_set_then_get_across_handles() {
        let dir = TempDir::new().unwrap();
        let mut writer = FileStore::in_dir(dir.path()).unwrap();
        writer.set("theme", "dark").unwrap();
        writer.set("cart", "[]").unwrap();

        let reader = FileStore::in_dir(dir.path()).unwrap();
        assert_eq!(reader.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(reader.get("cart").unwrap().as_deref(), Some("[]"));
        assert!(!dir.path().join("state.json.tmp").exists());
    }

    #[test]
    fn test_in_dir_creates_nested_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let mut store = FileStore::in_dir(&nested).unwrap();
        store.set("theme", "light").unwrap();
        assert!(nested.join(STATE_FILE_NAME).exists());
    }

    #[test]
    fn test_corrupt_file_errors_on_get_and_is_replaced_on_set() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(STATE_FILE_NAME);
        fs::write(&path, "{ this is not json").unwrap();

        let mut store = FileStore::new(&path);
        assert!(matches!(
            store.get("theme"),
            Err(StorageError::Corrupt { .. })
        ));

        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_empty_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(STATE_FILE_NAME);
        fs::write(&path, "\n").unwrap();
        assert_eq!(FileStore::new(&path).get("cart").unwrap(), None);
    }
}
