//! Local key/value storage
//!
//! String keys to string values, the same contract as browser local storage.
//! Values are JSON documents written by the helpers below. `FileStore`
//! persists the whole map to `local_storage.json` on every write;
//! `MemoryStore` keeps it in memory and can be told to refuse writes.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{AdvisorError, AdvisorResult};

use super::file_io::{read_json_or_set_aside, write_json_atomic};

/// get/set/remove by string key
pub trait KeyValueStore {
    fn get(&self, key: &str) -> AdvisorResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AdvisorResult<()>;
    fn remove(&self, key: &str) -> AdvisorResult<()>;
}

/// Read and decode a JSON value stored under `key`
pub fn get_json<T, S>(store: &S, key: &str) -> AdvisorResult<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode `value` as JSON and store it under `key`
pub fn set_json<T, S>(store: &S, key: &str, value: &T) -> AdvisorResult<()>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

fn lock_error(e: impl std::fmt::Display) -> AdvisorError {
    AdvisorError::Storage(format!("Failed to acquire lock: {}", e))
}

/// Key/value store persisted as a single JSON object on disk
pub struct FileStore {
    path: PathBuf,
    data: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load the map from disk, replacing anything held in memory
    ///
    /// An unparseable file is set aside and the store starts empty.
    pub fn load(&self) -> AdvisorResult<()> {
        let file_data: BTreeMap<String, String> = read_json_or_set_aside(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;
        *data = file_data;
        Ok(())
    }

    fn save(&self, data: &BTreeMap<String, String>) -> AdvisorResult<()> {
        write_json_atomic(&self.path, data)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> AdvisorResult<Option<String>> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(key).cloned())
    }

    // The in-memory map only changes once the file write has succeeded.
    fn set(&self, key: &str, value: &str) -> AdvisorResult<()> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut updated = data.clone();
        updated.insert(key.to_string(), value.to_string());
        self.save(&updated)?;
        *data = updated;
        Ok(())
    }

    fn remove(&self, key: &str) -> AdvisorResult<()> {
        let mut data = self.data.write().map_err(lock_error)?;
        if !data.contains_key(key) {
            return Ok(());
        }
        let mut updated = data.clone();
        updated.remove(key);
        self.save(&updated)?;
        *data = updated;
        Ok(())
    }
}

/// In-memory key/value store
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<BTreeMap<String, String>>,
    reject_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes all fail, as a full browser quota would
    pub fn rejecting_writes() -> Self {
        Self {
            data: RwLock::new(BTreeMap::new()),
            reject_writes: true,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data
            .read()
            .map(|data| data.contains_key(key))
            .unwrap_or(false)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AdvisorResult<Option<String>> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AdvisorResult<()> {
        if self.reject_writes {
            return Err(AdvisorError::Storage("Storage quota exceeded".into()));
        }
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AdvisorResult<()> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        section: usize,
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("local_storage.json");

        let store = FileStore::new(path.clone());
        store.load().unwrap();
        store.set("careHomeQuestionnaire", "{\"a\":1}").unwrap();

        let reopened = FileStore::new(path);
        reopened.load().unwrap();
        assert_eq!(
            reopened.get("careHomeQuestionnaire").unwrap().as_deref(),
            Some("{\"a\":1}")
        );

        reopened.remove("careHomeQuestionnaire").unwrap();
        assert!(reopened.get("careHomeQuestionnaire").unwrap().is_none());

        let again = FileStore::new(temp_dir.path().join("local_storage.json"));
        again.load().unwrap();
        assert!(again.get("careHomeQuestionnaire").unwrap().is_none());
    }

    #[test]
    fn test_unreadable_file_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("local_storage.json");
        std::fs::write(&path, "{ truncated").unwrap();

        let store = FileStore::new(path.clone());
        store.load().unwrap();
        assert!(store.get("careHomeQuestionnaire").unwrap().is_none());

        store.set("careHomeQuestionnaire", "{}").unwrap();
        let reopened = FileStore::new(path);
        reopened.load().unwrap();
        assert_eq!(
            reopened.get("careHomeQuestionnaire").unwrap().as_deref(),
            Some("{}")
        );
    }

    #[test]
    fn test_failed_write_leaves_map_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where the parent directory should be
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let store = FileStore::new(blocker.join("local_storage.json"));
        store.load().unwrap();
        assert!(store.set("k", "v").is_err());
        assert!(store.get("k").unwrap().is_none());
    }

    #[test]
    fn test_failed_remove_keeps_value() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("data");
        let store = FileStore::new(dir.join("local_storage.json"));
        store.set("k", "v").unwrap();

        // Replace the data directory with a file so the next write fails
        std::fs::remove_dir_all(&dir).unwrap();
        std::fs::write(&dir, "").unwrap();

        assert!(store.remove("k").is_err());
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_json_helpers() {
        let store = MemoryStore::new();
        set_json(&store, "entry", &Entry { section: 4 }).unwrap();

        let entry: Option<Entry> = get_json(&store, "entry").unwrap();
        assert_eq!(entry, Some(Entry { section: 4 }));

        let missing: Option<Entry> = get_json(&store, "other").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_corrupt_value_is_an_error() {
        let store = MemoryStore::new();
        store.set("entry", "{not json").unwrap();
        assert!(get_json::<Entry, _>(&store, "entry").is_err());
    }

    #[test]
    fn test_rejecting_store() {
        let store = MemoryStore::rejecting_writes();
        assert!(store.set("k", "v").is_err());
        assert!(!store.contains("k"));
    }
}
