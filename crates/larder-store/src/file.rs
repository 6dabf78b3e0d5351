//! Key-value table persisted to a single JSON file.
//!
//! The whole table is kept in memory and rewritten on every mutation: the
//! new contents go to a temporary file in the same directory which is then
//! renamed over the old one, so a crash never leaves a half-written table.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde_json::Value;
use tempfile::NamedTempFile;

use crate::error::{StoreError, StoreResult};
use crate::memory::scan_prefix;
use crate::traits::{KvEntry, KvStore};

pub struct JsonFileKvStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, Value>>,
}

impl JsonFileKvStore {
    /// Open the table at `path`, creating an empty one if the file is absent.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let raw = fs::read(&path)?;
            if raw.iter().all(u8::is_ascii_whitespace) {
                BTreeMap::new()
            } else {
                serde_json::from_slice(&raw).map_err(|e| StoreError::Corrupt {
                    key: path.display().to_string(),
                    reason: e.to_string(),
                })?
            }
        } else {
            BTreeMap::new()
        };
        tracing::debug!(path = %path.display(), keys = entries.len(), "opened JSON table");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, Value>) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;
        let mut tmp = NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut tmp, entries)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut BTreeMap<String, Value>) -> R) -> StoreResult<R> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        let mut next = entries.clone();
        let out = f(&mut next);
        self.persist(&next)?;
        *entries = next;
        Ok(out)
    }
}

impl KvStore for JsonFileKvStore {
    fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> StoreResult<()> {
        self.mutate(|m| {
            m.insert(key.to_string(), value);
        })
    }

    fn del(&self, key: &str) -> StoreResult<()> {
        let present = self
            .entries
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?
            .contains_key(key);
        if !present {
            return Ok(());
        }
        self.mutate(|m| {
            m.remove(key);
        })
    }

    fn get_by_prefix(&self, prefix: &str) -> StoreResult<Vec<KvEntry>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(scan_prefix(&entries, prefix))
    }
}

impl std::fmt::Debug for JsonFileKvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileKvStore")
            .field("path", &self.path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let kv = JsonFileKvStore::open(dir.path().join("table.json")).unwrap();
        assert!(kv.get_by_prefix("").unwrap().is_empty());
    }

    #[test]
    fn writes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        {
            let kv = JsonFileKvStore::open(&path).unwrap();
            kv.set("leftover:1", json!({"name": "Milk"})).unwrap();
            kv.set("leftover:2", json!({"name": "Rice"})).unwrap();
            kv.del("leftover:2").unwrap();
        }
        let kv = JsonFileKvStore::open(&path).unwrap();
        assert_eq!(kv.get("leftover:1").unwrap(), Some(json!({"name": "Milk"})));
        assert!(kv.get("leftover:2").unwrap().is_none());
    }

    #[test]
    fn del_of_absent_key_does_not_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        let kv = JsonFileKvStore::open(&path).unwrap();
        kv.del("nothing").unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("table.json");
        let kv = JsonFileKvStore::open(&path).unwrap();
        kv.set("k", json!(1)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        fs::write(&path, b"{not json").unwrap();
        let err = JsonFileKvStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn blank_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        fs::write(&path, b"  \n").unwrap();
        let kv = JsonFileKvStore::open(&path).unwrap();
        assert!(kv.get_by_prefix("").unwrap().is_empty());
    }
}
