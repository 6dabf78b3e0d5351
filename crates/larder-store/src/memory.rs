use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;

use crate::error::{StoreError, StoreResult};
use crate::traits::{KvEntry, KvStore};

/// In-memory, `BTreeMap`-based key-value table.
///
/// Intended for tests and embedding. Entries are held behind a `RwLock` and
/// cloned on read. Data is lost when the table is dropped.
pub struct InMemoryKvStore {
    entries: RwLock<BTreeMap<String, Value>>,
}

impl InMemoryKvStore {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Returns `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, BTreeMap<String, Value>>> {
        self.entries
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, BTreeMap<String, Value>>> {
        self.entries
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }
}

impl Default for InMemoryKvStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Entries of `map` under `prefix`, in key order.
pub(crate) fn scan_prefix(map: &BTreeMap<String, Value>, prefix: &str) -> Vec<KvEntry> {
    map.range(prefix.to_string()..)
        .take_while(|(k, _)| k.starts_with(prefix))
        .map(|(k, v)| KvEntry {
            key: k.clone(),
            value: v.clone(),
        })
        .collect()
}

impl KvStore for InMemoryKvStore {
    fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.read()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> StoreResult<()> {
        self.write()?.insert(key.to_string(), value);
        Ok(())
    }

    fn del(&self, key: &str) -> StoreResult<()> {
        self.write()?.remove(key);
        Ok(())
    }

    fn get_by_prefix(&self, prefix: &str) -> StoreResult<Vec<KvEntry>> {
        Ok(scan_prefix(&*self.read()?, prefix))
    }
}

impl std::fmt::Debug for InMemoryKvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryKvStore")
            .field("key_count", &self.len())
            .finish()
    }
}
