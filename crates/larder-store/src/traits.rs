use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreResult;

/// One row returned by a prefix scan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KvEntry {
    pub key: String,
    pub value: Value,
}

/// String-keyed table of JSON documents.
///
/// Implementations must be thread-safe and keep each single-key operation
/// atomic. Nothing is guaranteed across keys.
pub trait KvStore: Send + Sync {
    /// Read the value stored at `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn get(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Create or overwrite the value at `key`.
    fn set(&self, key: &str, value: Value) -> StoreResult<()>;

    /// Delete `key`. Deleting an absent key is not an error.
    fn del(&self, key: &str) -> StoreResult<()>;

    /// All entries whose key starts with `prefix`, in ascending key order.
    fn get_by_prefix(&self, prefix: &str) -> StoreResult<Vec<KvEntry>>;
}
