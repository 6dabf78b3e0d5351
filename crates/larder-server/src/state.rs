use std::sync::Arc;

use larder_store::{KvStore, RecordTable, StoreResult};
use larder_types::Leftover;

use crate::error::{ServerError, ServerResult};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub leftovers: RecordTable<Leftover>,
    /// Digest of the configured API key. Bearer tokens are compared by
    /// digest, and `blake3::Hash` equality is constant-time.
    pub api_key: Option<blake3::Hash>,
}

impl AppState {
    pub fn new(kv: Arc<dyn KvStore>, api_key: Option<String>) -> Self {
        Self {
            leftovers: RecordTable::new(kv),
            api_key: api_key.map(|key| blake3::hash(key.as_bytes())),
        }
    }

    /// Run a table operation off the async runtime; file-backed tables do
    /// blocking I/O.
    pub async fn with_leftovers<T, F>(&self, op: F) -> ServerResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&RecordTable<Leftover>) -> StoreResult<T> + Send + 'static,
    {
        let table = self.leftovers.clone();
        tokio::task::spawn_blocking(move || op(&table))
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?
            .map_err(ServerError::from)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("auth", &self.api_key.is_some())
            .finish()
    }
}
