use async_trait::async_trait;

use larder_types::{Fields, Record, RecordId};

/// CRUD contract over an ordered collection of [`Record`]s.
///
/// A record is only returned by `list` after the `add` that created it has
/// completed. `update` merges a partial patch; it never creates a record.
/// `remove` is idempotent.
#[async_trait]
pub trait ListStore<F: Fields>: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// All records. Order is defined by the implementation.
    async fn list(&self) -> Result<Vec<Record<F>>, Self::Error>;

    /// Create a record from `draft` and return it as stored.
    async fn add(&self, draft: F::Draft) -> Result<Record<F>, Self::Error>;

    /// Merge `patch` into the record `id`.
    ///
    /// Stores that treat an unknown id as a no-op return `Ok(None)`; stores
    /// that report it return an error instead.
    async fn update(&self, id: &RecordId, patch: F::Patch) -> Result<Option<Record<F>>, Self::Error>;

    /// Delete the record `id` if present.
    async fn remove(&self, id: &RecordId) -> Result<(), Self::Error>;
}
