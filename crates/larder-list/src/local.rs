use std::convert::Infallible;
use std::sync::RwLock;

use async_trait::async_trait;

use larder_types::{Fields, Meal, Record, RecordId};

use crate::store::ListStore;

/// In-memory list that preserves insertion order.
///
/// Intended for views without a backend. Records are held behind a `RwLock`
/// and cloned on read. Updating an unknown id is a silent no-op.
pub struct LocalListStore<F> {
    records: RwLock<Vec<Record<F>>>,
}

impl<F: Fields> LocalListStore<F> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Start from an existing list, e.g. sample entries shown on first run.
    pub fn with_records(records: Vec<Record<F>>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Append a new record built from `draft`.
    pub fn add(&self, draft: F::Draft) -> Record<F> {
        let record = Record::<F>::create(draft);
        tracing::debug!(namespace = F::NAMESPACE, id = %record.id, "added local record");
        self.records
            .write()
            .expect("lock poisoned")
            .push(record.clone());
        record
    }

    /// Merge `patch` into the record `id`. Returns `None` if it is absent.
    pub fn update(&self, id: &RecordId, patch: &F::Patch) -> Option<Record<F>> {
        let mut records = self.records.write().expect("lock poisoned");
        let record = records.iter_mut().find(|r| &r.id == id)?;
        record.apply(patch);
        Some(record.clone())
    }

    /// Remove the record `id`. Returns `true` if it existed.
    pub fn remove(&self, id: &RecordId) -> bool {
        let mut records = self.records.write().expect("lock poisoned");
        let before = records.len();
        records.retain(|r| &r.id != id);
        records.len() != before
    }

    pub fn get(&self, id: &RecordId) -> Option<Record<F>> {
        self.records
            .read()
            .expect("lock poisoned")
            .iter()
            .find(|r| &r.id == id)
            .cloned()
    }

    /// All records in insertion order.
    pub fn list(&self) -> Vec<Record<F>> {
        self.records.read().expect("lock poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LocalListStore<Meal> {
    /// Flip a meal between planned and eaten.
    pub fn toggle(&self, id: &RecordId) -> Option<Record<Meal>> {
        let patch = self.get(id)?.fields.toggled();
        self.update(id, &patch)
    }
}

impl<F: Fields> Default for LocalListStore<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Fields> std::fmt::Debug for LocalListStore<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalListStore")
            .field("namespace", &F::NAMESPACE)
            .field("len", &self.len())
            .finish()
    }
}

#[async_trait]
impl<F: Fields> ListStore<F> for LocalListStore<F> {
    type Error = Infallible;

    async fn list(&self) -> Result<Vec<Record<F>>, Infallible> {
        Ok(LocalListStore::list(self))
    }

    async fn add(&self, draft: F::Draft) -> Result<Record<F>, Infallible> {
        Ok(LocalListStore::add(self, draft))
    }

    async fn update(&self, id: &RecordId, patch: F::Patch) -> Result<Option<Record<F>>, Infallible> {
        Ok(LocalListStore::update(self, id, &patch))
    }

    async fn remove(&self, id: &RecordId) -> Result<(), Infallible> {
        LocalListStore::remove(self, id);
        Ok(())
    }
}
