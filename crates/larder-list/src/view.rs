use std::marker::PhantomData;

use larder_types::{
    Deal, DealSummary, Fields, Leftover, LeftoverSummary, Meal, MealSummary, Record, RecordId,
};

use crate::store::ListStore;

/// View-side state holder: the records a view renders plus the store it
/// writes through.
///
/// Mutations go to the store first and only touch the cached list once
/// acknowledged, except `update`, which applies the patch to the cached
/// record immediately so sliders and toggles feel instant. If the store then
/// rejects the update, the cache is reloaded from the store.
pub struct ListView<F, S> {
    store: S,
    items: Vec<Record<F>>,
    _fields: PhantomData<fn() -> F>,
}

impl<F: Fields, S: ListStore<F>> ListView<F, S> {
    /// Wrap `store` with an empty cache. Call [`refresh`](Self::refresh) to
    /// load.
    pub fn new(store: S) -> Self {
        Self {
            store,
            items: Vec::new(),
            _fields: PhantomData,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn items(&self) -> &[Record<F>] {
        &self.items
    }

    pub fn get(&self, id: &RecordId) -> Option<&Record<F>> {
        self.items.iter().find(|r| &r.id == id)
    }

    /// Replace the cache with the store's current list.
    pub async fn refresh(&mut self) -> Result<&[Record<F>], S::Error> {
        self.items = self.store.list().await?;
        tracing::debug!(namespace = F::NAMESPACE, count = self.items.len(), "refreshed list");
        Ok(&self.items)
    }

    pub async fn add(&mut self, draft: F::Draft) -> Result<Record<F>, S::Error> {
        let record = self.store.add(draft).await?;
        self.items.push(record.clone());
        Ok(record)
    }

    /// Optimistically apply `patch`, then confirm with the store.
    ///
    /// On success the cached record is replaced by the store's copy. If the
    /// store reports the id as absent, the stale cached copy is dropped. On
    /// error the cache is reloaded and the original error returned.
    pub async fn update(&mut self, id: &RecordId, patch: F::Patch) -> Result<Option<Record<F>>, S::Error> {
        if let Some(cached) = self.items.iter_mut().find(|r| &r.id == id) {
            cached.apply(&patch);
        }

        match self.store.update(id, patch).await {
            Ok(Some(record)) => {
                if let Some(cached) = self.items.iter_mut().find(|r| r.id == record.id) {
                    *cached = record.clone();
                }
                Ok(Some(record))
            }
            Ok(None) => {
                self.items.retain(|r| &r.id != id);
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(namespace = F::NAMESPACE, %id, error = %e, "update failed, reloading");
                if let Err(reload) = self.refresh().await {
                    tracing::warn!(namespace = F::NAMESPACE, error = %reload, "reload after failed update failed");
                }
                Err(e)
            }
        }
    }

    pub async fn remove(&mut self, id: &RecordId) -> Result<(), S::Error> {
        self.store.remove(id).await?;
        self.items.retain(|r| &r.id != id);
        Ok(())
    }
}

impl<S> ListView<Leftover, S> {
    pub fn summary(&self) -> LeftoverSummary {
        LeftoverSummary::of(&self.items)
    }
}

impl<S> ListView<Meal, S> {
    pub fn summary(&self) -> MealSummary {
        MealSummary::of(&self.items)
    }
}

impl<S> ListView<Deal, S> {
    pub fn summary(&self) -> DealSummary {
        DealSummary::of(&self.items)
    }
}
