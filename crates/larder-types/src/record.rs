use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::id::RecordId;

/// A view-specific field set stored inside a [`Record`].
///
/// `Draft` is what a caller supplies on create; `Patch` is a partial update
/// in which every `None` leaves the corresponding field untouched.
pub trait Fields: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Key-value namespace; records live under `"<NAMESPACE>:<id>"`.
    const NAMESPACE: &'static str;

    type Draft: Clone + Serialize + DeserializeOwned + Send + Sync + 'static;
    type Patch: Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Build a field set from a draft, filling defaults.
    fn from_draft(draft: Self::Draft) -> Self;

    /// Overwrite only the fields present in `patch`.
    fn merge(&mut self, patch: &Self::Patch);
}

/// A uniquely identified entry in a list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record<F> {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: F,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<F: Fields> Record<F> {
    /// Create a record with a freshly generated id, stamped now.
    pub fn create(draft: F::Draft) -> Self {
        Self::create_at(RecordId::generate(), draft, Utc::now())
    }

    /// Create a record with explicit id and creation time.
    /// Both timestamps are set to `at`.
    pub fn create_at(id: RecordId, draft: F::Draft, at: DateTime<Utc>) -> Self {
        Self {
            id,
            fields: F::from_draft(draft),
            created_at: at,
            updated_at: at,
        }
    }

    /// Merge `patch` and refresh `updated_at`.
    pub fn apply(&mut self, patch: &F::Patch) {
        self.apply_at(patch, Utc::now());
    }

    /// Merge `patch` and stamp `updated_at` with `at`.
    ///
    /// `updated_at` never moves backwards and never precedes `created_at`,
    /// even if the wall clock does.
    pub fn apply_at(&mut self, patch: &F::Patch, at: DateTime<Utc>) {
        self.fields.merge(patch);
        self.updated_at = at.max(self.updated_at).max(self.created_at);
    }

    /// The key this record is stored under in a key-value table.
    pub fn storage_key(&self) -> String {
        Self::key_for(&self.id)
    }

    pub fn key_for(id: &RecordId) -> String {
        format!("{}{}", Self::key_prefix(), id)
    }

    /// `"<NAMESPACE>:"`
    pub fn key_prefix() -> String {
        format!("{}:", F::NAMESPACE)
    }
}
