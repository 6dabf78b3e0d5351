use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;

use larder_types::{Fields, Record, RecordId};

use crate::error::{StoreError, StoreResult};
use crate::traits::KvStore;

/// Typed view of one namespace of a [`KvStore`].
///
/// Each record is stored as a JSON document at `"<namespace>:<id>"`. On scan
/// the id is recovered from the key, so the key is the source of truth for
/// identity even if the stored document carries a different `id`.
pub struct RecordTable<F> {
    kv: Arc<dyn KvStore>,
    _fields: PhantomData<fn() -> F>,
}

impl<F> Clone for RecordTable<F> {
    fn clone(&self) -> Self {
        Self {
            kv: Arc::clone(&self.kv),
            _fields: PhantomData,
        }
    }
}

impl<F: Fields> RecordTable<F> {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self {
            kv,
            _fields: PhantomData,
        }
    }

    pub fn prefix(&self) -> String {
        Record::<F>::key_prefix()
    }

    /// All records in the namespace, in the table's enumeration order.
    pub fn scan(&self) -> StoreResult<Vec<Record<F>>> {
        let prefix = self.prefix();
        self.kv
            .get_by_prefix(&prefix)?
            .into_iter()
            .map(|entry| {
                let id = entry.key[prefix.len()..].to_string();
                decode(&entry.key, Some(id), entry.value)
            })
            .collect()
    }

    pub fn get(&self, id: &RecordId) -> StoreResult<Option<Record<F>>> {
        let key = Record::<F>::key_for(id);
        match self.kv.get(&key)? {
            Some(value) => decode(&key, Some(id.to_string()), value).map(Some),
            None => Ok(None),
        }
    }

    pub fn put(&self, record: &Record<F>) -> StoreResult<()> {
        let value = serde_json::to_value(record)?;
        self.kv.set(&record.storage_key(), value)
    }

    /// Build a record from `draft`, store it, and return it.
    pub fn insert(&self, draft: F::Draft) -> StoreResult<Record<F>> {
        let record = Record::<F>::create(draft);
        self.put(&record)?;
        Ok(record)
    }

    /// Merge `patch` into the stored record.
    ///
    /// Returns `Ok(None)` without writing anything if `id` is absent.
    pub fn update(&self, id: &RecordId, patch: &F::Patch) -> StoreResult<Option<Record<F>>> {
        let Some(mut record) = self.get(id)? else {
            return Ok(None);
        };
        record.apply(patch);
        self.put(&record)?;
        Ok(Some(record))
    }

    /// Delete the record. Absent ids are not an error.
    pub fn remove(&self, id: &RecordId) -> StoreResult<()> {
        self.kv.del(&Record::<F>::key_for(id))
    }
}

fn decode<F: Fields>(key: &str, id: Option<String>, mut value: Value) -> StoreResult<Record<F>> {
    if let (Some(id), Value::Object(map)) = (id, &mut value) {
        map.insert("id".to_string(), Value::String(id));
    }
    serde_json::from_value(value).map_err(|e| StoreError::Corrupt {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryKvStore;
    use larder_types::{Leftover, LeftoverPatch, Meal, NewLeftover, NewMeal};
    use serde_json::json;

    fn setup() -> (Arc<InMemoryKvStore>, RecordTable<Leftover>) {
        let kv = Arc::new(InMemoryKvStore::new());
        let table = RecordTable::new(kv.clone() as Arc<dyn KvStore>);
        (kv, table)
    }

    #[test]
    fn insert_then_scan() {
        let (kv, table) = setup();
        let rec = table
            .insert(NewLeftover::new("Milk").with_level(50).with_description("half gallon"))
            .unwrap();
        assert!(kv.get(&format!("leftover:{}", rec.id)).unwrap().is_some());

        let all = table.scan().unwrap();
        assert_eq!(all, vec![rec]);
    }

    #[test]
    fn scan_ignores_other_namespaces() {
        let (kv, table) = setup();
        table.insert(NewLeftover::new("Milk")).unwrap();
        let meals: RecordTable<Meal> = RecordTable::new(kv.clone() as Arc<dyn KvStore>);
        meals.insert(NewMeal::new("Lunch")).unwrap();

        assert_eq!(table.scan().unwrap().len(), 1);
        assert_eq!(meals.scan().unwrap().len(), 1);
        assert_eq!(kv.len(), 2);
    }

    #[test]
    fn scan_takes_id_from_key() {
        let (kv, table) = setup();
        kv.set(
            "leftover:1718000000000",
            json!({
                "id": "stale",
                "name": "Kimchi",
                "level": 30,
                "description": "",
                "createdAt": "2024-06-10T06:13:20Z",
                "updatedAt": "2024-06-10T06:13:20Z",
            }),
        )
        .unwrap();
        let all = table.scan().unwrap();
        assert_eq!(all[0].id.as_str(), "1718000000000");
        assert_eq!(all[0].fields.name, "Kimchi");
    }

    #[test]
    fn corrupt_entry_fails_scan() {
        let (kv, table) = setup();
        kv.set("leftover:bad", json!({"name": 7})).unwrap();
        let err = table.scan().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { ref key, .. } if key == "leftover:bad"));
    }

    #[test]
    fn update_merges_and_persists() {
        let (_kv, table) = setup();
        let rec = table.insert(NewLeftover::new("Soup").with_description("pot")).unwrap();
        let updated = table
            .update(&rec.id, &LeftoverPatch::level(10))
            .unwrap()
            .expect("record exists");
        assert_eq!(updated.fields.level, 10);
        assert_eq!(updated.fields.description, "pot");
        assert_eq!(updated.created_at, rec.created_at);
        assert!(updated.updated_at >= rec.updated_at);

        let stored = table.get(&rec.id).unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[test]
    fn update_of_missing_id_writes_nothing() {
        let (kv, table) = setup();
        let out = table
            .update(&RecordId::from("unknown-id"), &LeftoverPatch::level(10))
            .unwrap();
        assert!(out.is_none());
        assert!(kv.is_empty());
    }

    #[test]
    fn remove_twice() {
        let (kv, table) = setup();
        let rec = table.insert(NewLeftover::new("Milk")).unwrap();
        table.remove(&rec.id).unwrap();
        table.remove(&rec.id).unwrap();
        assert!(kv.is_empty());
    }

    #[test]
    fn stored_document_matches_wire_shape() {
        let (kv, table) = setup();
        let rec = table.insert(NewLeftover::new("Milk")).unwrap();
        let value = kv.get(&rec.storage_key()).unwrap().unwrap();
        assert_eq!(value["name"], "Milk");
        assert_eq!(value["level"], 50);
        assert_eq!(value["id"], rec.id.as_str());
        assert!(value.get("createdAt").is_some());
        let _ = chrono::DateTime::parse_from_rfc3339(value["updatedAt"].as_str().unwrap()).unwrap();
    }
}
