//! Key-value storage for Larder.
//!
//! Records are kept in a flat key-value table as JSON documents, one per key,
//! under `"<namespace>:<id>"`. A prefix scan over `"<namespace>:"` is the only
//! index.
//!
//! # Tables
//!
//! All backends implement the [`KvStore`] trait:
//!
//! - [`InMemoryKvStore`] -- `BTreeMap`-based table for tests and embedding
//! - [`JsonFileKvStore`] -- the same table mirrored to a single JSON file
//!
//! [`RecordTable`] layers typed [`Record`](larder_types::Record) access on top
//! of any table.
//!
//! # Rules
//!
//! 1. `get`, `set` and `del` are each atomic; there are no multi-key
//!    transactions.
//! 2. `del` of an absent key succeeds.
//! 3. Prefix scans return entries in ascending key order.
//! 4. All I/O and decoding errors are propagated, never silently ignored.

pub mod error;
pub mod file;
pub mod memory;
pub mod table;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::JsonFileKvStore;
pub use memory::InMemoryKvStore;
pub use table::RecordTable;
pub use traits::{KvEntry, KvStore};
