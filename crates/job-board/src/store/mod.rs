//! Keyed entity storage.
//!
//! Every entity type lives in its own [`EntityStore`]. Stores know nothing about each other:
//! there are no foreign keys, no cross-store transactions, and no secondary indexes. Any
//! relationship between records is checked by the managers in [`crate::board`].

mod file;
mod memory;

use std::sync::Arc;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Ordered key/value map holding one entity type.
///
/// `insert` is an upsert: writing an existing key silently replaces the previous value.
/// `values` returns every record in key order.
pub trait EntityStore<K, V>: Send + Sync {
    fn get(&self, key: &K) -> Result<Option<V>, StoreError>;
    fn insert(&self, key: K, value: V) -> Result<V, StoreError>;
    fn remove(&self, key: &K) -> Result<Option<V>, StoreError>;
    fn values(&self) -> Result<Vec<V>, StoreError>;
}

/// Store handle shared between the owning manager and the managers that scan it.
pub type SharedStore<K, V> = Arc<dyn EntityStore<K, V>>;

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store io failure at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("store file {path} is corrupt: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
