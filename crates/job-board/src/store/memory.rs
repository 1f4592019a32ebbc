use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::{EntityStore, StoreError};

/// Volatile store backed by a `BTreeMap`, used by tests and ephemeral runs.
pub struct MemoryStore<K, V> {
    records: Mutex<BTreeMap<K, V>>,
}

impl<K, V> Default for MemoryStore<K, V> {
    fn default() -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
        }
    }
}

impl<K, V> MemoryStore<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<K, V>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store mutex poisoned".to_string()))
    }
}

impl<K, V> EntityStore<K, V> for MemoryStore<K, V>
where
    K: Ord + Send,
    V: Clone + Send,
{
    fn get(&self, key: &K) -> Result<Option<V>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn insert(&self, key: K, value: V) -> Result<V, StoreError> {
        self.lock()?.insert(key, value.clone());
        Ok(value)
    }

    fn remove(&self, key: &K) -> Result<Option<V>, StoreError> {
        Ok(self.lock()?.remove(key))
    }

    fn values(&self) -> Result<Vec<V>, StoreError> {
        Ok(self.lock()?.values().cloned().collect())
    }
}
