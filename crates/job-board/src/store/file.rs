use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{EntityStore, StoreError};

/// Durable store that keeps an in-memory `BTreeMap` and rewrites a JSON snapshot on every
/// mutation.
///
/// Writes land in a sibling `.tmp` file first and are then renamed over the snapshot, so a
/// crash mid-write leaves the previous snapshot intact.
pub struct JsonFileStore<K, V> {
    path: PathBuf,
    records: Mutex<BTreeMap<K, V>>,
}

#[derive(Serialize, Deserialize)]
struct Entry<K, V> {
    key: K,
    value: V,
}

#[derive(Serialize, Deserialize)]
struct Snapshot<K, V> {
    entries: Vec<Entry<K, V>>,
}

impl<K, V> JsonFileStore<K, V>
where
    K: Ord + Clone + Serialize + DeserializeOwned,
    V: Clone + Serialize + DeserializeOwned,
{
    /// Open (or lazily create) the snapshot at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = match fs::read(&path) {
            Ok(bytes) => {
                let snapshot: Snapshot<K, V> =
                    serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                        path: path.display().to_string(),
                        source,
                    })?;
                snapshot
                    .entries
                    .into_iter()
                    .map(|entry| (entry.key, entry.value))
                    .collect()
            }
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<K, V>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("file store mutex poisoned".to_string()))
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn persist(&self, records: &BTreeMap<K, V>) -> Result<(), StoreError> {
        let snapshot = Snapshot {
            entries: records
                .iter()
                .map(|(key, value)| Entry {
                    key: key.clone(),
                    value: value.clone(),
                })
                .collect(),
        };
        let bytes = serde_json::to_vec_pretty(&snapshot).map_err(|source| StoreError::Corrupt {
            path: self.path.display().to_string(),
            source,
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes).map_err(|err| self.io_error(err))?;
        fs::rename(&tmp, &self.path).map_err(|err| self.io_error(err))
    }
}

impl<K, V> EntityStore<K, V> for JsonFileStore<K, V>
where
    K: Ord + Clone + Serialize + DeserializeOwned + Send,
    V: Clone + Serialize + DeserializeOwned + Send,
{
    fn get(&self, key: &K) -> Result<Option<V>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn insert(&self, key: K, value: V) -> Result<V, StoreError> {
        let mut guard = self.lock()?;
        let previous = guard.insert(key.clone(), value.clone());
        if let Err(err) = self.persist(&guard) {
            // Keep memory and disk in agreement when the write is rejected.
            match previous {
                Some(old) => guard.insert(key, old),
                None => guard.remove(&key),
            };
            return Err(err);
        }
        Ok(value)
    }

    fn remove(&self, key: &K) -> Result<Option<V>, StoreError> {
        let mut guard = self.lock()?;
        let removed = match guard.remove(key) {
            Some(value) => value,
            None => return Ok(None),
        };
        if let Err(err) = self.persist(&guard) {
            guard.insert(key.clone(), removed);
            return Err(err);
        }
        Ok(Some(removed))
    }

    fn values(&self) -> Result<Vec<V>, StoreError> {
        Ok(self.lock()?.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("records.json");

        {
            let store: JsonFileStore<String, u32> = JsonFileStore::open(&path).expect("open");
            store.insert("a".to_string(), 1).expect("insert");
            store.insert("b".to_string(), 2).expect("insert");
            store.remove(&"a".to_string()).expect("remove");
        }

        let reopened: JsonFileStore<String, u32> = JsonFileStore::open(&path).expect("reopen");
        assert_eq!(reopened.get(&"a".to_string()).expect("get"), None);
        assert_eq!(reopened.values().expect("values"), vec![2]);
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store: JsonFileStore<String, u32> =
            JsonFileStore::open(dir.path().join("nested/absent.json")).expect("open");
        assert!(store.values().expect("values").is_empty());

        store.insert("k".to_string(), 7).expect("insert creates parent dirs");
        assert!(store.path().exists());
    }

    #[test]
    fn corrupt_file_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.json");
        fs::write(&path, b"{ not json").expect("write");

        match JsonFileStore::<String, u32>::open(&path) {
            Err(StoreError::Corrupt { .. }) => {}
            Err(other) => panic!("expected corrupt error, got {other:?}"),
            Ok(_) => panic!("expected corrupt error, got a store"),
        }
    }
}
