//! In-process storage backends for tests

use std::collections::BTreeMap;
use std::sync::Mutex;

use super::{LocalStorage, StorageResult};
use crate::error::StorageError;

/// Volatile storage kept in a map
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StorageResult<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.items.lock().map_err(|_| StorageError::Poisoned)
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<bool> {
        Ok(self.lock()?.remove(key).is_some())
    }

    fn keys_with_prefix(&self, prefix: &str) -> StorageResult<Vec<String>> {
        Ok(self
            .lock()?
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn clear(&self) -> StorageResult<usize> {
        let mut items = self.lock()?;
        let count = items.len();
        items.clear();
        Ok(count)
    }
}

/// Storage whose every operation fails, for exercising error paths
#[derive(Debug, Default)]
pub struct FailingStorage;

impl LocalStorage for FailingStorage {
    fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Io("medium unavailable".to_string()))
    }

    fn set_item(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Io("quota exceeded".to_string()))
    }

    fn remove_item(&self, _key: &str) -> StorageResult<bool> {
        Err(StorageError::Io("medium unavailable".to_string()))
    }

    fn keys_with_prefix(&self, _prefix: &str) -> StorageResult<Vec<String>> {
        Err(StorageError::Io("medium unavailable".to_string()))
    }

    fn clear(&self) -> StorageResult<usize> {
        Err(StorageError::Io("medium unavailable".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_round_trip() {
        let storage = MemoryStorage::new();

        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), Some("v".to_string()));

        assert!(storage.remove_item("k").unwrap());
        assert_eq!(storage.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_memory_prefix_scan() {
        let storage = MemoryStorage::new();
        storage.set_item("cache_a", "1").unwrap();
        storage.set_item("cache_b", "2").unwrap();
        storage.set_item("save-state", "3").unwrap();

        assert_eq!(
            storage.keys_with_prefix("cache_").unwrap(),
            vec!["cache_a", "cache_b"]
        );
        assert_eq!(storage.clear().unwrap(), 3);
    }

    #[test]
    fn test_failing_storage_errors() {
        let storage = FailingStorage;
        assert!(storage.get_item("k").is_err());
        assert!(storage.set_item("k", "v").is_err());
    }
}
