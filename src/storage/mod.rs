//! Durable string key-value storage
//!
//! Both the expiring cache and the encrypted vault sit on a [`LocalStorage`]
//! medium. Keys are namespaced by their owner (`cache_<key>` for cache entries,
//! fixed literal keys for vault buckets).

#[cfg(test)]
pub mod memory;
pub mod sqlite;

use crate::error::StorageError;

#[cfg(test)]
pub use memory::{FailingStorage, MemoryStorage};
pub use sqlite::SqliteStorage;

/// Result alias for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// String key to string value medium.
///
/// Every write replaces the whole value for its key.
pub trait LocalStorage: Send + Sync {
    /// Read the value stored under `key`
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`. Returns whether anything was removed.
    fn remove_item(&self, key: &str) -> StorageResult<bool>;

    /// List every stored key starting with `prefix`
    fn keys_with_prefix(&self, prefix: &str) -> StorageResult<Vec<String>>;

    /// Remove every key in the medium
    fn clear(&self) -> StorageResult<usize>;
}
