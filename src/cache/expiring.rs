//! Expiring key-value cache over local storage

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::entry::{CacheEntry, EntryHeader};
use super::key::{CACHE_PREFIX, storage_key, strip_storage_key};
use super::status::{CacheStatusBoard, KeyStatus};
use crate::clock::{Clock, duration_millis};
use crate::error::{Result, StorageError};
use crate::storage::LocalStorage;

/// Cache of serializable values with per-key expiry.
///
/// Expiry is checked on read; there is no background sweep.
pub struct ExpiringCache {
    storage: Arc<dyn LocalStorage>,
    status: CacheStatusBoard,
    clock: Arc<dyn Clock>,
}

impl ExpiringCache {
    pub fn new(
        storage: Arc<dyn LocalStorage>,
        status: CacheStatusBoard,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            storage,
            status,
            clock,
        }
    }

    /// Status board this cache publishes to
    pub fn status(&self) -> &CacheStatusBoard {
        &self.status
    }

    /// Store `data` under `key` for `ttl`
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, data: &T, ttl: Duration) -> Result<()> {
        let now = self.clock.now_millis();
        let entry = CacheEntry::new(data, now, duration_millis(ttl));
        let json = serde_json::to_string(&entry)
            .map_err(|e| StorageError::Encode(format!("cache entry {}: {}", key, e)))?;

        self.storage.set_item(&storage_key(key), &json)?;
        self.status
            .publish(key, KeyStatus::cached(entry.expiry, entry.timestamp));
        Ok(())
    }

    /// Read a fresh value. Expired or unreadable entries are evicted and read as absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let stored_key = storage_key(key);
        let Some(raw) = self.storage.get_item(&stored_key)? else {
            self.status.publish(key, KeyStatus::absent(0));
            return Ok(None);
        };

        let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Evicting unreadable cache entry {}: {}", key, e);
                self.storage.remove_item(&stored_key)?;
                self.status.publish(key, KeyStatus::absent(0));
                return Ok(None);
            }
        };

        let now = self.clock.now_millis();
        if entry.is_fresh(now) {
            self.status
                .publish(key, KeyStatus::cached(entry.expiry, entry.timestamp));
            Ok(Some(entry.data))
        } else {
            log::debug!("Cache expired: {}", key);
            self.storage.remove_item(&stored_key)?;
            self.status.publish(key, KeyStatus::absent(entry.timestamp));
            Ok(None)
        }
    }

    /// Whether a fresh entry exists. Does not touch the status board.
    pub fn has_valid(&self, key: &str) -> bool {
        let now = self.clock.now_millis();
        self.header(key).is_some_and(|h| h.is_fresh(now))
    }

    /// Time until `key` expires, zero when absent or expired
    pub fn remaining_ttl(&self, key: &str) -> Duration {
        let now = self.clock.now_millis();
        self.header(key)
            .map(|h| Duration::from_millis(h.remaining_millis(now) as u64))
            .unwrap_or(Duration::ZERO)
    }

    /// Remove a single entry
    pub fn clear(&self, key: &str) -> Result<()> {
        self.storage.remove_item(&storage_key(key))?;
        self.status.mark_cleared(key);
        Ok(())
    }

    /// Remove every cache entry from storage. Non-cache keys are left alone.
    pub fn clear_all(&self) -> Result<ClearStats> {
        let keys = self.storage.keys_with_prefix(CACHE_PREFIX)?;
        for stored_key in &keys {
            self.storage.remove_item(stored_key)?;
        }
        self.status.reset_all();

        Ok(ClearStats {
            entries_removed: keys.len(),
        })
    }

    /// Clear `key`, produce a fresh value, and store it.
    ///
    /// The old entry is gone before `producer` runs; if it fails the key stays empty.
    pub async fn refresh<T, F, Fut>(&self, key: &str, producer: F, ttl: Duration) -> Result<T>
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.clear(key)?;

        let fresh = match producer().await {
            Ok(value) => value,
            Err(e) => {
                log::error!("Error refreshing cache for {}: {}", key, e);
                return Err(e);
            }
        };

        if let Err(e) = self.set(key, &fresh, ttl) {
            log::warn!("Refreshed {} but could not cache it: {}", key, e);
        }
        Ok(fresh)
    }

    /// Cache keys currently in storage, without the storage prefix
    pub fn keys(&self) -> Result<Vec<String>> {
        Ok(self
            .storage
            .keys_with_prefix(CACHE_PREFIX)?
            .iter()
            .filter_map(|k| strip_storage_key(k).map(str::to_string))
            .collect())
    }

    /// Summarize stored entries
    pub fn stats(&self) -> Result<CacheStats> {
        let now = self.clock.now_millis();
        let mut stats = CacheStats::default();

        for stored_key in self.storage.keys_with_prefix(CACHE_PREFIX)? {
            let Some(raw) = self.storage.get_item(&stored_key)? else {
                continue;
            };
            stats.total_entries += 1;
            stats.total_size_bytes += raw.len();

            match serde_json::from_str::<EntryHeader>(&raw) {
                Ok(header) if header.is_fresh(now) => {
                    stats.valid_entries += 1;
                    stats.oldest_entry = Some(
                        stats
                            .oldest_entry
                            .map_or(header.timestamp, |t| t.min(header.timestamp)),
                    );
                    stats.newest_entry = Some(
                        stats
                            .newest_entry
                            .map_or(header.timestamp, |t| t.max(header.timestamp)),
                    );
                }
                _ => stats.expired_entries += 1,
            }
        }

        Ok(stats)
    }

    fn header(&self, key: &str) -> Option<EntryHeader> {
        let raw = self.storage.get_item(&storage_key(key)).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }
}

/// Statistics about cache clear operation
#[derive(Debug)]
pub struct ClearStats {
    pub entries_removed: usize,
}

/// Statistics about cache state
#[derive(Debug, Default)]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    /// Expired or unreadable
    pub expired_entries: usize,
    pub total_size_bytes: usize,
    /// Epoch milliseconds of the oldest fresh entry
    pub oldest_entry: Option<i64>,
    pub newest_entry: Option<i64>,
}
