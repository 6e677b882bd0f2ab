//! Observable cache status
//!
//! The board mirrors what the cache knows about each key it has touched.
//! It is not durable; entries appear as keys are read or written. Every
//! change is also published to subscribers.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::sync::broadcast;

/// Buffered events per subscriber before the oldest are dropped
const EVENT_CAPACITY: usize = 64;

/// Status of a single cache key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyStatus {
    pub is_cached: bool,
    pub expires_at: i64,
    pub timestamp: i64,
}

impl KeyStatus {
    pub fn cached(expires_at: i64, timestamp: i64) -> Self {
        Self {
            is_cached: true,
            expires_at,
            timestamp,
        }
    }

    pub fn absent(timestamp: i64) -> Self {
        Self {
            is_cached: false,
            expires_at: 0,
            timestamp,
        }
    }
}

/// Published whenever a key's status changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEvent {
    pub key: String,
    pub status: KeyStatus,
}

/// Shared status map plus its change feed. Cheap to clone.
#[derive(Debug, Clone)]
pub struct CacheStatusBoard {
    entries: Arc<Mutex<BTreeMap<String, KeyStatus>>>,
    events: broadcast::Sender<StatusEvent>,
}

impl Default for CacheStatusBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStatusBoard {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            entries: Arc::new(Mutex::new(BTreeMap::new())),
            events,
        }
    }

    /// Receive every status change made after this call
    pub fn subscribe(&self) -> broadcast::Receiver<StatusEvent> {
        self.events.subscribe()
    }

    /// Current status of `key`, if it has been touched
    pub fn get(&self, key: &str) -> Option<KeyStatus> {
        self.entries.lock().ok()?.get(key).copied()
    }

    /// Copy of the whole map
    pub fn snapshot(&self) -> BTreeMap<String, KeyStatus> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub(crate) fn publish(&self, key: &str, status: KeyStatus) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), status);
        }
        // No receivers is fine
        let _ = self.events.send(StatusEvent {
            key: key.to_string(),
            status,
        });
    }

    /// Mark `key` as no longer cached, keeping its last write time
    pub(crate) fn mark_cleared(&self, key: &str) {
        let timestamp = self.get(key).map(|s| s.timestamp).unwrap_or(0);
        self.publish(key, KeyStatus::absent(timestamp));
    }

    /// Reset every known key to the empty status
    pub(crate) fn reset_all(&self) {
        let keys: Vec<String> = self.snapshot().into_keys().collect();
        for key in keys {
            self.publish(&key, KeyStatus::default());
        }
    }
}
