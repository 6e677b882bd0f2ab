//! Persisted cache envelope

use serde::{Deserialize, Serialize};

/// Current cache envelope schema
pub const ENTRY_VERSION: u32 = 1;

fn legacy_version() -> u32 {
    // Entries written before the version tag existed
    0
}

/// A cached value with its expiry.
///
/// Entries are written whole and never patched; a refresh replaces the entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheEntry<T> {
    pub data: T,

    /// Expiry instant, epoch milliseconds
    pub expiry: i64,

    /// Write instant, epoch milliseconds
    pub timestamp: i64,

    #[serde(default = "legacy_version")]
    pub version: u32,
}

impl<T> CacheEntry<T> {
    pub fn new(data: T, now: i64, ttl_millis: i64) -> Self {
        Self {
            data,
            expiry: now.saturating_add(ttl_millis),
            timestamp: now,
            version: ENTRY_VERSION,
        }
    }

    pub fn is_fresh(&self, now: i64) -> bool {
        self.expiry > now
    }

    pub fn remaining_millis(&self, now: i64) -> i64 {
        (self.expiry - now).max(0)
    }
}

/// Entry header without the payload, for freshness checks
pub type EntryHeader = CacheEntry<serde::de::IgnoredAny>;
