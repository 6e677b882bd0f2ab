//! Expiring cache for API responses
//!
//! Entries live in [`LocalStorage`](crate::storage::LocalStorage) under a
//! `cache_` prefix and expire lazily: an expired entry is evicted the next time
//! it is read. Key status is mirrored into a [`CacheStatusBoard`] that callers
//! can subscribe to.

pub mod client;
pub mod entry;
pub mod expiring;
pub mod key;
pub mod status;

use std::time::Duration;

/// Cache TTL configuration per data type
pub struct CacheTtl;

impl CacheTtl {
    /// Used when a caller does not pick a TTL
    pub const DEFAULT: Duration = Duration::from_secs(60 * 60); // 1 hr

    // Realm lists change only on realm launches/merges
    pub const REALMS: Duration = Duration::from_secs(24 * 60 * 60); // 24 hr

    pub const REPUTATIONS: Duration = Self::DEFAULT;

    /// Subtracted from the provider-declared OAuth token lifetime
    pub const TOKEN_SAFETY_MARGIN: Duration = Duration::from_secs(60);
}

// Re-export main types
pub use client::CachedWowClient;
pub use expiring::ExpiringCache;
pub use key::{realms_key, reputations_key};
pub use status::CacheStatusBoard;
