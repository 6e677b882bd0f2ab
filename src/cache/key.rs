//! Cache key construction
//!
//! Keys are plain strings scoped by resource and identity, e.g. `eu_realms`
//! or `character_reputations_eu_draenor_thrall`. The storage layer adds
//! [`CACHE_PREFIX`].

use crate::client::models::Region;

/// Prefix applied to every cache entry in durable storage
pub const CACHE_PREFIX: &str = "cache_";

/// Storage key for a cache key
pub fn storage_key(key: &str) -> String {
    format!("{}{}", CACHE_PREFIX, key)
}

/// Inverse of [`storage_key`]
pub fn strip_storage_key(stored: &str) -> Option<&str> {
    stored.strip_prefix(CACHE_PREFIX)
}

/// Cache key for a region's realm list
pub fn realms_key(region: Region) -> String {
    format!("{}_realms", region)
}

/// Cache key for one character's reputations
pub fn reputations_key(region: Region, realm_slug: &str, character: &str) -> String {
    format!(
        "character_reputations_{}_{}_{}",
        region,
        realm_slug.to_lowercase(),
        character.to_lowercase()
    )
}
