//! Realm models

use serde::{Deserialize, Serialize};

/// Realm entry from the realm index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Realm {
    pub id: u64,
    pub name: String,
    pub slug: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

/// Sort realms alphabetically by name, ignoring case
pub fn sort_realms(realms: &mut [Realm]) {
    realms.sort_by_cached_key(|r| r.name.to_lowercase());
}
