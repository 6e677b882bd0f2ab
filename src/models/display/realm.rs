//! Realm display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::Realm;

/// Realm display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct RealmDisplay {
    #[tabled(rename = "ID")]
    pub id: u64,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "SLUG")]
    pub slug: String,

    #[tabled(rename = "TIMEZONE")]
    pub timezone: String,
}

impl From<&Realm> for RealmDisplay {
    fn from(realm: &Realm) -> Self {
        Self {
            id: realm.id,
            name: realm.name.clone(),
            slug: realm.slug.clone(),
            timezone: realm.timezone.clone().unwrap_or_else(|| "--".to_string()),
        }
    }
}
