//! Character reputation models

use serde::{Deserialize, Serialize};

/// One faction standing from the character reputations endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reputation {
    pub faction: Faction,
    pub standing: Standing,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragon: Option<Paragon>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faction {
    pub id: u64,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub raw: i64,
    pub value: i64,
    pub max: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<u32>,

    pub name: String,

    /// Present for renown factions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renown_level: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragon {
    pub raw: i64,
    pub value: i64,
    pub max: i64,
}

impl Reputation {
    /// Progress within the current standing, as a percentage
    pub fn progress_percent(&self) -> f64 {
        if self.standing.max <= 0 {
            return 100.0;
        }
        (self.standing.value as f64 / self.standing.max as f64 * 100.0).clamp(0.0, 100.0)
    }
}
