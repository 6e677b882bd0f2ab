//! Battle.net API regions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Battle.net region. Each region has its own OAuth endpoint and API host.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Eu,
    Us,
    Kr,
    Tw,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Eu, Region::Us, Region::Kr, Region::Tw];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Eu => "eu",
            Region::Us => "us",
            Region::Kr => "kr",
            Region::Tw => "tw",
        }
    }

    /// Locale requested for localized names
    pub fn locale(&self) -> &'static str {
        match self {
            Region::Eu => "en_GB",
            Region::Us => "en_US",
            Region::Kr => "ko_KR",
            Region::Tw => "zh_TW",
        }
    }

    /// Namespace for game data that changes at runtime (realms)
    pub fn dynamic_namespace(&self) -> String {
        format!("dynamic-{}", self)
    }

    /// Namespace for character profile data
    pub fn profile_namespace(&self) -> String {
        format!("profile-{}", self)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownRegion(s.to_string()))
    }
}
