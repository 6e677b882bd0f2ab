//! Authentication models

use serde::{Deserialize, Serialize};

use crate::cache::CacheTtl;
use crate::clock::duration_millis;

/// Response body of the OAuth client-credentials exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,

    #[serde(default)]
    pub token_type: Option<String>,

    /// Lifetime in seconds
    pub expires_in: u64,
}

/// Bearer token held in memory for one region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,

    /// Epoch milliseconds after which the token is not reused
    pub expiry: i64,
}

impl AccessToken {
    /// Build from a grant received at `now`, expiring one safety margin early
    pub fn from_grant(grant: TokenGrant, now: i64) -> Self {
        let lifetime = i64::try_from(grant.expires_in.saturating_mul(1000)).unwrap_or(i64::MAX);
        Self {
            token: grant.access_token,
            expiry: now
                .saturating_add(lifetime)
                .saturating_sub(duration_millis(CacheTtl::TOKEN_SAFETY_MARGIN)),
        }
    }

    pub fn is_valid(&self, now: i64) -> bool {
        now < self.expiry
    }
}
