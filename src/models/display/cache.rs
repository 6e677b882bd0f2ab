//! Cache entry display model

use std::time::Duration;

use serde::Serialize;
use tabled::Tabled;

use crate::output::formatters::format_ttl;

/// One cached key for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CacheKeyDisplay {
    #[tabled(rename = "KEY")]
    pub key: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "EXPIRES IN")]
    pub expires_in: String,

    #[tabled(skip)]
    pub remaining_secs: u64,
}

impl CacheKeyDisplay {
    pub fn new(key: String, fresh: bool, remaining: Duration) -> Self {
        Self {
            key,
            status: if fresh { "valid" } else { "expired" }.to_string(),
            expires_in: format_ttl(remaining),
            remaining_secs: remaining.as_secs(),
        }
    }
}
