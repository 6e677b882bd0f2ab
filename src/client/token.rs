//! In-memory access token cache
//!
//! One token per region, reused while `now < expiry`. Callers asking for the
//! same region while an exchange is running wait on that exchange instead of
//! starting another.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::Mutex as AsyncMutex;

use super::api::AuthApi;
use super::models::{AccessToken, Region};
use crate::clock::Clock;
use crate::error::ApiResult;

type Slot = Arc<AsyncMutex<Option<AccessToken>>>;

/// Process-lifetime token store, owned by the command context
pub struct TokenCache {
    clock: Arc<dyn Clock>,
    slots: Mutex<HashMap<Region, Slot>>,
}

impl TokenCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Bearer token for `region`, exchanging credentials only when needed
    pub async fn bearer<A: AuthApi + ?Sized>(&self, region: Region, api: &A) -> ApiResult<String> {
        let slot = self.slot(region);
        // Held across the exchange so concurrent callers share its result
        let mut held = slot.lock().await;

        let now = self.clock.now_millis();
        if let Some(token) = held.as_ref().filter(|t| t.is_valid(now)) {
            return Ok(token.token.clone());
        }

        log::debug!("Exchanging client credentials for {} token", region);
        let grant = match api.exchange_token(region).await {
            Ok(grant) => grant,
            Err(e) => {
                log::error!("Error getting Battle.net access token: {}", e);
                return Err(e);
            }
        };

        let token = AccessToken::from_grant(grant, self.clock.now_millis());
        let bearer = token.token.clone();
        *held = Some(token);
        Ok(bearer)
    }

    /// Drop the held token for `region`
    pub async fn invalidate(&self, region: Region) {
        *self.slot(region).lock().await = None;
    }

    fn slot(&self, region: Region) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.entry(region).or_default().clone()
    }
}
