//! Cached wrapper for the Battle.net API client
//!
//! Each read goes token -> cache -> network. Successful responses are written
//! back to the [`ExpiringCache`]; concurrent identical reads share one request.

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use serde::{Serialize, de::DeserializeOwned};

use crate::cache::{CacheTtl, ExpiringCache, realms_key, reputations_key};
use crate::client::models::{CharacterInfo, Realm, Region, Reputation, sort_realms};
use crate::client::{InFlight, TokenCache, WowApi};
use crate::error::{ApiError, Result};

/// Cached wrapper for any [`WowApi`] implementation
pub struct CachedWowClient<C: WowApi> {
    inner: Arc<C>,
    cache: Arc<ExpiringCache>,
    tokens: Arc<TokenCache>,
    realm_fetches: InFlight<Vec<Realm>>,
    reputation_fetches: InFlight<Vec<Reputation>>,
}

impl<C: WowApi + 'static> CachedWowClient<C> {
    /// Create a new cached client wrapper.
    ///
    /// # Arguments
    /// * `inner` - The underlying API client to wrap
    /// * `cache` - Response cache shared with the rest of the process
    /// * `tokens` - Access token store for this process
    pub fn new(inner: C, cache: Arc<ExpiringCache>, tokens: Arc<TokenCache>) -> Self {
        Self {
            inner: Arc::new(inner),
            cache,
            tokens,
            realm_fetches: InFlight::new(),
            reputation_fetches: InFlight::new(),
        }
    }

    /// Realm list for `region`, sorted by name
    pub async fn realms(&self, region: Region, force_refresh: bool) -> Result<Vec<Realm>> {
        let key = realms_key(region);

        if force_refresh {
            log::debug!("Refreshing realm data for {}", region);
            return self
                .cache
                .refresh(&key, || self.fetch_realms(region, &key), CacheTtl::REALMS)
                .await;
        }

        if let Some(cached) = self.get_cached(&key) {
            log::debug!("Using cached realm data for {}", region);
            return Ok(cached);
        }

        let realms = self.fetch_realms(region, &key).await?;
        set_cached(&self.cache, &key, &realms, CacheTtl::REALMS);
        Ok(realms)
    }

    /// Reputation standings for `character`
    pub async fn reputations(
        &self,
        character: &CharacterInfo,
        force_refresh: bool,
    ) -> Result<Vec<Reputation>> {
        let key = reputations_key(character.region, &character.realm, &character.name);

        if force_refresh {
            log::debug!("Refreshing reputation data");
            return self
                .cache
                .refresh(
                    &key,
                    || self.fetch_reputations(character, &key),
                    CacheTtl::REPUTATIONS,
                )
                .await;
        }

        if let Some(cached) = self.get_cached(&key) {
            log::debug!("Using cached reputation data");
            return Ok(cached);
        }

        log::debug!("Fetching fresh reputation data from API");
        let reputations = self.fetch_reputations(character, &key).await?;
        set_cached(&self.cache, &key, &reputations, CacheTtl::REPUTATIONS);
        Ok(reputations)
    }

    /// Network fetch shared by every concurrent caller for `key`
    async fn fetch_realms(&self, region: Region, key: &str) -> Result<Vec<Realm>> {
        let inner = self.inner.clone();
        let tokens = self.tokens.clone();

        self.realm_fetches
            .run(key, move || {
                async move {
                    let token = tokens.bearer(region, inner.as_ref()).await?;
                    let mut realms = match inner.realm_index(region, &token).await {
                        Ok(realms) => realms,
                        Err(e) => {
                            log::error!("Error fetching realms for {}: {}", region, e);
                            return Err(reject_token(&tokens, region, e).await);
                        }
                    };

                    sort_realms(&mut realms);
                    Ok(realms)
                }
                .boxed()
            })
            .await
            .map_err(Into::into)
    }

    async fn fetch_reputations(
        &self,
        character: &CharacterInfo,
        key: &str,
    ) -> Result<Vec<Reputation>> {
        let region = character.region;
        let inner = self.inner.clone();
        let tokens = self.tokens.clone();
        let character = character.clone();

        self.reputation_fetches
            .run(key, move || {
                async move {
                    let token = tokens.bearer(region, inner.as_ref()).await?;
                    match inner.character_reputations(&character, &token).await {
                        Ok(reputations) => Ok(reputations),
                        Err(e) => {
                            log::error!("Error fetching reputations: {}", e);
                            Err(reject_token(&tokens, region, e).await)
                        }
                    }
                }
                .boxed()
            })
            .await
            .map_err(Into::into)
    }

    /// Try to get cached data. Storage trouble reads as a miss.
    fn get_cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.cache
            .get(key)
            .inspect_err(|e| log::warn!("Cache read failed for {}: {}", key, e))
            .ok()
            .flatten()
    }
}

/// A token the data endpoint rejected must not be presented again
async fn reject_token(tokens: &TokenCache, region: Region, err: ApiError) -> ApiError {
    if matches!(err, ApiError::AuthenticationFailed(_)) {
        tokens.invalidate(region).await;
    }
    err
}

/// Store data in cache. A failed write only costs a future cache miss.
fn set_cached<T: Serialize>(cache: &ExpiringCache, key: &str, data: &T, ttl: Duration) {
    if let Err(e) = cache.set(key, data, ttl) {
        log::warn!("Error setting cache for {}: {}", key, e);
    }
}
