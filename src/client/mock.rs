//! Mock Battle.net API client for testing
//!
//! Provides a mock implementation of the API traits for unit testing
//! without making real API calls.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use super::api::{AuthApi, GameDataApi};
use super::models::{CharacterInfo, Realm, Region, Reputation, TokenGrant};
use crate::error::{ApiError, ApiResult};

/// Mock API client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockWowApi::new().with_realms(vec![realm(1, "Draenor")]);
/// let token = mock.exchange_token(Region::Eu).await?;
/// ```
pub struct MockWowApi {
    /// Realms to return from realm_index
    realms: Arc<Mutex<Vec<Realm>>>,
    /// Reputations to return from character_reputations
    reputations: Arc<Mutex<Vec<Reputation>>>,
    /// Lifetime reported by exchange_token
    token_lifetime: Duration,
    /// Delay applied to every call, to widen race windows
    latency: Duration,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Tokens presented to data endpoints
    seen_tokens: Arc<Mutex<Vec<String>>>,
}

/// Call counts per method
#[derive(Debug, Default, Clone)]
pub struct CallCounts {
    pub exchange_token: usize,
    pub realm_index: usize,
    pub character_reputations: usize,
}

impl Default for MockWowApi {
    fn default() -> Self {
        Self {
            realms: Arc::new(Mutex::new(Vec::new())),
            reputations: Arc::new(Mutex::new(Vec::new())),
            token_lifetime: Duration::from_secs(86_399),
            latency: Duration::ZERO,
            error: Arc::new(Mutex::new(None)),
            call_count: Arc::new(Mutex::new(CallCounts::default())),
            seen_tokens: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockWowApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_realms(self, realms: Vec<Realm>) -> Self {
        Self {
            realms: Arc::new(Mutex::new(realms)),
            ..self
        }
    }

    pub fn with_reputations(self, reputations: Vec<Reputation>) -> Self {
        Self {
            reputations: Arc::new(Mutex::new(reputations)),
            ..self
        }
    }

    pub fn with_token_lifetime(self, token_lifetime: Duration) -> Self {
        Self {
            token_lifetime,
            ..self
        }
    }

    pub fn with_latency(self, latency: Duration) -> Self {
        Self { latency, ..self }
    }

    /// Make the next call fail with `error`
    pub async fn set_error(&self, error: ApiError) {
        *self.error.lock().await = Some(error);
    }

    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    pub async fn seen_tokens(&self) -> Vec<String> {
        self.seen_tokens.lock().await.clone()
    }

    async fn simulate(&self) -> ApiResult<()> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        match self.error.lock().await.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AuthApi for MockWowApi {
    async fn exchange_token(&self, region: Region) -> ApiResult<TokenGrant> {
        let n = {
            let mut counts = self.call_count.lock().await;
            counts.exchange_token += 1;
            counts.exchange_token
        };
        self.simulate().await?;

        Ok(TokenGrant {
            access_token: format!("{}-token-{}", region, n),
            token_type: Some("bearer".to_string()),
            expires_in: self.token_lifetime.as_secs(),
        })
    }
}

#[async_trait]
impl GameDataApi for MockWowApi {
    async fn realm_index(&self, _region: Region, token: &str) -> ApiResult<Vec<Realm>> {
        self.call_count.lock().await.realm_index += 1;
        self.seen_tokens.lock().await.push(token.to_string());
        self.simulate().await?;
        Ok(self.realms.lock().await.clone())
    }

    async fn character_reputations(
        &self,
        _character: &CharacterInfo,
        token: &str,
    ) -> ApiResult<Vec<Reputation>> {
        self.call_count.lock().await.character_reputations += 1;
        self.seen_tokens.lock().await.push(token.to_string());
        self.simulate().await?;
        Ok(self.reputations.lock().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_counts_calls() {
        let mock = MockWowApi::new();

        mock.exchange_token(Region::Eu).await.unwrap();
        mock.realm_index(Region::Eu, "t").await.unwrap();

        let counts = mock.call_counts().await;
        assert_eq!(counts.exchange_token, 1);
        assert_eq!(counts.realm_index, 1);
        assert_eq!(mock.seen_tokens().await, vec!["t"]);
    }

    #[tokio::test]
    async fn test_mock_error_consumed_once() {
        let mock = MockWowApi::new();
        mock.set_error(ApiError::Network("down".to_string())).await;

        assert!(mock.realm_index(Region::Eu, "t").await.is_err());
        assert!(mock.realm_index(Region::Eu, "t").await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_tokens_are_distinct() {
        let mock = MockWowApi::new();
        let a = mock.exchange_token(Region::Eu).await.unwrap();
        let b = mock.exchange_token(Region::Eu).await.unwrap();
        assert_ne!(a.access_token, b.access_token);
    }
}
