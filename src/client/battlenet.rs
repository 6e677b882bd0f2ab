//! Battle.net API client implementation

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::api::{AuthApi, GameDataApi};
use super::models::{CharacterInfo, Realm, Region, Reputation, TokenGrant};
use crate::error::{ApiError, ApiResult};

/// Battle.net allows 100 requests per second per client
const RATE_LIMIT_PER_SECOND: NonZeroU32 = NonZeroU32::new(100).unwrap();

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// OAuth client credentials issued by the Battle.net developer portal
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Host overrides, used to point the client at a mock server
#[derive(Debug, Clone, Default)]
pub struct ApiHosts {
    /// Replaces `https://{region}.api.blizzard.com`
    pub api_host: Option<String>,
    /// Replaces `https://{region}.battle.net`
    pub oauth_host: Option<String>,
}

/// Battle.net HTTP client
pub struct BattleNetClient {
    http: HttpClient,
    credentials: Credentials,
    hosts: ApiHosts,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl BattleNetClient {
    /// Create a new Battle.net API client
    pub fn new(credentials: Credentials, hosts: ApiHosts) -> ApiResult<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(
            RATE_LIMIT_PER_SECOND,
        )));

        Ok(Self {
            http,
            credentials,
            hosts,
            rate_limiter,
        })
    }

    fn api_base(&self, region: Region) -> String {
        match &self.hosts.api_host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => format!("https://{}.api.blizzard.com", region),
        }
    }

    fn token_url(&self, region: Region) -> String {
        match &self.hosts.oauth_host {
            Some(host) => format!("{}/oauth/token", host.trim_end_matches('/')),
            None => format!("https://{}.battle.net/oauth/token", region),
        }
    }

    /// Authenticated GET with `namespace` and `locale` query parameters
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        namespace: &str,
        locale: &str,
        region: Region,
        token: &str,
    ) -> ApiResult<T> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}{}", self.api_base(region), path);
        log::debug!("GET {} (namespace={}, locale={})", url, namespace, locale);

        let response = self
            .http
            .get(&url)
            .query(&[("namespace", namespace), ("locale", locale)])
            .bearer_auth(token)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        match status {
            StatusCode::OK => response.json::<T>().await.map_err(|e| {
                ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
            }),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(
                ApiError::AuthenticationFailed(format!("{} rejected the access token", path)),
            ),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(path.to_string())),
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(1);
                Err(ApiError::RateLimit(Duration::from_secs(retry_after)))
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg))
            }
            _ => Err(ApiError::InvalidResponse(format!(
                "Unexpected status code: {}",
                status
            ))),
        }
    }
}

#[async_trait]
impl AuthApi for BattleNetClient {
    async fn exchange_token(&self, region: Region) -> ApiResult<TokenGrant> {
        self.rate_limiter.until_ready().await;

        let url = self.token_url(region);
        log::debug!("Requesting access token from {}", url);

        let response = self
            .http
            .post(&url)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| ApiError::AuthenticationFailed(ApiError::from(e).to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::AuthenticationFailed(format!(
                "token endpoint returned {}",
                status
            )));
        }

        response.json::<TokenGrant>().await.map_err(|e| {
            ApiError::AuthenticationFailed(format!("Failed to parse token response: {}", e))
        })
    }
}

#[async_trait]
impl GameDataApi for BattleNetClient {
    async fn realm_index(&self, region: Region, token: &str) -> ApiResult<Vec<Realm>> {
        #[derive(Deserialize)]
        struct RealmIndex {
            #[serde(default)]
            realms: Vec<Realm>,
        }

        let index: RealmIndex = self
            .get_json(
                "/data/wow/realm/index",
                &region.dynamic_namespace(),
                region.locale(),
                region,
                token,
            )
            .await?;
        Ok(index.realms)
    }

    async fn character_reputations(
        &self,
        character: &CharacterInfo,
        token: &str,
    ) -> ApiResult<Vec<Reputation>> {
        #[derive(Deserialize)]
        struct ReputationsResponse {
            #[serde(default)]
            reputations: Vec<Reputation>,
        }

        let region = character.region;
        let path = format!(
            "/profile/wow/character/{}/{}/reputations",
            character.realm,
            character.name.to_lowercase()
        );
        let response: ReputationsResponse = self
            .get_json(
                &path,
                &region.profile_namespace(),
                region.locale(),
                region,
                token,
            )
            .await?;
        Ok(response.reputations)
    }
}
