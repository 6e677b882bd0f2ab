//! Game and profile data API trait

use async_trait::async_trait;

use crate::client::models::{CharacterInfo, Realm, Region, Reputation};
use crate::error::ApiResult;

/// Read endpoints. Every call takes a bearer token from [`AuthApi`](super::AuthApi).
#[async_trait]
pub trait GameDataApi: Send + Sync {
    /// Realm index for a region
    async fn realm_index(&self, region: Region, token: &str) -> ApiResult<Vec<Realm>>;

    /// Reputation standings for a character
    async fn character_reputations(
        &self,
        character: &CharacterInfo,
        token: &str,
    ) -> ApiResult<Vec<Reputation>>;
}
