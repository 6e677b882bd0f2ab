//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::{Region, TokenGrant};
use crate::error::ApiResult;

/// OAuth operations for the Battle.net API
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Run the client-credentials exchange against the region's token endpoint
    async fn exchange_token(&self, region: Region) -> ApiResult<TokenGrant>;
}
