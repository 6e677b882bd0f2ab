//! Battle.net API client

pub mod api;
pub mod battlenet;
pub mod inflight;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod token;

pub use api::{AuthApi, GameDataApi};
pub use battlenet::{ApiHosts, BattleNetClient, Credentials};
pub use inflight::InFlight;
#[cfg(test)]
pub use mock::MockWowApi;
pub use models::{CharacterInfo, Realm, Region};
pub use token::TokenCache;

/// Battle.net API client trait
///
/// Blanket-implemented for anything providing both halves of the API.
pub trait WowApi: AuthApi + GameDataApi {}

impl<T: AuthApi + GameDataApi> WowApi for T {}
