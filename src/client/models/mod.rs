//! Battle.net API data models

mod auth;
mod character;
mod realm;
mod region;
mod reputation;

pub use auth::{AccessToken, TokenGrant};
pub use character::CharacterInfo;
pub use realm::{Realm, sort_realms};
pub use region::Region;
pub use reputation::Reputation;
