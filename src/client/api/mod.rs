//! API trait definitions split by responsibility
//!
//! - [`AuthApi`] - OAuth token exchange
//! - [`GameDataApi`] - Realm and character reads
//!
//! The [`WowApi`](super::WowApi) super-trait combines both.

mod auth;
mod data;

pub use auth::AuthApi;
pub use data::GameDataApi;
