//! Display model implementations for table and JSON output
//!
//! Display models transform domain types into CLI-friendly formats
//! with appropriate column names and serialization.

mod cache;
mod common;
mod realm;
mod reputation;
mod task;

pub use cache::CacheKeyDisplay;
pub use realm::RealmDisplay;
pub use reputation::ReputationDisplay;
pub use task::TaskDisplay;
