//! Display models for CLI output

pub mod display;

pub use display::{CacheKeyDisplay, RealmDisplay, ReputationDisplay, TaskDisplay};
