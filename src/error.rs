//! Error types for wowtasks

use std::time::Duration;
use thiserror::Error;

/// Result type alias for wowtasks operations
pub type Result<T> = std::result::Result<T, Error>;

/// Result of a single Battle.net request
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Task(#[from] TaskError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

/// Battle.net API errors.
///
/// `Clone` so a single failed request can be handed to every caller
/// waiting on the same in-flight fetch.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Failed to authenticate with the Battle.net API: {0}")]
    AuthenticationFailed(String),

    #[error("Battle.net credentials not configured. Set client_id and client_secret in the config file.")]
    MissingCredentials,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Durable storage and encryption errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Could not determine a data directory for local storage")]
    NoDataDir,

    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Storage database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage lock poisoned")]
    Poisoned,

    #[error("Failed to encode value: {0}")]
    Encode(String),

    #[error("Encryption failed: {0}")]
    Encryption(String),
}

/// Reasons a stored vault payload could not be read back.
///
/// These never escape `StateVault::load`; they surface only through `probe`
/// and warning logs.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("payload shorter than a nonce")]
    Truncated,

    #[error("decryption failed")]
    Decrypt,

    #[error("plaintext is not UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported schema version {0}")]
    UnsupportedVersion(u32),

    #[error("unexpected shape: {0}")]
    Schema(String),
}

/// Task checklist errors
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Unknown task '{0}'. Run `wowtasks tasks list` to see task ids.")]
    UnknownTask(String),

    #[error("Task '{0}' is not countable")]
    NotCountable(String),

    #[error("Task name cannot be empty")]
    EmptyName,
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("No character configured. Run `wowtasks character set <NAME> <REALM> <REGION>` first.")]
    MissingCharacter,

    #[error("Unknown region '{0}'. Expected one of: eu, us, kr, tw")]
    UnknownRegion(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
