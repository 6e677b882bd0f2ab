//! Configuration management for wowtasks

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::client::{ApiHosts, Credentials, Region};
use crate::error::{ApiError, ConfigError, Result};
use crate::storage::SqliteStorage;
use crate::vault::DEFAULT_PASSPHRASE;

/// Environment variable overriding `client_id`
pub const CLIENT_ID_ENV: &str = "WOWTASKS_CLIENT_ID";
/// Environment variable overriding `client_secret`
pub const CLIENT_SECRET_ENV: &str = "WOWTASKS_CLIENT_SECRET";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Battle.net API client ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// Battle.net API client secret
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    /// Default region for realm lookups
    #[serde(default)]
    pub region: Region,

    /// Passphrase for the encrypted state store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_key: Option<String>,

    /// Directory holding the local database
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Custom API host for development/testing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// Custom OAuth host for development/testing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth_host: Option<String>,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".wowtasks").join("config.yaml"))
    }

    /// Resolve the config path from an optional override
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load from an optional path override, then apply environment overrides
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let mut config = Self::load_from(&Self::resolve_path(path)?)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a specific path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        // Set file permissions to 600 on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Environment values win over the file
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v: &String| !v.trim().is_empty());
        if let Some(id) = non_empty(CLIENT_ID_ENV) {
            self.client_id = Some(id);
        }
        if let Some(secret) = non_empty(CLIENT_SECRET_ENV) {
            self.client_secret = Some(secret);
        }
    }

    /// Battle.net credentials, if both halves are configured
    pub fn credentials(&self) -> std::result::Result<Credentials, ApiError> {
        match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) => Ok(Credentials {
                client_id: id.clone(),
                client_secret: secret.clone(),
            }),
            _ => Err(ApiError::MissingCredentials),
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials().is_ok()
    }

    pub fn passphrase(&self) -> &str {
        self.encryption_key.as_deref().unwrap_or(DEFAULT_PASSPHRASE)
    }

    /// Directory for the local database
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(SqliteStorage::data_dir()?),
        }
    }

    pub fn hosts(&self) -> ApiHosts {
        ApiHosts {
            api_host: self.api_host.clone(),
            oauth_host: self.oauth_host.clone(),
        }
    }
}
