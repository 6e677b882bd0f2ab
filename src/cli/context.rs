//! Command execution context
//!
//! Owns every piece of process-wide state: the storage medium, the cache and
//! its status board, the vault and the token store. Commands borrow what they
//! need from here instead of reaching for globals.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;

use crate::cache::{CacheStatusBoard, CachedWowClient, ExpiringCache};
use crate::catalog::TaskCatalog;
use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::{BattleNetClient, CharacterInfo, TokenCache};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::storage::SqliteStorage;
use crate::tracker::Tracker;
use crate::vault::StateVault;

/// Context for command execution containing config, stores, and runtime options.
pub struct CommandContext {
    /// Loaded configuration (file plus environment overrides)
    pub config: Config,
    /// Output format preference
    pub format: OutputFormat,
    /// Skip cache reads for API data
    pub no_cache: bool,
    pub clock: Arc<dyn Clock>,
    pub cache: Arc<ExpiringCache>,
    pub vault: Arc<StateVault>,
    pub tokens: Arc<TokenCache>,
    storage: Arc<SqliteStorage>,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// Loads config (a missing file is fine) and opens the local database.
    /// Nothing here touches the network.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_ref())?;
        let storage = Arc::new(SqliteStorage::open_at(&config.data_dir()?)?);
        log::debug!("Using storage at {}", storage.path().display());

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let board = CacheStatusBoard::new();
        if opts.debug {
            log_status_changes(&board);
        }

        let cache = Arc::new(ExpiringCache::new(storage.clone(), board, clock.clone()));
        let vault = Arc::new(StateVault::new(storage.clone(), config.passphrase()));
        let tokens = Arc::new(TokenCache::new(clock.clone()));

        Ok(Self {
            config,
            format: opts.format,
            no_cache: opts.no_cache,
            clock,
            cache,
            vault,
            tokens,
            storage,
        })
    }

    /// Path of the local database file
    pub fn storage_path(&self) -> &Path {
        self.storage.path()
    }

    /// Load the task tracker
    pub fn tracker(&self) -> Result<Tracker> {
        Tracker::load(self.vault.clone(), TaskCatalog::embedded()?, self.clock.clone())
    }

    /// Battle.net client with caching. Fails when credentials are missing.
    pub fn client(&self) -> Result<CachedWowClient<BattleNetClient>> {
        let credentials = self.config.credentials()?;
        let raw_client = BattleNetClient::new(credentials, self.config.hosts())?;
        Ok(CachedWowClient::new(
            raw_client,
            self.cache.clone(),
            self.tokens.clone(),
        ))
    }

    /// Wipe every stored item and forget all cache status
    pub fn wipe_local_data(&self) -> Result<usize> {
        let removed = self.vault.clear_all()?;
        self.cache.status().reset_all();
        Ok(removed)
    }

    /// Saved character, if any
    pub fn character(&self) -> Result<Option<CharacterInfo>> {
        self.vault.load::<CharacterInfo>()
    }

    /// Saved character, returning an error if not set.
    pub fn require_character(&self) -> Result<CharacterInfo> {
        self.character()?
            .ok_or_else(|| ConfigError::MissingCharacter.into())
    }
}

/// Log every cache status change at debug level
fn log_status_changes(board: &CacheStatusBoard) {
    let mut events = board.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => log::debug!(
                    "Cache status {}: cached={} expires_at={}",
                    event.key,
                    event.status.is_cached,
                    event.status.expires_at
                ),
                Err(RecvError::Lagged(skipped)) => {
                    log::debug!("Cache status log skipped {} events", skipped)
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}
