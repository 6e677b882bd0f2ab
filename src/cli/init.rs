//! Init command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::client::Region;
use crate::config::Config;
use crate::error::{ConfigError, Result};

/// Save Battle.net credentials into the config file.
///
/// Reads the file without environment overrides so that values coming from
/// `WOWTASKS_CLIENT_ID`/`WOWTASKS_CLIENT_SECRET` are never written to disk.
pub fn run(
    opts: &GlobalOptions,
    client_id: &str,
    client_secret: &str,
    region: Option<Region>,
) -> Result<()> {
    let (client_id, client_secret) = (client_id.trim(), client_secret.trim());
    if client_id.is_empty() || client_secret.is_empty() {
        return Err(ConfigError::Invalid("client id and secret cannot be empty".to_string()).into());
    }

    let path = Config::resolve_path(opts.config_ref())?;
    let mut config = Config::load_from(&path)?;
    config.client_id = Some(client_id.to_string());
    config.client_secret = Some(client_secret.to_string());
    if let Some(region) = region {
        config.region = region;
    }
    config.save_to(&path)?;

    println!("{} Configuration saved to: {}", "✓".green(), path.display());
    println!("  Region: {}", config.region.to_string().bold());

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "wowtasks status".cyan());
    println!("  {} - Show this week's tasks", "wowtasks tasks list".cyan());

    Ok(())
}
