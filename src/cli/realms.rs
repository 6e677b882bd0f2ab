//! Realm commands

use crate::cli::{CommandContext, OutputFormat};
use crate::client::Region;
use crate::error::Result;
use crate::models::RealmDisplay;
use crate::output::{self, json};

/// List realms in a region, sorted by name
pub async fn list(ctx: &CommandContext, region: Option<Region>) -> Result<()> {
    let region = region.unwrap_or(ctx.config.region);
    let realms = ctx.client()?.realms(region, ctx.no_cache).await?;
    log::debug!("{} realms in {}", realms.len(), region);

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&realms)?),
        OutputFormat::Table => {
            let rows: Vec<RealmDisplay> = realms.iter().map(RealmDisplay::from).collect();
            output::print(&rows, OutputFormat::Table)?;
        }
    }

    Ok(())
}
