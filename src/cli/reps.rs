//! Reputation commands

use colored::Colorize;

use crate::catalog::ReputationCatalog;
use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::models::ReputationDisplay;
use crate::output::{self, json};

/// List reputations for the saved character, annotated with ways to raise them
pub async fn list(ctx: &CommandContext) -> Result<()> {
    let character = ctx.require_character()?;
    let reputations = ctx.client()?.reputations(&character, ctx.no_cache).await?;
    let enhanced = ReputationCatalog::embedded()?.enhance(reputations);

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&enhanced)?),
        OutputFormat::Table => {
            println!(
                "{} @ {} ({})\n",
                character.name.bold(),
                character.realm,
                character.region
            );
            let rows: Vec<ReputationDisplay> =
                enhanced.iter().map(ReputationDisplay::from).collect();
            output::print(&rows, OutputFormat::Table)?;
        }
    }

    Ok(())
}
