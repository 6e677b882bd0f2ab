//! Character commands

use colored::Colorize;

use crate::cli::{CommandContext, OutputFormat};
use crate::client::{CharacterInfo, Region};
use crate::error::Result;
use crate::output::{self, json};
use crate::vault::Bucket;

/// Save the character used for reputation lookups
pub fn set(ctx: &CommandContext, name: &str, realm: &str, region: Region) -> Result<()> {
    let character = CharacterInfo::new(name, realm, region);
    ctx.vault.save(&character)?;

    output::print_outcome(&character, ctx.format, || {
        format!(
            "{} Character set to {} ({}, {})",
            "✓".green(),
            character.name.bold(),
            character.realm,
            character.region
        )
    })
}

pub fn show(ctx: &CommandContext) -> Result<()> {
    let character = ctx.character()?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&character)?),
        OutputFormat::Table => match character {
            Some(c) => {
                println!("Name:   {}", c.name.bold());
                println!("Realm:  {}", c.realm);
                println!("Region: {}", c.region);
            }
            None => {
                println!("{} No character set", "○".dimmed());
                println!("  → Run 'wowtasks character set <NAME> <REALM> <REGION>'");
            }
        },
    }

    Ok(())
}

pub fn clear(ctx: &CommandContext) -> Result<()> {
    ctx.vault.reset(Bucket::CharacterInfo)?;

    output::print_outcome(&serde_json::json!({ "cleared": true }), ctx.format, || {
        "Character cleared".to_string()
    })
}
