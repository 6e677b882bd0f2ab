//! Reset command: wipe all local data

use colored::Colorize;

use crate::cli::CommandContext;
use crate::error::{Error, Result};
use crate::output;

pub fn run(ctx: &CommandContext, yes: bool) -> Result<()> {
    if !yes {
        return Err(Error::Other(
            "Refusing to wipe local data without --yes".to_string(),
        ));
    }

    let removed = ctx.wipe_local_data()?;
    log::debug!("Reset removed {} stored items", removed);

    output::print_outcome(
        &serde_json::json!({ "items_removed": removed }),
        ctx.format,
        || format!("{} Removed {} stored items", "✓".green(), removed),
    )
}
