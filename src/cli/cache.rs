//! Cache management commands

use serde::Serialize;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::models::CacheKeyDisplay;
use crate::output::formatters::{format_millis_local, format_size};
use crate::output::{self, json};

#[derive(Serialize)]
struct CacheReport {
    path: String,
    total_entries: usize,
    valid_entries: usize,
    expired_entries: usize,
    total_size_bytes: usize,
    total_size_human: String,
    oldest_entry: Option<i64>,
    newest_entry: Option<i64>,
    keys: Vec<CacheKeyDisplay>,
}

/// Show cache status/statistics
pub fn status(ctx: &CommandContext) -> Result<()> {
    let stats = ctx.cache.stats()?;
    let keys: Vec<CacheKeyDisplay> = ctx
        .cache
        .keys()?
        .into_iter()
        .map(|key| {
            let fresh = ctx.cache.has_valid(&key);
            let remaining = ctx.cache.remaining_ttl(&key);
            CacheKeyDisplay::new(key, fresh, remaining)
        })
        .collect();

    let report = CacheReport {
        path: ctx.storage_path().display().to_string(),
        total_entries: stats.total_entries,
        valid_entries: stats.valid_entries,
        expired_entries: stats.expired_entries,
        total_size_bytes: stats.total_size_bytes,
        total_size_human: format_size(stats.total_size_bytes),
        oldest_entry: stats.oldest_entry,
        newest_entry: stats.newest_entry,
        keys,
    };

    if ctx.format == OutputFormat::Json {
        println!("{}", json::format_json(&report)?);
        return Ok(());
    }

    println!("Cache Status");
    println!("────────────────────────────────────────");
    println!("Location:       {}", report.path);
    println!("Valid entries:  {}", report.valid_entries);
    println!("Expired:        {}", report.expired_entries);
    println!("Total size:     {}", report.total_size_human);
    if let Some(oldest) = report.oldest_entry {
        println!("Oldest entry:   {}", format_millis_local(oldest));
    }
    if let Some(newest) = report.newest_entry {
        println!("Newest entry:   {}", format_millis_local(newest));
    }

    if !report.keys.is_empty() {
        println!();
        output::print(&report.keys, OutputFormat::Table)?;
    }

    Ok(())
}

/// Clear one cache key, or every cache entry
pub fn clear(ctx: &CommandContext, key: Option<&str>) -> Result<()> {
    match key {
        Some(key) => {
            ctx.cache.clear(key)?;
            output::print_outcome(
                &serde_json::json!({ "key": key, "success": true }),
                ctx.format,
                || format!("Cleared cache key {}", key),
            )
        }
        None => {
            let stats = ctx.cache.clear_all()?;
            output::print_outcome(
                &serde_json::json!({ "entries_removed": stats.entries_removed, "success": true }),
                ctx.format,
                || {
                    if stats.entries_removed > 0 {
                        format!("Cleared {} cache entries", stats.entries_removed)
                    } else {
                        "Cache was already empty".to_string()
                    }
                },
            )
        }
    }
}

/// Print the local database path
pub fn path(ctx: &CommandContext) -> Result<()> {
    println!("{}", ctx.storage_path().display());
    Ok(())
}

