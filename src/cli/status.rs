//! Status command implementation

use colored::Colorize;
use serde::Serialize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::output::json;
use crate::vault::{Bucket, BucketHealth};

#[derive(Serialize)]
struct StatusReport {
    config_path: String,
    credentials: bool,
    region: String,
    data_path: String,
    character: Option<String>,
    buckets: Vec<BucketReport>,
}

#[derive(Serialize)]
struct BucketReport {
    bucket: String,
    state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl BucketReport {
    fn new(bucket: Bucket, health: BucketHealth) -> Self {
        let (state, version, error) = match health {
            BucketHealth::Empty => ("empty", None, None),
            BucketHealth::Valid { version } => ("ok", Some(version), None),
            BucketHealth::Corrupt(e) => ("corrupt", None, Some(e.to_string())),
        };
        Self {
            bucket: bucket.to_string(),
            state,
            version,
            error,
        }
    }
}

/// Show configuration, credentials and the health of stored state
pub fn run(opts: &GlobalOptions, ctx: &CommandContext) -> Result<()> {
    let config_path = Config::resolve_path(opts.config_ref())?;
    let buckets = Bucket::ALL
        .into_iter()
        .map(|bucket| Ok(BucketReport::new(bucket, ctx.vault.probe(bucket)?)))
        .collect::<Result<Vec<_>>>()?;

    let report = StatusReport {
        config_path: config_path.display().to_string(),
        credentials: ctx.config.has_credentials(),
        region: ctx.config.region.to_string(),
        data_path: ctx.storage_path().display().to_string(),
        character: ctx
            .character()?
            .map(|c| format!("{} @ {} ({})", c.name, c.realm, c.region)),
        buckets,
    };

    if ctx.format == OutputFormat::Json {
        println!("{}", json::format_json(&report)?);
        return Ok(());
    }

    println!("{}\n", "wowtasks Status".bold());
    println!("Config file: {}", report.config_path.cyan());
    println!("Data file:   {}", report.data_path.cyan());
    println!();

    if report.credentials {
        println!("{} Battle.net credentials configured", "✓".green());
    } else {
        println!("{} Battle.net credentials not configured", "✗".red());
        println!("  → Run 'wowtasks init --client-id <ID> --client-secret <SECRET>'");
    }
    println!("{} Region: {}", "✓".green(), report.region);

    match &report.character {
        Some(character) => println!("{} Character: {}", "✓".green(), character),
        None => {
            println!("{} No character set", "○".dimmed());
            println!("  → Run 'wowtasks character set <NAME> <REALM> <REGION>'");
        }
    }

    println!();
    for bucket in &report.buckets {
        match (bucket.state, bucket.version, &bucket.error) {
            ("ok", Some(version), _) => {
                println!("{} {} (schema v{})", "✓".green(), bucket.bucket, version)
            }
            ("corrupt", _, Some(error)) => println!(
                "{} {} unreadable, will be ignored: {}",
                "⚠".yellow(),
                bucket.bucket,
                error
            ),
            _ => println!("{} {} empty", "○".dimmed(), bucket.bucket),
        }
    }
    println!();

    Ok(())
}
