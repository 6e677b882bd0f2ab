//! wowtasks - Terminal tracker for World of Warcraft daily and weekly tasks

use clap::Parser;

mod cache;
mod catalog;
mod cli;
mod client;
mod clock;
mod config;
mod error;
mod models;
mod output;
mod storage;
mod tracker;
mod vault;

use cli::{
    CacheCommands, CharacterCommands, Cli, CommandContext, Commands, GlobalOptions,
    RealmCommands, RepCommands, TaskCommands,
};
use error::Result;
use tracker::NewTask;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    // Commands that never open the local database
    match &cli.command {
        Commands::Init {
            client_id,
            client_secret,
            region,
        } => return cli::init::run(&opts, client_id, client_secret, *region),
        Commands::Completion { shell } => {
            cli::completions::run(*shell);
            return Ok(());
        }
        _ => {}
    }

    let ctx = CommandContext::new(&opts)?;

    match cli.command {
        Commands::Init { .. } | Commands::Completion { .. } => Ok(()),
        Commands::Status => cli::status::run(&opts, &ctx),
        Commands::Tasks(cmd) => match cmd {
            TaskCommands::List {
                expansion,
                cadence,
                pending,
            } => cli::tasks::list(&ctx, expansion.as_deref(), cadence, pending),
            TaskCommands::Done { id } => cli::tasks::set_done(&ctx, &id, true),
            TaskCommands::Undo { id } => cli::tasks::set_done(&ctx, &id, false),
            TaskCommands::Count { id, count } => cli::tasks::count(&ctx, &id, count),
            TaskCommands::Note { id, text } => cli::tasks::note(&ctx, &id, text),
            TaskCommands::Add {
                expansion,
                cadence,
                name,
                subtitle,
                target,
            } => cli::tasks::add(
                &ctx,
                expansion.as_deref(),
                cadence,
                NewTask {
                    name,
                    subtitle,
                    target_count: target,
                    notes: None,
                },
            ),
            TaskCommands::Delete { id, expansion } => {
                cli::tasks::delete(&ctx, &id, expansion.as_deref())
            }
            TaskCommands::Reset => cli::tasks::reset(&ctx),
        },
        Commands::Character(cmd) => match cmd {
            CharacterCommands::Set {
                name,
                realm,
                region,
            } => cli::character::set(&ctx, &name, &realm, region),
            CharacterCommands::Show => cli::character::show(&ctx),
            CharacterCommands::Clear => cli::character::clear(&ctx),
        },
        Commands::Realms(RealmCommands::List { region }) => cli::realms::list(&ctx, region).await,
        Commands::Reps(RepCommands::List) => cli::reps::list(&ctx).await,
        Commands::Cache(cmd) => match cmd {
            CacheCommands::Status => cli::cache::status(&ctx),
            CacheCommands::Clear { key } => cli::cache::clear(&ctx, key.as_deref()),
            CacheCommands::Path => cli::cache::path(&ctx),
        },
        Commands::Reset { yes } => cli::reset::run(&ctx, yes),
    }
}

/// `--debug` forces debug level; otherwise `RUST_LOG` applies, defaulting to warn
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}
