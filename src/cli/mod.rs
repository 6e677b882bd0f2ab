//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod cache;
pub mod character;
pub mod completions;
pub mod context;
pub mod init;
pub mod realms;
pub mod reps;
pub mod reset;
pub mod status;
pub mod tasks;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

use crate::client::Region;
use crate::tracker::Cadence;

/// wowtasks - Track World of Warcraft daily and weekly tasks
#[derive(Parser, Debug)]
#[command(name = "wowtasks")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "WOWTASKS_FORMAT",
        default_value = "table",
        hide_env = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "WOWTASKS_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "WOWTASKS_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Bypass cache, fetch fresh data from API
    #[arg(long, global = true, env = "WOWTASKS_NO_CACHE", hide_env = true)]
    pub no_cache: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save Battle.net API credentials to the config file
    Init {
        /// Battle.net client ID
        #[arg(long)]
        client_id: String,

        /// Battle.net client secret
        #[arg(long)]
        client_secret: String,

        /// Default region (eu, us, kr, tw)
        #[arg(long)]
        region: Option<Region>,
    },

    /// Show configuration, credentials and stored state health
    Status,

    /// Track daily and weekly tasks
    #[command(subcommand)]
    Tasks(TaskCommands),

    /// Manage the character used for reputation lookups
    #[command(subcommand)]
    Character(CharacterCommands),

    /// Browse realms
    #[command(subcommand)]
    Realms(RealmCommands),

    /// Show character reputations
    #[command(subcommand)]
    Reps(RepCommands),

    /// Manage local response cache
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Wipe all local data (progress, custom tasks, character, cache)
    Reset {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   wowtasks completion bash > /etc/bash_completion.d/wowtasks
  zsh:    wowtasks completion zsh > \"${fpath[1]}/_wowtasks\"
  fish:   wowtasks completion fish > ~/.config/fish/completions/wowtasks.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Task checklist subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List tasks with saved progress
    List {
        /// Expansion key (tww, df, bfa or a custom key)
        #[arg(long, short = 'e')]
        expansion: Option<String>,

        /// Only show one cadence
        #[arg(long, short = 'c', value_enum)]
        cadence: Option<Cadence>,

        /// Only show tasks not yet completed
        #[arg(long, short = 'p')]
        pending: bool,
    },

    /// Mark a task complete
    Done {
        /// Task ID
        id: String,
    },

    /// Mark a task not complete
    Undo {
        /// Task ID
        id: String,
    },

    /// Set progress on a countable task
    Count {
        /// Task ID
        id: String,

        /// New count
        count: u32,
    },

    /// Attach a note to a task (omit text to clear)
    Note {
        /// Task ID
        id: String,

        /// Note text
        text: Option<String>,
    },

    /// Add a custom task
    Add {
        /// Expansion key to add the task to
        #[arg(long, short = 'e')]
        expansion: Option<String>,

        /// Daily or weekly
        #[arg(long, short = 'c', value_enum, default_value = "weekly")]
        cadence: Cadence,

        /// Task name
        #[arg(long)]
        name: String,

        /// Short description
        #[arg(long)]
        subtitle: Option<String>,

        /// Make the task countable with this target
        #[arg(long)]
        target: Option<u32>,
    },

    /// Delete a custom task or hide a predefined one
    Delete {
        /// Task ID
        id: String,

        /// Expansion the task belongs to
        #[arg(long, short = 'e')]
        expansion: Option<String>,
    },

    /// Reset all task progress
    Reset,
}

/// Character subcommands
#[derive(Subcommand, Debug)]
pub enum CharacterCommands {
    /// Set the character
    Set {
        /// Character name
        name: String,

        /// Realm name or slug
        realm: String,

        /// Region (eu, us, kr, tw)
        region: Region,
    },

    /// Show the saved character
    Show,

    /// Forget the saved character
    Clear,
}

/// Realm subcommands
#[derive(Subcommand, Debug)]
pub enum RealmCommands {
    /// List realms in a region
    List {
        /// Region (defaults to the configured region)
        #[arg(long, short = 'r')]
        region: Option<Region>,
    },
}

/// Reputation subcommands
#[derive(Subcommand, Debug)]
pub enum RepCommands {
    /// List reputations for the saved character
    List,
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache statistics
    Status,
    /// Clear cached data
    Clear {
        /// Only clear this key (e.g. eu_realms)
        key: Option<String>,
    },
    /// Print the local database path
    Path,
}
