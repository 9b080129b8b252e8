//! Command-line interface.

pub mod backup;
pub mod compare;
pub mod completions;
pub mod context;
pub mod output;
pub mod pull;
pub mod push;
pub mod run;
pub mod validate;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::config::Overrides;
use crate::core::constants;
use crate::error::Result;
use context::Context;

/// Tether - resolve deployment secrets from a remote store with a local fallback.
#[derive(Parser)]
#[command(
    name = "tether",
    about = "Resolve deployment secrets from a remote store with a local .env fallback",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the config file [default: .tether.toml]
    #[arg(long, global = true, env = "TETHER_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Where secrets come from. Each flag can also be set through its variable.
#[derive(Args, Debug, Default, Clone)]
pub struct SourceArgs {
    /// Secret name in the remote store
    #[arg(long, global = true, env = constants::ENV_SECRET_NAME, value_name = "NAME")]
    pub secret_name: Option<String>,

    /// Remote store region
    #[arg(long, global = true, env = constants::ENV_REGION, value_name = "REGION")]
    pub region: Option<String>,

    /// Local KEY=VALUE secrets file
    #[arg(long, global = true, env = constants::ENV_ENV_FILE, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Use a local directory as the remote store
    #[arg(long, global = true, env = constants::ENV_STORE_DIR, value_name = "DIR")]
    pub store_dir: Option<PathBuf>,
}

impl From<SourceArgs> for Overrides {
    fn from(args: SourceArgs) -> Self {
        Self {
            secret_name: args.secret_name,
            region: args.region,
            env_file: args.env_file,
            store_dir: args.store_dir,
        }
    }
}

/// Flags shared by the sync commands.
#[derive(Args, Debug, Default, Clone, Copy)]
pub struct SyncFlags {
    /// Show what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Overwrite the destination if it exists
    #[arg(short, long)]
    pub force: bool,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Upload the local env file to the remote secret
    Push {
        #[command(flatten)]
        flags: SyncFlags,
    },

    /// Download the remote secret into the local env file
    Pull {
        #[command(flatten)]
        flags: SyncFlags,
    },

    /// Save a timestamped copy of the remote secret
    Backup {
        #[command(flatten)]
        flags: SyncFlags,

        /// Directory for backup files [default: backups]
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Compare keys in the remote secret and the local env file
    Compare {
        #[command(flatten)]
        flags: SyncFlags,

        /// Also report shared keys whose values differ
        #[arg(long)]
        values: bool,
    },

    /// Resolve secrets (remote, then local fallback) and check required keys
    Validate {
        /// Required key (repeatable); replaces the configured set
        #[arg(long = "require", value_name = "KEY")]
        require: Vec<String>,

        /// Print `export KEY='value'` lines for `eval`
        #[arg(long)]
        export: bool,
    },

    /// Resolve and validate secrets, then run a command with them in its environment
    Run {
        /// Required key (repeatable); replaces the configured set
        #[arg(long = "require", value_name = "KEY")]
        require: Vec<String>,

        /// Command and arguments to run
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        command: Vec<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Execute a command.
pub fn execute(cli: Cli) -> Result<()> {
    use Command::*;

    let Cli {
        config,
        source,
        command,
        ..
    } = cli;
    // Completions must work without a readable config.
    let ctx = || Context::load(config.as_deref(), source.clone().into());

    match command {
        Push { flags } => push::execute(&ctx()?, flags),
        Pull { flags } => pull::execute(&ctx()?, flags),
        Backup { flags, dir } => backup::execute(&ctx()?, flags, dir),
        Compare { flags, values } => compare::execute(&ctx()?, flags, values),
        Validate { require, export } => validate::execute(&ctx()?, &require, export),
        Run { require, command } => run::execute(&ctx()?, &require, &command),
        Completions { shell } => completions::execute(shell),
    }
}
