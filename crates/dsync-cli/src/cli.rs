//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use dsync_core::Framework;

/// design-sync - Keep component files in sync with the design service
#[derive(Parser, Debug)]
#[command(name = "dsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project config file, relative to the project root (default: designsync.config.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Project identifier for style, theme and css
    #[arg(short = 'p', long, global = true, value_name = "ID")]
    pub project_id: Option<String>,

    /// Application identifier for config
    #[arg(short = 'a', long, global = true, value_name = "ID")]
    pub app_id: Option<String>,

    /// Base URL of the design service
    #[arg(long, global = true, env = "DSYNC_ENDPOINT", value_name = "URL")]
    pub endpoint: Option<String>,

    /// Project root to scan (default: current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Update style definitions in `*.sf.(ts|js)` files
    Style(SyncArgs),

    /// Update theme definitions in `*.sft.(ts|js)` files
    Theme(SyncArgs),

    /// Update config definitions in `*.sfc.(ts|js)` files
    ///
    /// Examples:
    ///   dsync config -a my-app                 # Fetch from the service
    ///   dsync config -a my-app --clear         # Then clear the remote copy
    ///   dsync config defs/config.json          # Use a local definitions file
    Config {
        #[command(flatten)]
        sync: SyncArgs,

        /// Framework the generated files target
        #[arg(long, value_enum)]
        framework: Option<FrameworkArg>,

        /// Clear the remote definitions once saved (a snapshot is kept)
        #[arg(long)]
        clear: bool,
    },

    /// Download the project stylesheet to app.css
    Css,
}

/// Arguments shared by the synchronizing commands
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SyncArgs {
    /// Local definitions file (JSON) relative to the project root, used instead of the design service
    pub definitions: Option<PathBuf>,

    /// Preview changes without applying them
    #[arg(long)]
    pub dry_run: bool,

    /// Output the report as JSON for scripting
    #[arg(long)]
    pub json: bool,
}

/// Framework choices accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameworkArg {
    Javascript,
    Svelte,
}

impl From<FrameworkArg> for Framework {
    fn from(arg: FrameworkArg) -> Self {
        match arg {
            FrameworkArg::Javascript => Framework::Javascript,
            FrameworkArg::Svelte => Framework::Svelte,
        }
    }
}
