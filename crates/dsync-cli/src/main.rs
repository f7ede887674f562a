//! design-sync CLI
//!
//! Pulls style, theme and config definitions from the design service into
//! the component files of a project.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, SyncArgs};
use commands::SyncRequest;
use context::ProjectContext;
use dsync_core::ArtifactKind;
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` applies unless `--verbose` asks for everything.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let initialized = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
    if initialized.is_ok() {
        tracing::debug!("Verbose mode enabled");
    }
}

async fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let ctx = ProjectContext::resolve(&cli, &cwd)?;

    match cli.command {
        Commands::Style(args) => {
            commands::run_sync(&ctx, ArtifactKind::Style, request(args)).await
        }
        Commands::Theme(args) => {
            commands::run_sync(&ctx, ArtifactKind::Theme, request(args)).await
        }
        Commands::Config {
            sync,
            framework,
            clear,
        } => {
            let request = SyncRequest {
                clear,
                framework: framework.map(Into::into),
                ..request(sync)
            };
            commands::run_sync(&ctx, ArtifactKind::Config, request).await
        }
        Commands::Css => commands::run_css(&ctx).await,
    }
}

fn request(args: SyncArgs) -> SyncRequest {
    SyncRequest {
        definitions: args.definitions,
        dry_run: args.dry_run,
        json: args.json,
        ..Default::default()
    }
}
