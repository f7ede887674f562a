//! Style, theme and config command implementation
//!
//! All three commands run the same synchronization; they differ in the
//! artifact kind and in which identifier selects the remote definitions.

use std::path::PathBuf;

use colored::Colorize;
use dsync_core::{ArtifactKind, DefinitionSource, Framework, SyncEngine, SyncOptions, SyncReport};

use crate::context::ProjectContext;
use crate::error::{CliError, Result};

/// What the user asked a sync command to do
#[derive(Debug, Clone, Default)]
pub struct SyncRequest {
    pub definitions: Option<PathBuf>,
    pub dry_run: bool,
    pub json: bool,
    pub clear: bool,
    pub framework: Option<Framework>,
}

/// Run a sync command for `kind`.
///
/// Exits with an error when any component file failed to update.
pub async fn run_sync(ctx: &ProjectContext, kind: ArtifactKind, request: SyncRequest) -> Result<()> {
    let mut config = ctx.config.clone();
    if request.framework.is_some() {
        config.framework = request.framework;
    }

    let source = DefinitionSource::resolve(kind, request.definitions, &config)?;
    let mut engine = SyncEngine::from_config(&ctx.root, kind, &config)?;
    if source.is_remote() {
        let service = ctx
            .service()?
            .ok_or(dsync_core::Error::EndpointNotConfigured)?;
        engine = engine.with_service(service);
    }

    if !request.json {
        let verb = if request.dry_run { "Previewing" } else { "Updating" };
        println!("{} {} {} definitions...", "=>".blue().bold(), verb, kind);
    }

    let options = SyncOptions {
        dry_run: request.dry_run,
        clear: request.clear,
    };
    let report = engine.sync(&source, options).await?;

    if request.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if !report.is_success() {
        return Err(CliError::user(format!(
            "{} component file(s) failed to update",
            report.failed.len()
        )));
    }
    Ok(())
}

fn print_report(report: &SyncReport) {
    let updated_label = if report.dry_run {
        "WOULD UPDATE".yellow().bold()
    } else {
        "UPDATED".green().bold()
    };
    for key in &report.updated {
        println!("   {} {}", updated_label, key.cyan());
    }
    for key in &report.unchanged {
        println!("   {} {}", "UNCHANGED".dimmed(), key);
    }
    for missing in &report.missing {
        println!(
            "   {} File {} is missing",
            "MISSING".yellow().bold(),
            missing.expected.cyan()
        );
    }
    for dup in &report.duplicates {
        println!(
            "   {} {} also matches {} (ignored)",
            "DUPLICATE".yellow().bold(),
            dup.kept.display(),
            dup.ignored.display()
        );
    }
    for failure in &report.failed {
        println!(
            "   {} {} ({}): {}",
            "FAILED".red().bold(),
            failure.key.cyan(),
            failure.path.display().to_string().dimmed(),
            failure.message
        );
    }
    if let Some(snapshot) = &report.snapshot {
        println!(
            "   {} Saved snapshot {}",
            "SNAPSHOT".blue().bold(),
            snapshot.path.display()
        );
    }
    if report.cleared {
        println!("   {} Remote {} definitions cleared", "CLEARED".blue().bold(), report.kind);
    }

    println!();
    if report.is_success() {
        let prefix = if report.dry_run { "[dry-run] " } else { "" };
        println!("{} {}{}", "OK".green().bold(), prefix, report.summary());
    } else {
        println!("{} {}", "ERROR".red().bold(), report.summary());
    }
}
