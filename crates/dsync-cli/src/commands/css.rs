//! Stylesheet command implementation

use colored::Colorize;
use dsync_core::{ArtifactKind, download_stylesheet};

use crate::context::ProjectContext;
use crate::error::{CliError, Result};

/// Run the css command: write the project stylesheet to `app.css`.
pub async fn run_css(ctx: &ProjectContext) -> Result<()> {
    let id = ctx
        .config
        .identifier(ArtifactKind::Style)
        .ok_or_else(|| CliError::user("The --project-id option must be set"))?;
    let service = ctx
        .service()?
        .ok_or(dsync_core::Error::EndpointNotConfigured)?;

    println!("{} Downloading stylesheet...", "=>".blue().bold());
    match download_stylesheet(service.as_ref(), id, &ctx.root).await? {
        Some(path) => println!("{} Wrote {}", "OK".green().bold(), path.display()),
        None => println!(
            "{} The design service has no stylesheet for this project",
            "SKIPPED".yellow().bold()
        ),
    }
    Ok(())
}
