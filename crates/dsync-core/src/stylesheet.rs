//! Downloading the compiled project stylesheet

use std::path::{Path, PathBuf};

use dsync_fs::io;

use crate::remote::DesignService;
use crate::{Error, Result};

/// File the stylesheet is written to, in the project root.
pub const STYLESHEET_FILE: &str = "app.css";

/// Fetch the stylesheet of project `id` and write it to `root/app.css`.
///
/// Returns the written path, or `None` when the service has no stylesheet
/// for the project (nothing is written then).
pub async fn download_stylesheet(
    service: &dyn DesignService,
    id: &str,
    root: &Path,
) -> Result<Option<PathBuf>> {
    let css = service
        .fetch_stylesheet(id)
        .await
        .map_err(|source| Error::Remote {
            label: "Failed to load CSS".to_string(),
            source,
        })?;

    let Some(css) = css else {
        tracing::warn!(project = id, "No stylesheet available");
        return Ok(None);
    };

    let path = root.join(STYLESHEET_FILE);
    io::write_text_async(&path, css).await?;
    tracing::info!(path = %path.display(), "Wrote stylesheet");
    Ok(Some(path))
}
