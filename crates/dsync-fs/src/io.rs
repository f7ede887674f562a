//! Atomic I/O operations

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::Builder;

use crate::{Error, Result};

/// Write content atomically to a file.
///
/// Uses write-to-temp-then-rename so a reader never observes a partially
/// rewritten component file. The temp file is fsynced before the rename,
/// which is what makes a snapshot durable before a remote clear is issued.
/// The temp file is removed on every failure path.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;

    // Same directory as the target so the rename never crosses filesystems
    let prefix = format!(
        ".{}.",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default()
    );
    let mut temp_file = Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(|e| Error::io(parent, e))?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_file.path(), e))?;
    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| Error::io(temp_file.path(), e))?;

    temp_file
        .persist(path)
        .map_err(|e| Error::io(path, e.error))?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote file");
    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Read text content without blocking the async runtime.
pub async fn read_text_async(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::io(path, e))
}

/// Atomically write text content from async code.
///
/// The writer is blocking, so it runs on the blocking pool.
pub async fn write_text_async(path: &Path, content: String) -> Result<()> {
    let owned = path.to_path_buf();
    tokio::task::spawn_blocking(move || write_text(&owned, &content))
        .await
        .map_err(|e| Error::io(path, std::io::Error::other(e)))?
}
