//! Local copies of remote definitions taken before a clear

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use dsync_fs::{compute_checksum, io};
use serde::Serialize;
use serde_json::Value;

use crate::Result;
use crate::artifact::ArtifactKind;

/// A snapshot written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub path: PathBuf,
    /// Lowercase hex SHA-256 of the file contents
    pub checksum: String,
}

/// `<kind>-<timestamp>.json`, e.g. `config-20240131T120000.000Z.json`.
pub fn snapshot_file_name(kind: ArtifactKind, at: DateTime<Utc>) -> String {
    format!("{}-{}.json", kind, at.format("%Y%m%dT%H%M%S%.3fZ"))
}

/// Write `tree` in compact form to a new snapshot file in `dir`.
///
/// The write is atomic and synced, so once this returns the snapshot
/// survives a crash.
pub async fn write_snapshot(dir: &Path, kind: ArtifactKind, tree: &Value) -> Result<Snapshot> {
    let data = serde_json::to_string(tree)?;
    let checksum = compute_checksum(data.as_bytes());
    let path = dir.join(snapshot_file_name(kind, Utc::now()));

    io::write_text_async(&path, data).await?;
    tracing::info!(path = %path.display(), checksum = %checksum, "Wrote snapshot");

    Ok(Snapshot { path, checksum })
}
