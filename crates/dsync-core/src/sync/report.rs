//! Report types for a synchronization run

use std::path::PathBuf;

use dsync_fs::DuplicateKey;
use serde::Serialize;

use crate::artifact::ArtifactKind;
use crate::snapshot::Snapshot;

/// A key the service sent for which no component file exists
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingFile {
    pub key: String,
    /// File name that would have been picked up, e.g. `card.sf.(ts|js)`
    pub expected: String,
}

/// A component file that could not be reconciled
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub key: String,
    pub path: PathBuf,
    pub message: String,
}

/// Two files competing for the same key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateFile {
    pub key: String,
    pub kept: PathBuf,
    pub ignored: PathBuf,
}

impl From<&DuplicateKey> for DuplicateFile {
    fn from(dup: &DuplicateKey) -> Self {
        Self {
            key: dup.key.clone(),
            kept: dup.kept.clone(),
            ignored: dup.replaced.clone(),
        }
    }
}

/// Outcome of a synchronization run
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub kind: ArtifactKind,
    /// Nothing was written
    pub dry_run: bool,
    /// Keys whose file was rewritten (or would be, in a dry run)
    pub updated: Vec<String>,
    /// Keys whose file already held the merged definition
    pub unchanged: Vec<String>,
    pub missing: Vec<MissingFile>,
    pub failed: Vec<FileFailure>,
    pub duplicates: Vec<DuplicateFile>,
    /// Snapshot written before the remote copy was cleared
    pub snapshot: Option<Snapshot>,
    /// The service acknowledged the clear
    pub cleared: bool,
}

impl SyncReport {
    pub fn new(kind: ArtifactKind, dry_run: bool) -> Self {
        Self {
            kind,
            dry_run,
            updated: Vec::new(),
            unchanged: Vec::new(),
            missing: Vec::new(),
            failed: Vec::new(),
            duplicates: Vec::new(),
            snapshot: None,
            cleared: false,
        }
    }

    /// No component file failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Sort every list by key, since tasks finish in any order.
    pub fn sort(&mut self) {
        self.updated.sort();
        self.unchanged.sort();
        self.missing.sort_by(|a, b| a.key.cmp(&b.key));
        self.failed.sort_by(|a, b| a.key.cmp(&b.key));
        self.duplicates.sort_by(|a, b| a.key.cmp(&b.key));
    }

    /// One-line summary for logs.
    pub fn summary(&self) -> String {
        format!(
            "{} updated, {} unchanged, {} missing, {} failed",
            self.updated.len(),
            self.unchanged.len(),
            self.missing.len(),
            self.failed.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_depends_on_failures_only() {
        let mut report = SyncReport::new(ArtifactKind::Style, false);
        report.missing.push(MissingFile {
            key: "card".into(),
            expected: "card.sf.(ts|js)".into(),
        });
        assert!(report.is_success());

        report.failed.push(FileFailure {
            key: "menu".into(),
            path: PathBuf::from("menu.sf.ts"),
            message: "bad literal".into(),
        });
        assert!(!report.is_success());
    }

    #[test]
    fn test_sort_and_summary() {
        let mut report = SyncReport::new(ArtifactKind::Theme, true);
        report.updated = vec!["b".into(), "a".into()];
        report.sort();
        assert_eq!(report.updated, vec!["a", "b"]);
        assert_eq!(report.summary(), "2 updated, 0 unchanged, 0 missing, 0 failed");
    }
}
