//! Per-component reconciliation

use std::path::Path;
use std::sync::Arc;

use dsync_blocks::{Anchor, Render};
use dsync_fs::{FileIndex, io};
use serde_json::Value;

use super::report::{FileFailure, MissingFile, SyncReport};
use crate::Result;
use crate::artifact::ArtifactKind;
use crate::definitions::DefinitionTree;
use crate::merge::{MergeOptions, merge};

/// What happened to one component file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Updated,
    Unchanged,
}

/// Applies a [`DefinitionTree`] to the files of a [`FileIndex`].
///
/// Every key is handled by its own task. A key that fails is recorded and
/// does not stop the others.
#[derive(Clone)]
pub struct Reconciler {
    kind: ArtifactKind,
    index: Arc<FileIndex>,
    anchor: Arc<Anchor>,
    renderer: Arc<dyn Render>,
    merge_options: MergeOptions,
    dry_run: bool,
}

impl Reconciler {
    pub fn new(
        kind: ArtifactKind,
        index: FileIndex,
        anchor: Anchor,
        renderer: Arc<dyn Render>,
    ) -> Self {
        Self {
            kind,
            index: Arc::new(index),
            anchor: Arc::new(anchor),
            renderer,
            merge_options: kind.merge_options(),
            dry_run: false,
        }
    }

    /// Compute every change but write nothing.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Reconcile every key of `tree`, recording outcomes in `report`.
    ///
    /// Returns once all keys have settled.
    pub async fn reconcile(&self, tree: DefinitionTree, report: &mut SyncReport) {
        let naming = self.kind.naming();
        let mut tasks = Vec::with_capacity(tree.len());

        for (key, definition) in tree {
            let Some(path) = self.index.get(&key).map(Path::to_path_buf) else {
                let expected = naming.expected_file_name(&key);
                tracing::warn!(key = %key, "File {expected} is missing");
                report.missing.push(MissingFile { key, expected });
                continue;
            };

            let this = self.clone();
            let task_key = key.clone();
            let task_path = path.clone();
            let handle = tokio::spawn(async move {
                this.reconcile_file(&task_key, &task_path, &definition).await
            });
            tasks.push((key, path, handle));
        }

        for (key, path, handle) in tasks {
            let result = match handle.await {
                Ok(result) => result.map_err(|e| e.to_string()),
                Err(join_error) => Err(format!("reconcile task aborted: {join_error}")),
            };

            match result {
                Ok(FileOutcome::Updated) => report.updated.push(key),
                Ok(FileOutcome::Unchanged) => report.unchanged.push(key),
                Err(message) => {
                    tracing::error!(key = %key, path = %path.display(), "{message}");
                    report.failed.push(FileFailure { key, path, message });
                }
            }
        }
    }

    /// Read, extract, merge, render and write one component file.
    pub async fn reconcile_file(
        &self,
        key: &str,
        path: &Path,
        definition: &Value,
    ) -> Result<FileOutcome> {
        let current = io::read_text_async(path).await?;
        let previous = self.anchor.extract_definition(&current)?;
        let merged = merge(&previous, definition, self.merge_options);
        let rendered = self.renderer.render(key, &merged)?;

        if rendered == current {
            tracing::debug!(key, path = %path.display(), "Component file up to date");
            return Ok(FileOutcome::Unchanged);
        }

        if self.dry_run {
            tracing::info!(key, path = %path.display(), "[dry-run] Would update component file");
        } else {
            io::write_text_async(path, rendered).await?;
            tracing::debug!(key, path = %path.display(), "Updated component file");
        }
        Ok(FileOutcome::Updated)
    }
}
