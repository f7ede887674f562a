//! SyncEngine implementation
//!
//! One run of the engine fetches a definition tree, scans the project for
//! component files, reconciles every component and, when asked to, clears
//! the remote copy after saving a snapshot of it.

use std::path::PathBuf;
use std::sync::Arc;

use dsync_blocks::{Anchor, Render, Template};
use dsync_fs::{FileIndex, IndexBuilder, io};
use serde_json::Value;

use super::reconcile::Reconciler;
use super::report::{DuplicateFile, SyncReport};
use crate::artifact::{ArtifactKind, Framework};
use crate::config::ProjectConfig;
use crate::definitions;
use crate::remote::{DesignService, RemoteOperation};
use crate::snapshot::write_snapshot;
use crate::{Error, Result};

/// Where the definitions of a run come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionSource {
    /// The design service, for the project or app `id`
    Remote { id: String },
    /// A strict JSON file, relative to the project root
    File(PathBuf),
}

impl DefinitionSource {
    /// Pick the source for `kind`: an explicit file wins, otherwise the
    /// identifier configured for the kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingIdentifier`] when neither is available.
    pub fn resolve(
        kind: ArtifactKind,
        file: Option<PathBuf>,
        config: &ProjectConfig,
    ) -> Result<Self> {
        if let Some(path) = file {
            return Ok(Self::File(path));
        }
        match config.identifier(kind) {
            Some(id) => Ok(Self::Remote { id: id.to_string() }),
            None => Err(Error::MissingIdentifier {
                kind,
                option: ProjectConfig::identifier_option(kind).to_string(),
            }),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }
}

/// Options for a sync run
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// If true, compute every change without modifying the filesystem or
    /// the service.
    pub dry_run: bool,
    /// Clear the remote definitions once they are saved locally.
    pub clear: bool,
}

/// Engine for synchronizing one kind of artifact in a project
pub struct SyncEngine {
    /// Project root scanned for component files
    root: PathBuf,
    kind: ArtifactKind,
    renderer: Arc<dyn Render>,
    anchor: Anchor,
    service: Option<Arc<dyn DesignService>>,
    snapshot_dir: PathBuf,
}

impl SyncEngine {
    /// Create an engine rendering with the default template for `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if the anchor pattern for the kind cannot be built.
    pub fn new(root: impl Into<PathBuf>, kind: ArtifactKind) -> Result<Self> {
        let root = root.into();
        let template = Template::new(kind.flavor(Framework::default()));
        Ok(Self {
            anchor: template.anchor()?,
            renderer: Arc::new(template),
            snapshot_dir: root.clone(),
            root,
            kind,
            service: None,
        })
    }

    /// Create an engine configured from project settings.
    pub fn from_config(
        root: impl Into<PathBuf>,
        kind: ArtifactKind,
        config: &ProjectConfig,
    ) -> Result<Self> {
        let root = root.into();
        let mut template = Template::new(kind.flavor(config.framework()));
        if let Some(package) = &config.package {
            template = template.with_package(package.clone());
        }

        let mut engine = Self::new(root.clone(), kind)?.with_template(template)?;
        if let Some(dir) = &config.snapshot_dir {
            engine = engine.with_snapshot_dir(root.join(dir));
        }
        Ok(engine)
    }

    /// Render with `template`, reading files back with its anchor.
    pub fn with_template(mut self, template: Template) -> Result<Self> {
        self.anchor = template.anchor()?;
        self.renderer = Arc::new(template);
        Ok(self)
    }

    pub fn with_service(mut self, service: Arc<dyn DesignService>) -> Self {
        self.service = Some(service);
        self
    }

    pub fn with_snapshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.snapshot_dir = dir.into();
        self
    }

    fn service(&self) -> Result<&Arc<dyn DesignService>> {
        self.service.as_ref().ok_or(Error::EndpointNotConfigured)
    }

    /// Load the raw definition tree from `source`.
    ///
    /// # Errors
    ///
    /// Fails when the file is unreadable or not strict JSON, when no service
    /// is configured for a remote source, or when the service fails.
    pub async fn load_definitions(&self, source: &DefinitionSource) -> Result<Value> {
        match source {
            DefinitionSource::File(path) => {
                let path = self.root.join(path);
                tracing::debug!(path = %path.display(), "Reading definitions file");
                let text = io::read_text_async(&path).await?;
                serde_json::from_str(&text)
                    .map_err(|source| Error::InvalidDefinitionsFile { path, source })
            }
            DefinitionSource::Remote { id } => self
                .service()?
                .fetch(self.kind, id)
                .await
                .map_err(|e| Error::remote(RemoteOperation::Load, self.kind, e)),
        }
    }

    /// Scan the project for component files of this kind.
    pub async fn build_index(&self) -> Result<FileIndex> {
        let builder = IndexBuilder::for_naming(self.kind.naming());
        Ok(builder.build(&self.root).await?)
    }

    /// Run one synchronization.
    ///
    /// Fetching and scanning run concurrently and either failing aborts the
    /// run. Component files are then reconciled independently; their
    /// failures are collected in the report. The clear phase only runs for a
    /// remote source, outside dry runs, and when every file succeeded.
    pub async fn sync(&self, source: &DefinitionSource, options: SyncOptions) -> Result<SyncReport> {
        if source.is_remote() {
            self.service()?;
        }

        let (raw, index) = tokio::try_join!(self.load_definitions(source), self.build_index())?;
        let tree = definitions::split(self.kind, raw.clone())?;
        tracing::debug!(
            kind = %self.kind,
            components = tree.len(),
            files = index.len(),
            "Reconciling definitions"
        );

        let mut report = SyncReport::new(self.kind, options.dry_run);
        report.duplicates = index.duplicates().iter().map(DuplicateFile::from).collect();

        Reconciler::new(
            self.kind,
            index,
            self.anchor.clone(),
            Arc::clone(&self.renderer),
        )
        .dry_run(options.dry_run)
        .reconcile(tree, &mut report)
        .await;

        if options.clear {
            self.clear(source, &raw, options.dry_run, &mut report).await?;
        }

        report.sort();
        tracing::info!(kind = %self.kind, "{}", report.summary());
        Ok(report)
    }

    async fn clear(
        &self,
        source: &DefinitionSource,
        raw: &Value,
        dry_run: bool,
        report: &mut SyncReport,
    ) -> Result<()> {
        let DefinitionSource::Remote { id } = source else {
            tracing::warn!("Definitions came from a local file, nothing to clear");
            return Ok(());
        };
        if dry_run {
            tracing::info!(kind = %self.kind, "[dry-run] Would clear remote definitions");
            return Ok(());
        }
        if !report.is_success() {
            tracing::warn!(
                failed = report.failed.len(),
                "Some files failed to update, keeping the remote definitions"
            );
            return Ok(());
        }

        let snapshot = write_snapshot(&self.snapshot_dir, self.kind, raw).await?;
        let checksum = snapshot.checksum.clone();
        report.snapshot = Some(snapshot);

        self.service()?
            .clear(self.kind, id, &checksum)
            .await
            .map_err(|e| Error::remote(RemoteOperation::Clear, self.kind, e))?;
        report.cleared = true;
        tracing::info!(kind = %self.kind, "Cleared remote definitions");
        Ok(())
    }
}
