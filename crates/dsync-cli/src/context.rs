//! Project context resolution
//!
//! Works out the project root and the effective settings for a command:
//! the config file first, then command-line values on top.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dsync_core::{DesignService, HttpDesignService, ProjectConfig};

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Root and settings a command runs with
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub root: PathBuf,
    pub config: ProjectConfig,
}

impl ProjectContext {
    /// Resolve the context for `cli`, relative to `cwd`.
    pub fn resolve(cli: &Cli, cwd: &Path) -> Result<Self> {
        let root = match &cli.root {
            Some(root) => cwd.join(root),
            None => cwd.to_path_buf(),
        };
        if !root.is_dir() {
            return Err(CliError::user(format!(
                "Project root {} is not a directory",
                root.display()
            )));
        }

        // Like definitions files, an explicit config path is relative to the root
        let file_config = match &cli.config {
            Some(path) => ProjectConfig::load(&root.join(path))?,
            None => ProjectConfig::load_default(&root)?,
        };

        let config = file_config.with_overrides(ProjectConfig {
            project_id: cli.project_id.clone(),
            app_id: cli.app_id.clone(),
            endpoint: cli.endpoint.clone(),
            ..Default::default()
        });
        tracing::debug!(root = %root.display(), ?config, "Resolved project context");

        Ok(Self { root, config })
    }

    /// HTTP client for the configured endpoint, if there is one.
    pub fn service(&self) -> Result<Option<Arc<dyn DesignService>>> {
        let Some(endpoint) = self.config.endpoint.as_deref() else {
            return Ok(None);
        };
        let service = HttpDesignService::new(endpoint).map_err(|e| {
            CliError::user(format!("Cannot create a client for {endpoint}: {e}"))
        })?;
        Ok(Some(Arc::new(service)))
    }
}
