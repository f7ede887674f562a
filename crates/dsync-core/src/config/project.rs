//! Project settings file

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::store::load_config;
use crate::Result;
use crate::artifact::{ArtifactKind, Framework};

/// Config file looked up in the project root when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "designsync.config.json";

/// Settings for a project synchronized with the design service.
///
/// Every field is optional. Keys are snake_case; the camelCase spelling used
/// by JavaScript tooling is accepted too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Identifies style and theme definitions
    #[serde(alias = "projectId")]
    pub project_id: Option<String>,

    /// Identifies config definitions
    #[serde(alias = "appId")]
    pub app_id: Option<String>,

    /// Base URL of the design service
    pub endpoint: Option<String>,

    /// Framework the config files target
    pub framework: Option<Framework>,

    /// Package the generated files import factories from
    pub package: Option<String>,

    /// Where clear snapshots are written, relative to the project root
    #[serde(alias = "snapshotDir")]
    pub snapshot_dir: Option<PathBuf>,
}

impl ProjectConfig {
    /// Load settings from `path`.
    ///
    /// # Errors
    ///
    /// Fails when the file is missing, has an unknown extension, or cannot be
    /// parsed.
    pub fn load(path: &Path) -> Result<Self> {
        load_config(path)
    }

    /// Load [`DEFAULT_CONFIG_FILE`] from `root`, or defaults when it is absent.
    pub fn load_default(root: &Path) -> Result<Self> {
        let path = root.join(DEFAULT_CONFIG_FILE);
        if path.is_file() {
            Self::load(&path)
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Overlay `overrides`: every value it sets wins.
    pub fn with_overrides(self, overrides: ProjectConfig) -> Self {
        Self {
            project_id: overrides.project_id.or(self.project_id),
            app_id: overrides.app_id.or(self.app_id),
            endpoint: overrides.endpoint.or(self.endpoint),
            framework: overrides.framework.or(self.framework),
            package: overrides.package.or(self.package),
            snapshot_dir: overrides.snapshot_dir.or(self.snapshot_dir),
        }
    }

    /// The service identifier for `kind`: the app id for config, the
    /// project id otherwise.
    pub fn identifier(&self, kind: ArtifactKind) -> Option<&str> {
        match kind {
            ArtifactKind::Config => self.app_id.as_deref(),
            ArtifactKind::Style | ArtifactKind::Theme => self.project_id.as_deref(),
        }
    }

    /// Name of the option that sets [`Self::identifier`] for `kind`.
    pub fn identifier_option(kind: ArtifactKind) -> &'static str {
        match kind {
            ArtifactKind::Config => "--app-id",
            ArtifactKind::Style | ArtifactKind::Theme => "--project-id",
        }
    }

    pub fn framework(&self) -> Framework {
        self.framework.unwrap_or_default()
    }
}
