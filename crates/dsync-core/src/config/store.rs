//! Format-agnostic configuration loading

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::{Error, Result};

/// Serialization format of a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Detect the format from the file extension:
    /// - `.json` -> JSON
    /// - `.toml` -> TOML
    /// - `.yaml`, `.yml` -> YAML
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedConfigFormat { extension }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Toml => "TOML",
            Self::Yaml => "YAML",
        }
    }

    /// Deserialize `content`; `path` is only used in error messages.
    pub fn parse<T: DeserializeOwned>(self, content: &str, path: &Path) -> Result<T> {
        let parsed = match self {
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        };

        parsed.map_err(|message| Error::ConfigParse {
            path: path.to_path_buf(),
            format: self.name().into(),
            message,
        })
    }
}

/// Load a configuration file, detecting the format from its extension.
///
/// # Errors
///
/// Returns [`Error::ConfigNotFound`] when the file does not exist and
/// [`Error::ConfigParse`] when it cannot be deserialized.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = ConfigFormat::from_path(path)?;
    if !path.is_file() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = dsync_fs::io::read_text(path)?;
    tracing::debug!(path = %path.display(), format = format.name(), "Loading config");
    format.parse(&content, path)
}
