//! Error types for dsync-core

use std::path::PathBuf;

use crate::artifact::ArtifactKind;
use crate::remote::{RemoteError, RemoteOperation};

/// Result type for dsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dsync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Neither a definitions file nor a service identifier was given
    #[error("If no definitions file is specified, the {option} option must be set")]
    MissingIdentifier { kind: ArtifactKind, option: String },

    /// A remote source was selected but there is no service to talk to
    #[error(
        "No design service endpoint configured: pass --endpoint, set DSYNC_ENDPOINT, or add `endpoint` to the config file"
    )]
    EndpointNotConfigured,

    /// The design service rejected or failed a request
    #[error("{label}: {source}")]
    Remote {
        label: String,
        #[source]
        source: RemoteError,
    },

    /// The service answered with data of the wrong shape
    #[error("Unexpected {kind} definitions: {message}")]
    InvalidPayload { kind: ArtifactKind, message: String },

    /// A local definitions file is not strict JSON
    #[error("Definitions file {path} is not valid JSON: {source}")]
    InvalidDefinitionsFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file not found at an explicitly requested path
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedConfigFormat { extension: String },

    #[error("Unknown framework `{name}` (expected javascript or svelte)")]
    UnknownFramework { name: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from dsync-fs
    #[error(transparent)]
    Fs(#[from] dsync_fs::Error),

    /// Extraction or rendering error from dsync-blocks
    #[error(transparent)]
    Blocks(#[from] dsync_blocks::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap a service failure with the user-facing label of the operation.
    pub fn remote(operation: RemoteOperation, kind: ArtifactKind, source: RemoteError) -> Self {
        Self::Remote {
            label: operation.label(kind),
            source,
        }
    }

    /// Whether the error comes from a mistake the user can fix.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::MissingIdentifier { .. }
                | Self::EndpointNotConfigured
                | Self::ConfigNotFound { .. }
                | Self::UnknownFramework { .. }
                | Self::Remote {
                    source: RemoteError::Client { .. },
                    ..
                }
        )
    }
}
