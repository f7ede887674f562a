//! The design service seen from the sync engine
//!
//! [`DesignService`] is the only thing the engine knows about the remote side.
//! [`HttpDesignService`] talks to the real service; tests plug in their own.

mod http;

pub use http::{DEFAULT_TIMEOUT, HttpDesignService, classify_failure};

use async_trait::async_trait;
use serde_json::Value;

use crate::artifact::ArtifactKind;

/// Failure reported by a [`DesignService`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    /// The service rejected the request and said why
    #[error("{message}")]
    Client { message: String },

    /// Any other failure: an unexpected status or a broken connection
    #[error("{status}")]
    Transport { status: String },
}

/// What the engine was asking the service for when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOperation {
    Load,
    Clear,
}

impl RemoteOperation {
    /// User-facing label, e.g. `Failed to load Config`.
    pub fn label(self, kind: ArtifactKind) -> String {
        match self {
            Self::Load => format!("Failed to load {}", kind.title()),
            Self::Clear => format!("Failed to clear {}", kind.title()),
        }
    }
}

/// Remote source of definitions.
#[async_trait]
pub trait DesignService: Send + Sync {
    /// Fetch the definition tree of `kind` for the project or app `id`.
    async fn fetch(&self, kind: ArtifactKind, id: &str) -> Result<Value, RemoteError>;

    /// Acknowledge that the definitions with `checksum` were saved locally,
    /// allowing the service to discard them.
    async fn clear(&self, kind: ArtifactKind, id: &str, checksum: &str) -> Result<(), RemoteError>;

    /// Fetch the compiled stylesheet of project `id`, if the service has one.
    async fn fetch_stylesheet(&self, id: &str) -> Result<Option<String>, RemoteError>;
}
