//! Core reconciliation layer for design-sync
//!
//! This crate ties the Layer 0 crates together:
//!
//! - **Merge**: structural merge of definitions with null-as-delete
//! - **Definitions**: splitting service responses into per-component trees
//! - **Remote**: the [`DesignService`] seam and its HTTP implementation
//! - **SyncEngine**: fetch, scan, reconcile and clear in one run
//! - **Configuration**: the project settings file
//!
//! # Architecture
//!
//! ```text
//!                 dsync-cli
//!                     |
//!                 dsync-core
//!                     |
//!           +---------+---------+
//!           |                   |
//!       dsync-fs           dsync-blocks
//! ```
//!
//! # Example
//!
//! ```ignore
//! use dsync_core::{ArtifactKind, DefinitionSource, SyncEngine, SyncOptions};
//!
//! let engine = SyncEngine::new(root, ArtifactKind::Style)?.with_service(service);
//! let source = DefinitionSource::Remote { id: "project-id".into() };
//! let report = engine.sync(&source, SyncOptions::default()).await?;
//! ```

pub mod artifact;
pub mod config;
pub mod definitions;
pub mod error;
pub mod merge;
pub mod remote;
pub mod snapshot;
pub mod stylesheet;
pub mod sync;

pub use artifact::{ArtifactKind, Framework};
pub use config::{DEFAULT_CONFIG_FILE, ProjectConfig};
pub use definitions::{DefinitionTree, split};
pub use error::{Error, Result};
pub use merge::{MergeOptions, merge};
pub use remote::{DesignService, HttpDesignService, RemoteError, RemoteOperation};
pub use snapshot::{Snapshot, write_snapshot};
pub use stylesheet::{STYLESHEET_FILE, download_stylesheet};
pub use sync::{
    DefinitionSource, DuplicateFile, FileFailure, FileOutcome, MissingFile, Reconciler,
    SyncEngine, SyncOptions, SyncReport,
};
