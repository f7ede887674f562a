//! Reconciling component files with the design service
//!
//! This module provides:
//! - **engine**: one synchronization run, from fetching definitions to the
//!   optional clear of the remote copy
//! - **reconcile**: the per-component read, merge, render and write step
//! - **report**: what a run changed, skipped and failed on

mod engine;
mod reconcile;
mod report;

pub use engine::{DefinitionSource, SyncEngine, SyncOptions};
pub use reconcile::{FileOutcome, Reconciler};
pub use report::{DuplicateFile, FileFailure, MissingFile, SyncReport};
