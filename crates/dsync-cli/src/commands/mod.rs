//! Command implementations for dsync-cli

pub mod css;
pub mod sync;

pub use css::run_css;
pub use sync::{SyncRequest, run_sync};
