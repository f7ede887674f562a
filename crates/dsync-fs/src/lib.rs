//! Filesystem layer for design-sync
//!
//! Provides atomic file writes, content checksums, and the component file
//! index that maps component keys to their source files.

pub mod checksum;
pub mod error;
pub mod index;
pub mod io;

pub use checksum::compute_checksum;
pub use error::{Error, Result};
pub use index::{DuplicateKey, FileIndex, FileNaming, IndexBuilder, default_include};
