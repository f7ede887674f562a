//! SHA-256 checksum utilities
//!
//! The design service acknowledges a clear request only when the checksum it
//! receives matches the bytes it served, so the format here is the bare
//! lowercase hex digest with no prefix.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 checksum of raw bytes as lowercase hex.
pub fn compute_checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}
