//! Content addressing
//!
//! Every stored version is keyed by the SHA-256 of its raw bytes, rendered as
//! 64 lowercase hex characters with no prefix. Records written by other
//! clients of the same store use this exact form, so it must not change.

use sha2::{Digest, Sha256};

/// Number of leading bytes inspected when classifying binary content.
pub const BINARY_SNIFF_LEN: usize = 8192;

/// Compute the hex-encoded SHA-256 of `content`.
pub fn content_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

/// Returns true if a NUL byte occurs within the first [`BINARY_SNIFF_LEN`] bytes.
pub fn is_binary(content: &[u8]) -> bool {
    let end = content.len().min(BINARY_SNIFF_LEN);
    content[..end].contains(&0)
}
