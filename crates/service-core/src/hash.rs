//! Content hashing helpers.

use sha2::{Digest, Sha256};

/// SHA-256 of the input, as lowercase hex.
///
/// Used for signed-hash validation of uploaded blog content: the caller
/// proves it knows the stored content by sending its hash.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// MD5 of the input, as lowercase hex.
///
/// Used for legacy storage keys (click counters, feed item ids) where the
/// original data already uses MD5-derived keys.
pub fn md5_hex(input: &str) -> String {
    hex::encode(*md5::compute(input.as_bytes()))
}
