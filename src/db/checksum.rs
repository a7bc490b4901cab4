//! Checksums for persisted optimization-run snapshots.

use sha2::{Digest, Sha256};

/// SHA-256 checksum of a run result, over its canonical JSON encoding.
///
/// Stored alongside the run so the snapshot can be verified untampered
/// before its schedule is committed to bookings.
pub fn run_result_checksum(result: &serde_json::Value) -> String {
    let canonical = result.to_string();
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}
