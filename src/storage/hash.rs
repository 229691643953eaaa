//! Content hashing for the store.
//!
//! A SHA256 fingerprint of the record set lets `extract` tell whether a
//! re-extraction changed anything before rewriting the file.

use crate::model::Task;
use sha2::{Digest, Sha256};

/// Compute a SHA256 hash of a record set.
///
/// Each task is serialized to JSON and fed to the hasher in order, so the
/// hash changes with any field value or with record order.
#[must_use]
pub fn content_hash(tasks: &[Task]) -> String {
    let mut hasher = Sha256::new();
    for task in tasks {
        // Task has only string, enum and timestamp fields; serialization cannot fail.
        let json = serde_json::to_vec(task).unwrap_or_default();
        hasher.update(&json);
        hasher.update(b"\n");
    }
    format!("{:x}", hasher.finalize())
}
