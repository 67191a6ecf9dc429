//! Attachment reference stored on a submitted task.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Longest sanitised original name kept inside a stored file name.
const MAX_NAME_STEM: usize = 120;

/// Reference to stored submission bytes plus their metadata.
///
/// The bytes themselves live behind an
/// [`AttachmentStore`](crate::task::ports::AttachmentStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionFile {
    /// Unique name under which the bytes are stored.
    pub filename: String,
    /// Storage location reported by the store.
    pub path: String,
    /// File name supplied by the uploader.
    pub original_name: String,
    /// Upload timestamp.
    pub uploaded_at: DateTime<Utc>,
    /// Stored size in bytes.
    pub size_bytes: u64,
    /// MIME type declared at upload.
    pub content_type: String,
    /// Lowercase hex SHA-256 digest of the stored bytes.
    pub sha256: String,
}

/// Builds a collision-resistant storage name from the uploader's file name.
///
/// The result is `<millis>-<random>-<name>` where `<name>` keeps only ASCII
/// alphanumerics, `.`, `-` and `_` from the original.
#[must_use]
pub fn unique_file_name(original_name: &str, at: DateTime<Utc>) -> String {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let sanitised: String = base
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
                ch
            } else {
                '_'
            }
        })
        .take(MAX_NAME_STEM)
        .collect();
    let stem = sanitised.trim_start_matches('.');
    let name = if stem.is_empty() { "upload" } else { stem };
    format!(
        "{}-{}-{name}",
        at.timestamp_millis(),
        Uuid::new_v4().simple()
    )
}

/// Returns the lowercase hex SHA-256 digest of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
