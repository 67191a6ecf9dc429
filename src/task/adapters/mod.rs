//! Adapter implementations for task ports.

pub mod filesystem;
pub mod memory;
pub mod postgres;

use crate::task::{
    domain::{SubmissionFile, sha256_hex, unique_file_name},
    ports::{AttachmentMetadata, AttachmentStoreError, AttachmentStoreResult},
};

/// Returns the stored file name of a reference, rejecting anything that is
/// not a single path component.
fn stored_file_name(reference: &SubmissionFile) -> AttachmentStoreResult<&str> {
    let name = reference.filename.as_str();
    let is_valid = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0']);
    if !is_valid {
        return Err(AttachmentStoreError::InvalidFileName(name.to_owned()));
    }
    Ok(name)
}

/// Builds the reference for bytes about to be stored under `location`.
fn describe_attachment(
    bytes: &[u8],
    metadata: &AttachmentMetadata,
    location: impl FnOnce(&str) -> String,
) -> SubmissionFile {
    let filename = unique_file_name(&metadata.original_name, metadata.uploaded_at);
    SubmissionFile {
        path: location(&filename),
        filename,
        original_name: metadata.original_name.clone(),
        uploaded_at: metadata.uploaded_at,
        size_bytes: u64::try_from(bytes.len()).unwrap_or(u64::MAX),
        content_type: metadata.content_type.clone(),
        sha256: sha256_hex(bytes),
    }
}

/// Verifies stored bytes against the digest recorded in the reference.
fn verify_digest(reference: &SubmissionFile, bytes: Vec<u8>) -> AttachmentStoreResult<Vec<u8>> {
    if sha256_hex(&bytes) != reference.sha256 {
        return Err(AttachmentStoreError::Corrupted(reference.filename.clone()));
    }
    Ok(bytes)
}
