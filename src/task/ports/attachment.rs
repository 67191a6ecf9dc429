//! Attachment storage port.

use crate::task::domain::SubmissionFile;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for attachment store operations.
pub type AttachmentStoreResult<T> = Result<T, AttachmentStoreError>;

/// Metadata accompanying bytes handed to an [`AttachmentStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentMetadata {
    /// File name supplied by the uploader.
    pub original_name: String,
    /// MIME type of the content.
    pub content_type: String,
    /// Upload timestamp.
    pub uploaded_at: DateTime<Utc>,
}

/// Binary attachment storage.
///
/// Implementations must release any file handle or lock they acquire before
/// returning, on success and on error.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Stores bytes and returns a reference to them.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentStoreError::Persistence`] when the bytes cannot be
    /// written.
    async fn store(
        &self,
        bytes: &[u8],
        metadata: &AttachmentMetadata,
    ) -> AttachmentStoreResult<SubmissionFile>;

    /// Reads the bytes behind a reference.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentStoreError::NotFound`] when nothing is stored under
    /// the reference and [`AttachmentStoreError::Corrupted`] when the stored
    /// bytes no longer match the recorded digest.
    async fn retrieve(&self, reference: &SubmissionFile) -> AttachmentStoreResult<Vec<u8>>;

    /// Deletes the bytes behind a reference.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentStoreError::NotFound`] when nothing is stored under
    /// the reference.
    async fn remove(&self, reference: &SubmissionFile) -> AttachmentStoreResult<()>;
}

/// Errors returned by attachment store implementations.
#[derive(Debug, Clone, Error)]
pub enum AttachmentStoreError {
    /// No bytes are stored under the file name.
    #[error("attachment not found: {0}")]
    NotFound(String),

    /// The stored file name is unusable (empty or contains path separators).
    #[error("invalid attachment file name: {0}")]
    InvalidFileName(String),

    /// Stored bytes do not match the recorded digest.
    #[error("attachment {0} failed its integrity check")]
    Corrupted(String),

    /// Storage-layer failure.
    #[error("storage error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AttachmentStoreError {
    /// Wraps a storage error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
