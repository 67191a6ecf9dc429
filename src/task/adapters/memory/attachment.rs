//! In-memory attachment store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::super::{describe_attachment, stored_file_name, verify_digest};
use crate::task::{
    domain::SubmissionFile,
    ports::{AttachmentMetadata, AttachmentStore, AttachmentStoreError, AttachmentStoreResult},
};

/// Thread-safe attachment store keeping bytes in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttachmentStore {
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryAttachmentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored attachments.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentStoreError::Persistence`] if the lock is poisoned.
    pub fn len(&self) -> AttachmentStoreResult<usize> {
        let files = self.files.read().map_err(|err| {
            AttachmentStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(files.len())
    }

    /// Returns whether no attachment is stored.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentStoreError::Persistence`] if the lock is poisoned.
    pub fn is_empty(&self) -> AttachmentStoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl AttachmentStore for InMemoryAttachmentStore {
    async fn store(
        &self,
        bytes: &[u8],
        metadata: &AttachmentMetadata,
    ) -> AttachmentStoreResult<SubmissionFile> {
        let reference = describe_attachment(bytes, metadata, |name| format!("memory://{name}"));
        let mut files = self.files.write().map_err(|err| {
            AttachmentStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        files.insert(reference.filename.clone(), bytes.to_vec());
        Ok(reference)
    }

    async fn retrieve(&self, reference: &SubmissionFile) -> AttachmentStoreResult<Vec<u8>> {
        let name = stored_file_name(reference)?;
        let files = self.files.read().map_err(|err| {
            AttachmentStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let bytes = files
            .get(name)
            .cloned()
            .ok_or_else(|| AttachmentStoreError::NotFound(name.to_owned()))?;
        verify_digest(reference, bytes)
    }

    async fn remove(&self, reference: &SubmissionFile) -> AttachmentStoreResult<()> {
        let name = stored_file_name(reference)?;
        let mut files = self.files.write().map_err(|err| {
            AttachmentStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        files
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| AttachmentStoreError::NotFound(name.to_owned()))
    }
}
