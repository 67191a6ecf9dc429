//! Filesystem attachment store confined to a single upload directory.
//!
//! The store holds a capability handle for its root directory, so stored
//! names can never resolve outside it. Blocking I/O runs on the Tokio
//! blocking pool; every file handle is scoped to one closure and dropped
//! before the closure returns.

use super::{describe_attachment, stored_file_name, verify_digest};
use crate::task::{
    domain::SubmissionFile,
    ports::{AttachmentMetadata, AttachmentStore, AttachmentStoreError, AttachmentStoreResult},
};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::{self, Write};
use std::sync::Arc;

/// Attachment store writing one file per submission under a root directory.
#[derive(Debug, Clone)]
pub struct FilesystemAttachmentStore {
    root: Utf8PathBuf,
    dir: Arc<Dir>,
}

impl FilesystemAttachmentStore {
    /// Opens the store, creating the root directory if needed.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the directory cannot be created
    /// or opened.
    pub fn open(root: impl Into<Utf8PathBuf>) -> io::Result<Self> {
        let root_path: Utf8PathBuf = root.into();
        Dir::create_ambient_dir_all(&root_path, ambient_authority())?;
        let dir = Dir::open_ambient_dir(&root_path, ambient_authority())?;
        Ok(Self {
            root: root_path,
            dir: Arc::new(dir),
        })
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    async fn run_blocking<F, T>(&self, f: F) -> AttachmentStoreResult<T>
    where
        F: FnOnce(&Dir) -> AttachmentStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || f(&dir))
            .await
            .map_err(AttachmentStoreError::persistence)?
    }
}

fn write_new_file(dir: &Dir, name: &str, bytes: &[u8]) -> io::Result<()> {
    let mut file = dir.create(name)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn map_io_error(name: &str, err: io::Error) -> AttachmentStoreError {
    if err.kind() == io::ErrorKind::NotFound {
        AttachmentStoreError::NotFound(name.to_owned())
    } else {
        AttachmentStoreError::persistence(err)
    }
}

#[async_trait]
impl AttachmentStore for FilesystemAttachmentStore {
    async fn store(
        &self,
        bytes: &[u8],
        metadata: &AttachmentMetadata,
    ) -> AttachmentStoreResult<SubmissionFile> {
        let reference = describe_attachment(bytes, metadata, |name| {
            self.root.join(name).into_string()
        });
        let name = reference.filename.clone();
        let contents = bytes.to_vec();

        self.run_blocking(move |dir| {
            if let Err(err) = write_new_file(dir, &name, &contents) {
                if let Err(cleanup_err) = dir.remove_file(&name) {
                    tracing::warn!(
                        file = %name,
                        error = %cleanup_err,
                        "failed to remove partially written attachment"
                    );
                }
                return Err(AttachmentStoreError::persistence(err));
            }
            Ok(())
        })
        .await?;

        tracing::debug!(
            file = %reference.filename,
            size = reference.size_bytes,
            "stored attachment"
        );
        Ok(reference)
    }

    async fn retrieve(&self, reference: &SubmissionFile) -> AttachmentStoreResult<Vec<u8>> {
        let name = stored_file_name(reference)?.to_owned();
        let bytes = self
            .run_blocking(move |dir| dir.read(&name).map_err(|err| map_io_error(&name, err)))
            .await?;
        verify_digest(reference, bytes)
    }

    async fn remove(&self, reference: &SubmissionFile) -> AttachmentStoreResult<()> {
        let name = stored_file_name(reference)?.to_owned();
        self.run_blocking(move |dir| dir.remove_file(&name).map_err(|err| map_io_error(&name, err)))
            .await
    }
}
