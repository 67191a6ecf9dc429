//! Upload admission policy.
//!
//! Uploads are checked before they reach the lifecycle service: the service
//! only accepts an [`AdmittedUpload`], which can only be obtained from
//! [`UploadPolicy::admit`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default maximum upload size in bytes (10 MB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10_000_000;

/// MIME type for PDF documents.
pub const MIME_PDF: &str = "application/pdf";
/// MIME type for legacy Word documents.
pub const MIME_DOC: &str = "application/msword";
/// MIME type for Office Open XML Word documents.
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
/// MIME type for plain text.
pub const MIME_TXT: &str = "text/plain";
/// Fallback MIME type for unknown extensions.
pub const MIME_OCTET_STREAM: &str = "application/octet-stream";

/// Raw upload as received by the request layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentUpload {
    /// File name supplied by the client.
    pub original_name: String,
    /// Declared MIME type.
    pub mime_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl AttachmentUpload {
    /// Creates an upload description.
    #[must_use]
    pub fn new(
        original_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            original_name: original_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// An upload that passed [`UploadPolicy::admit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmittedUpload {
    original_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl AdmittedUpload {
    /// Returns the client-supplied file name.
    #[must_use]
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    /// Returns the normalised MIME type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the file contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Reasons an upload is refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UploadRejected {
    /// The declared MIME type is not on the allow list.
    #[error("invalid file type '{0}'; only PDF, DOC, DOCX, and TXT files are allowed")]
    DisallowedType(String),

    /// The upload exceeds the size limit.
    #[error("file of {size} bytes exceeds the {limit} byte limit")]
    TooLarge {
        /// Upload size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: u64,
    },

    /// The upload has no file name.
    #[error("uploaded file must have a name")]
    MissingFileName,

    /// The file name contains control characters such as CR or LF.
    #[error("file name {0:?} contains control characters")]
    InvalidFileName(String),
}

/// Size and type restrictions applied to submission uploads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadPolicy {
    /// Maximum accepted size in bytes.
    pub max_bytes: u64,
    /// Accepted MIME types, lowercase, without parameters.
    pub allowed_mime_types: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            allowed_mime_types: [MIME_PDF, MIME_DOC, MIME_DOCX, MIME_TXT]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}

impl UploadPolicy {
    /// Returns a copy of this policy with a different size limit.
    #[must_use]
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Checks an upload against the policy.
    ///
    /// MIME parameters such as `; charset=utf-8` are ignored and the type is
    /// compared case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`UploadRejected`] when the name is blank or contains control
    /// characters, the type is not allowed, or the size exceeds
    /// [`UploadPolicy::max_bytes`].
    pub fn admit(&self, upload: AttachmentUpload) -> Result<AdmittedUpload, UploadRejected> {
        let AttachmentUpload {
            original_name,
            mime_type,
            bytes,
        } = upload;

        let name = original_name.trim();
        if name.is_empty() {
            return Err(UploadRejected::MissingFileName);
        }
        // The name is echoed back in response headers.
        if name.chars().any(char::is_control) {
            return Err(UploadRejected::InvalidFileName(name.to_owned()));
        }

        let essence = mime_essence(&mime_type);
        if !self.allowed_mime_types.iter().any(|allowed| *allowed == essence) {
            return Err(UploadRejected::DisallowedType(mime_type));
        }

        let size = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        if size > self.max_bytes {
            return Err(UploadRejected::TooLarge {
                size,
                limit: self.max_bytes,
            });
        }

        Ok(AdmittedUpload {
            original_name: name.to_owned(),
            content_type: essence,
            bytes,
        })
    }
}

fn mime_essence(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Infers a download content type from a file name's extension.
///
/// Unknown or missing extensions map to `application/octet-stream`.
#[must_use]
pub fn content_type_for_filename(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => MIME_PDF,
        "doc" => MIME_DOC,
        "docx" => MIME_DOCX,
        "txt" => MIME_TXT,
        _ => MIME_OCTET_STREAM,
    }
}
