//! Read models returned by the lifecycle service.

use crate::identity::domain::UserSummary;
use crate::task::domain::{SubmissionFile, Task};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A comment with its author resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentView {
    /// Comment text.
    pub text: String,
    /// Author projection; `None` if the user no longer exists.
    pub author: Option<UserSummary>,
    /// When the comment was written.
    pub created_at: DateTime<Utc>,
}

/// A task with assignee, assigner and comment authors resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    /// The reconciled task.
    pub task: Task,
    /// Assignee projection; `None` if the user no longer exists.
    pub assignee: Option<UserSummary>,
    /// Assigner projection; `None` if the user no longer exists.
    pub assigner: Option<UserSummary>,
    /// Comment history in insertion order.
    pub comments: Vec<CommentView>,
}

/// Bytes and headers for a submitted file download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentDownload {
    /// Stored reference.
    pub file: SubmissionFile,
    /// File contents.
    pub bytes: Vec<u8>,
    /// Content type inferred from the original file name.
    pub content_type: &'static str,
}

impl AttachmentDownload {
    /// Returns a `Content-Disposition` value naming the original file.
    ///
    /// Control characters become `_` so the name can never end the header
    /// line; backslashes and quotes are escaped.
    #[must_use]
    pub fn content_disposition(&self) -> String {
        let name = &self.file.original_name;
        let mut escaped = String::with_capacity(name.len());
        for ch in name.chars() {
            match ch {
                '\\' | '"' => {
                    escaped.push('\\');
                    escaped.push(ch);
                }
                _ if ch.is_control() => escaped.push('_'),
                _ => escaped.push(ch),
            }
        }
        format!("attachment; filename=\"{escaped}\"")
    }
}
