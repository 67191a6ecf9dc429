//! Service-level errors and their caller-facing classification.

use crate::identity::{
    domain::{UserId, UserRole},
    ports::IdentityDirectoryError,
};
use crate::task::{
    domain::{ParseTaskStatusError, TaskDomainError, TaskId, UploadRejected},
    ports::{AttachmentStoreError, TaskRepositoryError},
};
use std::fmt;
use thiserror::Error;

/// Coarse error category reported to callers alongside the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or malformed input, or a transition outside the table.
    Validation,
    /// The task or its attachment does not exist.
    NotFound,
    /// Submission attempted after the deadline.
    DeadlineViolation,
    /// The upload was refused by the upload policy.
    UploadRejected,
    /// The actor's role or identity does not allow the operation.
    Forbidden,
    /// Storage or directory failure.
    Internal,
}

impl ErrorKind {
    /// Returns a stable machine-readable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation_error",
            Self::NotFound => "not_found",
            Self::DeadlineViolation => "deadline_violation",
            Self::UploadRejected => "upload_rejected",
            Self::Forbidden => "forbidden",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation or gating failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Attachment storage failed.
    #[error(transparent)]
    Attachment(#[from] AttachmentStoreError),
    /// Identity lookup failed.
    #[error(transparent)]
    Identity(#[from] IdentityDirectoryError),
    /// The requested status is not a known value.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),
    /// The upload was refused before reaching the service.
    #[error(transparent)]
    Upload(#[from] UploadRejected),
    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    NotFound(TaskId),
    /// The task has no submitted file.
    #[error("no file has been submitted for task {0}")]
    AttachmentNotFound(TaskId),
    /// The assignee is not a registered employee.
    #[error("assignee {0} is not a registered employee")]
    UnknownAssignee(UserId),
    /// The actor may not perform the operation.
    #[error("{role} is not permitted to {operation}")]
    Forbidden {
        /// Role held by the actor.
        role: UserRole,
        /// Operation that was refused.
        operation: &'static str,
    },
}

impl TaskLifecycleError {
    /// Classifies the error for the request layer.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => match err {
                TaskDomainError::EmptyTitle
                | TaskDomainError::EmptyDescription
                | TaskDomainError::InvalidStatusTransition { .. }
                | TaskDomainError::MissingAttachment(_)
                | TaskDomainError::UnexpectedAttachment(_) => ErrorKind::Validation,
                TaskDomainError::DeadlineViolation { .. } => ErrorKind::DeadlineViolation,
                TaskDomainError::RoleNotPermitted { .. } | TaskDomainError::NotAssignee { .. } => {
                    ErrorKind::Forbidden
                }
            },
            Self::Repository(TaskRepositoryError::NotFound(_))
            | Self::Attachment(AttachmentStoreError::NotFound(_))
            | Self::NotFound(_)
            | Self::AttachmentNotFound(_) => ErrorKind::NotFound,
            Self::Repository(_) | Self::Attachment(_) | Self::Identity(_) => ErrorKind::Internal,
            Self::InvalidStatus(_) | Self::UnknownAssignee(_) => ErrorKind::Validation,
            Self::Upload(_) => ErrorKind::UploadRejected,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;
