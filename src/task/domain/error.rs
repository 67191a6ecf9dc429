//! Error types for task domain validation, gating and parsing.

use super::{TaskId, TaskStatus};
use crate::identity::domain::{UserId, UserRole};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned by task domain operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// The requested status change is not in the transition table.
    #[error("task {task_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// Task being changed.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// A submission arrived after the deadline outside the returned state.
    #[error(
        "cannot submit task {task_id} after deadline {deadline}; please contact an admin for a deadline extension"
    )]
    DeadlineViolation {
        /// Task being submitted.
        task_id: TaskId,
        /// Deadline that has passed.
        deadline: DateTime<Utc>,
    },

    /// A submission was attempted without an attachment.
    #[error("submitting task {0} requires a file attachment")]
    MissingAttachment(TaskId),

    /// An attachment was supplied for a transition other than submission.
    #[error("attachments are only accepted when submitting task {0}")]
    UnexpectedAttachment(TaskId),

    /// The actor's role may not request the target status.
    #[error("{role} may not move task {task_id} to {to}")]
    RoleNotPermitted {
        /// Task being changed.
        task_id: TaskId,
        /// Role held by the actor.
        role: UserRole,
        /// Requested status.
        to: TaskStatus,
    },

    /// Only the assignee may submit work for a task.
    #[error("user {user_id} is not assigned to task {task_id}")]
    NotAssignee {
        /// Task being submitted.
        task_id: TaskId,
        /// Acting user.
        user_id: UserId,
    },
}

/// Error returned while parsing task statuses from requests or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
