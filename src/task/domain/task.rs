//! Task aggregate root and its comment history.

use super::{ApprovedTransition, SubmissionFile, TaskDomainError, TaskId, TaskStatus};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A review comment appended to a task.
///
/// Comments are never edited or removed; the last element of
/// [`Task::comments`] is the most recent feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskComment {
    text: String,
    author: UserId,
    created_at: DateTime<Utc>,
}

impl TaskComment {
    /// Creates a comment, returning `None` when the text is blank.
    #[must_use]
    pub fn new(text: &str, author: UserId, created_at: DateTime<Utc>) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            text: trimmed.to_owned(),
            author,
            created_at,
        })
    }

    /// Returns the comment text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the comment author.
    #[must_use]
    pub const fn author(&self) -> UserId {
        self.author
    }

    /// Returns when the comment was written.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Employee the task is assigned to.
    pub assigned_to: UserId,
    /// Admin creating the task.
    pub assigned_by: UserId,
    /// Submission deadline.
    pub deadline: DateTime<Utc>,
}

/// Partial edit applied by an admin.
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFieldChanges {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement deadline.
    pub deadline: Option<DateTime<Utc>>,
}

impl TaskFieldChanges {
    /// Returns whether no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.deadline.is_none()
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    assigned_to: UserId,
    assigned_by: UserId,
    deadline: DateTime<Utc>,
    status: TaskStatus,
    comments: Vec<TaskComment>,
    submission_file: Option<SubmissionFile>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted assignee.
    pub assigned_to: UserId,
    /// Persisted creator.
    pub assigned_by: UserId,
    /// Persisted deadline.
    pub deadline: DateTime<Utc>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted comment history, oldest first.
    pub comments: Vec<TaskComment>,
    /// Persisted submission reference, if any.
    pub submission_file: Option<SubmissionFile>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `pending` task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] or
    /// [`TaskDomainError::EmptyDescription`] when either text is blank.
    pub fn new(data: NewTask, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let title = required_text(&data.title, TaskDomainError::EmptyTitle)?;
        let description = required_text(&data.description, TaskDomainError::EmptyDescription)?;
        let timestamp = clock.utc();

        Ok(Self {
            id: TaskId::new(),
            title,
            description,
            assigned_to: data.assigned_to,
            assigned_by: data.assigned_by,
            deadline: data.deadline,
            status: TaskStatus::Pending,
            comments: Vec::new(),
            submission_file: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            assigned_to: data.assigned_to,
            assigned_by: data.assigned_by,
            deadline: data.deadline,
            status: data.status,
            comments: data.comments,
            submission_file: data.submission_file,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assigned_to(&self) -> UserId {
        self.assigned_to
    }

    /// Returns the admin who created the task.
    #[must_use]
    pub const fn assigned_by(&self) -> UserId {
        self.assigned_by
    }

    /// Returns the submission deadline.
    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the comment history, oldest first.
    #[must_use]
    pub fn comments(&self) -> &[TaskComment] {
        &self.comments
    }

    /// Returns the submission reference, if any.
    #[must_use]
    pub const fn submission_file(&self) -> Option<&SubmissionFile> {
        self.submission_file.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a status change approved by the submission gate.
    ///
    /// The comment, when present, is appended after the status change. The
    /// submission reference replaces any earlier one and is only accepted
    /// for transitions into [`TaskStatus::Submitted`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnexpectedAttachment`] if a submission
    /// reference accompanies any other target, and
    /// [`TaskDomainError::InvalidStatusTransition`] if the approval was
    /// issued for a different task or an outdated status.
    pub fn apply_transition(
        &mut self,
        approved: ApprovedTransition,
        comment: Option<TaskComment>,
        submission: Option<SubmissionFile>,
        at: DateTime<Utc>,
    ) -> Result<(), TaskDomainError> {
        if approved.task_id() != self.id || approved.from() != self.status {
            return Err(TaskDomainError::InvalidStatusTransition {
                task_id: self.id,
                from: self.status,
                to: approved.to(),
            });
        }
        if submission.is_some() && approved.to() != TaskStatus::Submitted {
            return Err(TaskDomainError::UnexpectedAttachment(self.id));
        }

        self.status = approved.to();
        if let Some(entry) = comment {
            self.comments.push(entry);
        }
        if let Some(file) = submission {
            self.submission_file = Some(file);
        }
        self.updated_at = at;
        Ok(())
    }

    /// Applies an admin edit to title, description or deadline.
    ///
    /// Supplying a deadline resets a [`TaskStatus::DeadlineExceeded`] task to
    /// [`TaskStatus::Pending`] regardless of the new value; every other
    /// status is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] or
    /// [`TaskDomainError::EmptyDescription`] when a supplied text is blank.
    /// Nothing is modified on error.
    pub fn apply_field_changes(
        &mut self,
        changes: TaskFieldChanges,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let title = changes
            .title
            .as_deref()
            .map(|value| required_text(value, TaskDomainError::EmptyTitle))
            .transpose()?;
        let description = changes
            .description
            .as_deref()
            .map(|value| required_text(value, TaskDomainError::EmptyDescription))
            .transpose()?;

        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = description {
            self.description = value;
        }
        if let Some(deadline) = changes.deadline {
            self.deadline = deadline;
            if self.status == TaskStatus::DeadlineExceeded {
                self.status = TaskStatus::Pending;
            }
        }
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Moves an overdue `pending` task to `not-submitted`.
    ///
    /// Returns whether the status changed.
    pub(crate) fn mark_not_submitted(&mut self, at: DateTime<Utc>) -> bool {
        if self.status != TaskStatus::Pending {
            return false;
        }
        self.status = TaskStatus::NotSubmitted;
        self.updated_at = at;
        true
    }
}

fn required_text(value: &str, empty_error: TaskDomainError) -> Result<String, TaskDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(empty_error);
    }
    Ok(trimmed.to_owned())
}
