//! Submission gate: the single place status changes are authorised.
//!
//! | From                 | Actor    | To          | Precondition                      |
//! |----------------------|----------|-------------|-----------------------------------|
//! | pending              | employee | submitted   | `now <= deadline`, attachment     |
//! | not-submitted        | employee | submitted   | `now <= deadline`, attachment     |
//! | returned             | employee | submitted   | attachment (deadline not checked) |
//! | submitted            | admin    | completed   | none                              |
//! | submitted            | admin    | returned    | none                              |
//!
//! A submission after the deadline is refused with
//! [`TaskDomainError::DeadlineViolation`] unless the task is `returned`,
//! whatever its current status. The `deadline-exceeded` to `pending` reset
//! is not a requested transition; it happens through
//! [`Task::apply_field_changes`].

use super::{Task, TaskDomainError, TaskId, TaskStatus};
use crate::identity::domain::{Actor, UserRole};
use chrono::{DateTime, Utc};

/// Proof that the gate approved a status change for a specific task state.
///
/// Only [`authorize`] can construct one; [`Task::apply_transition`] requires
/// it, so a status mutation cannot skip the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApprovedTransition {
    task_id: TaskId,
    from: TaskStatus,
    to: TaskStatus,
}

impl ApprovedTransition {
    /// Returns the task the approval applies to.
    #[must_use]
    pub const fn task_id(self) -> TaskId {
        self.task_id
    }

    /// Returns the status the approval was issued against.
    #[must_use]
    pub const fn from(self) -> TaskStatus {
        self.from
    }

    /// Returns the approved target status.
    #[must_use]
    pub const fn to(self) -> TaskStatus {
        self.to
    }
}

/// A requested status change, as seen by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    /// Identity requesting the change.
    pub actor: Actor,
    /// Requested status.
    pub target: TaskStatus,
    /// Whether a file attachment accompanies the request.
    pub has_attachment: bool,
    /// Current time.
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Submit,
    Review,
}

const fn rule_for(from: TaskStatus, to: TaskStatus) -> Option<Rule> {
    match (from, to) {
        (
            TaskStatus::Pending | TaskStatus::NotSubmitted | TaskStatus::Returned,
            TaskStatus::Submitted,
        ) => Some(Rule::Submit),
        (TaskStatus::Submitted, TaskStatus::Completed | TaskStatus::Returned) => {
            Some(Rule::Review)
        }
        _ => None,
    }
}

/// Role allowed to request each target status, if any.
#[must_use]
pub const fn required_role(target: TaskStatus) -> Option<UserRole> {
    match target {
        TaskStatus::Submitted => Some(UserRole::Employee),
        TaskStatus::Completed | TaskStatus::Returned => Some(UserRole::Admin),
        TaskStatus::Pending | TaskStatus::DeadlineExceeded | TaskStatus::NotSubmitted => None,
    }
}

/// Returns whether the transition table contains `from -> to`.
#[must_use]
pub const fn is_listed_transition(from: TaskStatus, to: TaskStatus) -> bool {
    rule_for(from, to).is_some()
}

/// Authorises a requested status change without mutating the task.
///
/// Checks run in this order: target status requestable at all, actor role,
/// assignee ownership for submissions, the deadline rule, the transition
/// table, then attachment presence.
///
/// # Errors
///
/// Returns the [`TaskDomainError`] describing the first failed check.
pub fn authorize(task: &Task, change: StatusChange) -> Result<ApprovedTransition, TaskDomainError> {
    let from = task.status();
    let to = change.target;
    let invalid = || TaskDomainError::InvalidStatusTransition {
        task_id: task.id(),
        from,
        to,
    };

    let role = required_role(to).ok_or_else(invalid)?;
    if change.actor.role() != role {
        return Err(TaskDomainError::RoleNotPermitted {
            task_id: task.id(),
            role: change.actor.role(),
            to,
        });
    }

    if to == TaskStatus::Submitted {
        if change.actor.user_id() != task.assigned_to() {
            return Err(TaskDomainError::NotAssignee {
                task_id: task.id(),
                user_id: change.actor.user_id(),
            });
        }
        if from != TaskStatus::Returned && change.now > task.deadline() {
            return Err(TaskDomainError::DeadlineViolation {
                task_id: task.id(),
                deadline: task.deadline(),
            });
        }
    }

    let rule = rule_for(from, to).ok_or_else(invalid)?;
    match rule {
        Rule::Submit => {
            if !change.has_attachment {
                return Err(TaskDomainError::MissingAttachment(task.id()));
            }
        }
        Rule::Review => {
            if change.has_attachment {
                return Err(TaskDomainError::UnexpectedAttachment(task.id()));
            }
        }
    }

    Ok(ApprovedTransition {
        task_id: task.id(),
        from,
        to,
    })
}
