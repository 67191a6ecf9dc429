//! Deadline evaluator.
//!
//! Overdue tasks are corrected lazily: every read path runs [`reconcile`]
//! before returning a task, so no background scheduler is needed. Between
//! reads the persisted status may be stale.

use super::{Task, TaskStatus};
use chrono::{DateTime, Utc};

/// Returns the status a task should hold at `now`, if it differs.
///
/// Only `pending` tasks whose deadline lies strictly in the past change;
/// they become `not-submitted`.
#[must_use]
pub fn overdue_status(
    status: TaskStatus,
    deadline: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Option<TaskStatus> {
    (status == TaskStatus::Pending && now > deadline).then_some(TaskStatus::NotSubmitted)
}

/// Reconciles a task's status against the current time.
///
/// Returns `true` when the task was changed and needs persisting. Running
/// it again on the same task is a no-op.
pub fn reconcile(task: &mut Task, now: DateTime<Utc>) -> bool {
    match overdue_status(task.status(), task.deadline(), now) {
        Some(_) => task.mark_not_submitted(now),
        None => false,
    }
}
