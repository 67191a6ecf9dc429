//! Task lifecycle status.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Assigned and awaiting a submission.
    Pending,
    /// An attachment has been submitted and awaits review.
    Submitted,
    /// The submission was approved.
    Completed,
    /// The submission was sent back to the employee.
    Returned,
    /// Deadline lapsed; cleared when an admin edits the deadline.
    ///
    /// Nothing sets this status automatically; overdue tasks become
    /// [`TaskStatus::NotSubmitted`] instead.
    DeadlineExceeded,
    /// Deadline lapsed while the task was still pending.
    NotSubmitted,
}

impl TaskStatus {
    /// Every status value, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Submitted,
        Self::Completed,
        Self::Returned,
        Self::DeadlineExceeded,
        Self::NotSubmitted,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Submitted => "submitted",
            Self::Completed => "completed",
            Self::Returned => "returned",
            Self::DeadlineExceeded => "deadline-exceeded",
            Self::NotSubmitted => "not-submitted",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "submitted" => Ok(Self::Submitted),
            "completed" => Ok(Self::Completed),
            "returned" => Ok(Self::Returned),
            "deadline-exceeded" => Ok(Self::DeadlineExceeded),
            "not-submitted" => Ok(Self::NotSubmitted),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}
