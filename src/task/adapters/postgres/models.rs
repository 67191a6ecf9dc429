//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Assignee user identifier.
    pub assigned_to: uuid::Uuid,
    /// Creating admin user identifier.
    pub assigned_by: uuid::Uuid,
    /// Submission deadline.
    pub deadline: DateTime<Utc>,
    /// Lifecycle status.
    pub status: String,
    /// Comment history JSON array.
    pub comments: Value,
    /// Submission reference JSON object.
    pub submission_file: Option<Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Assignee user identifier.
    pub assigned_to: uuid::Uuid,
    /// Creating admin user identifier.
    pub assigned_by: uuid::Uuid,
    /// Submission deadline.
    pub deadline: DateTime<Utc>,
    /// Lifecycle status.
    pub status: String,
    /// Comment history JSON array.
    pub comments: Value,
    /// Submission reference JSON object.
    pub submission_file: Option<Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Full-record update model; `None` clears the submission reference.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Assignee user identifier.
    pub assigned_to: uuid::Uuid,
    /// Submission deadline.
    pub deadline: DateTime<Utc>,
    /// Lifecycle status.
    pub status: String,
    /// Comment history JSON array.
    pub comments: Value,
    /// Submission reference JSON object.
    pub submission_file: Option<Value>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
