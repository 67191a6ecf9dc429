//! Diesel schema for task persistence.

diesel::table! {
    /// Task records with embedded comments and submission reference.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        title -> Text,
        /// Task description.
        description -> Text,
        /// Assignee user identifier.
        assigned_to -> Uuid,
        /// Creating admin user identifier.
        assigned_by -> Uuid,
        /// Submission deadline.
        deadline -> Timestamptz,
        /// Task lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Ordered comment history.
        comments -> Jsonb,
        /// Submission reference, set once a file is submitted.
        submission_file -> Nullable<Jsonb>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
