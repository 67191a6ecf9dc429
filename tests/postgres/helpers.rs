//! Shared helpers for `PostgreSQL` integration tests.

pub use super::cluster::{BoxError, PostgresCluster, postgres_cluster, test_runtime};
use super::cluster::TemporaryDatabase;
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::Clock;
use rstest::fixture;
use taskmaster::identity::domain::UserId;
use taskmaster::task::{
    adapters::postgres::{PostgresTaskRepository, TaskPgPool},
    domain::{NewTask, Task},
};
use uuid::Uuid;

/// SQL creating the task table.
pub const CREATE_TASKS_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_tasks/up.sql");

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "taskmaster_test_template";

/// Clock frozen at a whole-second instant.
///
/// `TIMESTAMPTZ` keeps microseconds, so tests that compare round-tripped
/// tasks for equality avoid the nanosecond readings of the system clock.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Returns a clock `step` later than this one.
    #[must_use]
    pub fn later(self, step: Duration) -> Self {
        Self(self.0 + step)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Provides a clock fixed at 2026-03-02 09:00 UTC.
#[fixture]
pub fn clock() -> FixedClock {
    FixedClock(
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
            .single()
            .unwrap_or_default(),
    )
}

/// Ensures the template database exists with the schema applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: PostgresCluster) -> Result<(), BoxError> {
    cluster.ensure_template_exists(TEMPLATE_DB, apply_migrations)
}

fn apply_migrations(url: &str) -> Result<(), BoxError> {
    let mut conn = PgConnection::establish(url).map_err(|err| Box::new(err) as BoxError)?;
    conn.batch_execute(CREATE_TASKS_SQL)
        .map_err(|err| Box::new(err) as BoxError)?;
    Ok(())
}

/// Repository bound to its own temporary database.
///
/// Field order matters: the repository's pool closes before the database
/// is dropped.
pub struct PreparedRepo {
    /// Repository under test.
    pub repo: PostgresTaskRepository,
    /// Database backing `repo`.
    pub temp_db: TemporaryDatabase,
}

impl PreparedRepo {
    /// Runs raw SQL against the repository's database.
    ///
    /// # Errors
    ///
    /// Returns the connection or statement error.
    pub fn execute_sql(&self, sql: &str) -> Result<usize, BoxError> {
        let mut conn =
            PgConnection::establish(self.temp_db.url()).map_err(|err| Box::new(err) as BoxError)?;
        diesel::sql_query(sql)
            .execute(&mut conn)
            .map_err(|err| Box::new(err) as BoxError)
    }
}

/// Creates a migrated temporary database and a repository over it.
///
/// # Errors
///
/// Returns an error if template setup, database creation or pool
/// construction fails.
pub fn setup_repository(cluster: PostgresCluster) -> Result<PreparedRepo, BoxError> {
    ensure_template(cluster)?;
    let temp_db = cluster
        .temporary_database_from_template(&format!("test_{}", Uuid::new_v4()), TEMPLATE_DB)?;

    let manager = ConnectionManager::<PgConnection>::new(temp_db.url());
    let pool: TaskPgPool = Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|err| Box::new(err) as BoxError)?;

    Ok(PreparedRepo {
        repo: PostgresTaskRepository::new(pool),
        temp_db,
    })
}

/// Prepared repository, or `None` when no cluster is available.
#[fixture]
pub fn prepared_repo(
    postgres_cluster: Option<PostgresCluster>,
) -> Result<Option<PreparedRepo>, BoxError> {
    postgres_cluster.map(setup_repository).transpose()
}

/// Builds a pending task for `assignee` due a day after `clock`.
///
/// # Errors
///
/// Returns an error if the task fails validation.
pub fn task_for(clock: &FixedClock, assignee: UserId, title: &str) -> Result<Task, BoxError> {
    Task::new(
        NewTask {
            title: title.to_owned(),
            description: "Collect figures and circulate the summary".to_owned(),
            assigned_to: assignee,
            assigned_by: UserId::new(),
            deadline: clock.0 + Duration::days(1),
        },
        clock,
    )
    .map_err(|err| Box::new(err) as BoxError)
}
