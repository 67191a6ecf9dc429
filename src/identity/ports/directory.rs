//! Directory port for user lookup.

use crate::identity::domain::{EmailAddress, UserId, UserRecord, UserRole};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity directory operations.
pub type IdentityDirectoryResult<T> = Result<T, IdentityDirectoryError>;

/// User lookup contract consumed by the task services.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_by_id(&self, id: UserId) -> IdentityDirectoryResult<Option<UserRecord>>;

    /// Finds a user by email address.
    ///
    /// Returns `None` when no user has the address.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> IdentityDirectoryResult<Option<UserRecord>>;

    /// Returns every user holding the given role.
    async fn list_by_role(&self, role: UserRole) -> IdentityDirectoryResult<Vec<UserRecord>>;
}

/// Errors returned by identity directory implementations.
#[derive(Debug, Clone, Error)]
pub enum IdentityDirectoryError {
    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// A user with the same email address already exists.
    #[error("email address already registered: {0}")]
    DuplicateEmail(EmailAddress),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
