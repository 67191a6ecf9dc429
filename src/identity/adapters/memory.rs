//! In-memory identity directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{EmailAddress, UserId, UserRecord, UserRole},
    ports::{IdentityDirectory, IdentityDirectoryError, IdentityDirectoryResult},
};

/// Thread-safe in-memory user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityDirectory {
    state: Arc<RwLock<InMemoryDirectoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryDirectoryState {
    users: HashMap<UserId, UserRecord>,
    email_index: HashMap<EmailAddress, UserId>,
}

impl InMemoryIdentityDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a user record to the directory.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDirectoryError::DuplicateUser`] or
    /// [`IdentityDirectoryError::DuplicateEmail`] when the identifier or email
    /// is already present.
    pub fn insert(&self, user: UserRecord) -> IdentityDirectoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            IdentityDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        if state.users.contains_key(&user.id()) {
            return Err(IdentityDirectoryError::DuplicateUser(user.id()));
        }
        if state.email_index.contains_key(user.email()) {
            return Err(IdentityDirectoryError::DuplicateEmail(user.email().clone()));
        }

        state.email_index.insert(user.email().clone(), user.id());
        state.users.insert(user.id(), user);
        Ok(())
    }
}

#[async_trait]
impl IdentityDirectory for InMemoryIdentityDirectory {
    async fn find_by_id(&self, id: UserId) -> IdentityDirectoryResult<Option<UserRecord>> {
        let state = self.state.read().map_err(|err| {
            IdentityDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> IdentityDirectoryResult<Option<UserRecord>> {
        let state = self.state.read().map_err(|err| {
            IdentityDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let user = state
            .email_index
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned();
        Ok(user)
    }

    async fn list_by_role(&self, role: UserRole) -> IdentityDirectoryResult<Vec<UserRecord>> {
        let state = self.state.read().map_err(|err| {
            IdentityDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut users: Vec<UserRecord> = state
            .users
            .values()
            .filter(|user| user.role() == role)
            .cloned()
            .collect();
        users.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(users)
    }
}
