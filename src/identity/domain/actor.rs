//! Explicit request context passed into every service call.

use super::{UserId, UserRole};
use serde::{Deserialize, Serialize};

/// The authenticated identity performing an operation.
///
/// Built by the request layer after credential verification and handed to
/// services explicitly; nothing in the crate looks the current user up from
/// ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    user_id: UserId,
    role: UserRole,
}

impl Actor {
    /// Creates an actor context.
    #[must_use]
    pub const fn new(user_id: UserId, role: UserRole) -> Self {
        Self { user_id, role }
    }

    /// Creates an admin actor.
    #[must_use]
    pub const fn admin(user_id: UserId) -> Self {
        Self::new(user_id, UserRole::Admin)
    }

    /// Creates an employee actor.
    #[must_use]
    pub const fn employee(user_id: UserId) -> Self {
        Self::new(user_id, UserRole::Employee)
    }

    /// Returns the acting user's identifier.
    #[must_use]
    pub const fn user_id(self) -> UserId {
        self.user_id
    }

    /// Returns the acting user's role.
    #[must_use]
    pub const fn role(self) -> UserRole {
        self.role
    }

    /// Returns whether the actor holds the admin role.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self.role, UserRole::Admin)
    }
}
