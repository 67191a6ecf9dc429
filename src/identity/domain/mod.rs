//! Domain model for tracker users and request actors.

mod actor;
mod error;
mod user;

pub use actor::Actor;
pub use error::{IdentityDomainError, ParseUserRoleError};
pub use user::{EmailAddress, UserId, UserRecord, UserRole, UserSummary};
