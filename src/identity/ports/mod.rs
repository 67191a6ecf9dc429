//! Port contracts for the identity collaborator.

pub mod directory;

pub use directory::{IdentityDirectory, IdentityDirectoryError, IdentityDirectoryResult};
