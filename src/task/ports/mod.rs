//! Port contracts for task lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod attachment;
pub mod repository;

pub use attachment::{
    AttachmentMetadata, AttachmentStore, AttachmentStoreError, AttachmentStoreResult,
};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
