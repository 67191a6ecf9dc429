//! Domain model for the task lifecycle.
//!
//! Status rules are centralised: [`deadline`] reconciles stale `pending`
//! tasks on read and [`gate`] decides every requested status change. The
//! [`Task`] aggregate only applies transitions the gate has approved.

pub mod deadline;
mod error;
pub mod gate;
mod ids;
mod status;
mod submission;
mod task;
pub mod upload;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use gate::ApprovedTransition;
pub use ids::TaskId;
pub use status::TaskStatus;
pub use submission::{SubmissionFile, sha256_hex, unique_file_name};
pub use task::{NewTask, PersistedTaskData, Task, TaskComment, TaskFieldChanges};
pub use upload::{AdmittedUpload, AttachmentUpload, UploadPolicy, UploadRejected};
