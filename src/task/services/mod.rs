//! Application services for task lifecycle orchestration.

mod error;
mod lifecycle;
mod view;

pub use error::{ErrorKind, TaskLifecycleError, TaskLifecycleResult};
pub use lifecycle::{
    CreateTaskRequest, TaskLifecycleService, UpdateStatusRequest, UpdateTaskFieldsRequest,
};
pub use view::{AttachmentDownload, CommentView, TaskView};
