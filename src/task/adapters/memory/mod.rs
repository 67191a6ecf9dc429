//! In-memory adapters for task lifecycle tests and embedding.

mod attachment;
mod task;

pub use attachment::InMemoryAttachmentStore;
pub use task::InMemoryTaskRepository;
