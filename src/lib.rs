//! Taskmaster: task assignment and deadline submission tracking.
//!
//! Administrators create tasks with deadlines and assign them to employees.
//! Employees submit a file before the deadline; administrators approve the
//! submission or return it with comments.
//!
//! # Architecture
//!
//! Taskmaster follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, files, etc.)
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle, deadline reconciliation and the submission gate
//! - [`identity`]: Users, roles and the explicit request actor
//! - [`config`]: Upload policy and storage configuration

pub mod config;
pub mod identity;
pub mod task;
