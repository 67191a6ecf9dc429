//! Task assignment lifecycle for the tracker.
//!
//! Administrators create tasks with deadlines and assign them to employees;
//! employees submit a file attachment before the deadline; administrators
//! approve a submission or return it with comments. The module follows
//! hexagonal architecture:
//!
//! - Domain types, the deadline evaluator and the submission gate in
//!   [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
