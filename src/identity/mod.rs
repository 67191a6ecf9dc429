//! Identity collaborator for the task tracker.
//!
//! Users, roles and the explicit [`domain::Actor`] request context live here.
//! Authentication is handled outside this crate; the task services only need
//! to resolve user identifiers into display projections and to know which
//! role an actor holds.

pub mod adapters;
pub mod domain;
pub mod ports;
