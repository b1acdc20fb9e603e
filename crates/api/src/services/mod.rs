//! Domain operations.
//!
//! Services take the store and already-authorized inputs, apply validation
//! and cross-entity rules, and return row models. Authorization happens in
//! the handlers before a service is called; response shaping happens after.

pub mod participants;
pub mod projects;
pub mod tasks;
pub mod users;
