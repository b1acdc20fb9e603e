//! Domain building blocks shared by the persistence and HTTP layers.
//!
//! This crate has no database or HTTP dependencies: it holds the error
//! taxonomy, identifier aliases, global and project-scoped roles, task
//! statuses, the access policy predicates, and the sparse-patch type.

pub mod access;
pub mod error;
pub mod patch;
pub mod roles;
pub mod task_status;
pub mod types;
pub mod validation;
