//! Row models and write DTOs, one module per table.

pub mod participant;
pub mod project;
pub mod task;
pub mod user;
