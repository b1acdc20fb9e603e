pub mod admin;
pub mod auth;
pub mod participant;
pub mod project;
pub mod task;
pub mod users;
