//! Authentication and authorization.
//!
//! - [`jwt`] signs and validates access tokens.
//! - [`password`] hashes and verifies credentials.
//! - [`identity`] turns a token into a live user and checks global roles.
//! - [`resolver`] checks project-scoped participant roles.

pub mod identity;
pub mod jwt;
pub mod password;
pub mod resolver;
