//! User entity model and DTOs.

use promon_core::patch::Patch;
use promon_core::roles::GlobalRole;
use promon_core::types::{Timestamp, UserId};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash; response types in the API crate never copy it.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: UserId,
    #[sqlx(try_from = "String")]
    pub role: GlobalRole,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub group_name: Option<String>,
    pub github_username: Option<String>,
    pub color_code: Option<String>,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The display subset of a user, used wherever a user is embedded in
/// another entity's view.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ShortUser {
    pub id: UserId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub group_name: Option<String>,
    pub github_username: Option<String>,
    pub color_code: Option<String>,
}

impl From<&User> for ShortUser {
    fn from(user: &User) -> Self {
        ShortUser {
            id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            group_name: user.group_name.clone(),
            github_username: user.github_username.clone(),
            color_code: user.color_code.clone(),
        }
    }
}

/// DTO for creating a new user. The id is generated by the store.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub role: GlobalRole,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub group_name: Option<String>,
    pub github_username: Option<String>,
    pub color_code: Option<String>,
    pub password_hash: String,
}

/// Sparse profile update. The global role is deliberately absent.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub group_name: Patch<String>,
    pub github_username: Patch<String>,
    pub color_code: Patch<String>,
}
