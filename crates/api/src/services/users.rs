//! Registration, login and profile operations.

use promon_core::error::CoreError;
use promon_core::patch::Patch;
use promon_core::roles::GlobalRole;
use promon_core::types::UserId;
use promon_core::validation::{validate_input, validate_not_blank};
use promon_db::models::project::Project;
use promon_db::models::user::{CreateUser, UpdateUser, User};
use promon_db::Store;
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};

/// Same message for unknown user and wrong password.
const INVALID_CREDENTIALS: &str = "Invalid username or password";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 64))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    pub group: Option<String>,
    pub github_username: Option<String>,
    pub color_code: Option<String>,
    /// `student` or `project_manager`.
    pub role: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `PUT /users/{id}`.
///
/// Omitted fields are left unchanged. The nullable profile fields can be
/// cleared with an explicit `null`. There is no way to change the role.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 64))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[serde(default)]
    pub group: Patch<String>,
    #[serde(default)]
    pub github_username: Patch<String>,
    #[serde(default)]
    pub color_code: Patch<String>,
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Create an account. Admin accounts cannot be self-registered.
pub async fn register(
    store: &dyn Store,
    min_password_length: usize,
    mut input: RegisterRequest,
) -> AppResult<User> {
    input.username = input.username.trim().to_string();
    validate_input(&input)?;
    validate_not_blank(&input.username, "username")?;
    validate_password_strength(&input.password, min_password_length)
        .map_err(CoreError::Validation)?;

    let role: GlobalRole = input.role.parse()?;
    if role == GlobalRole::Admin {
        return Err(CoreError::Validation(
            "Role 'admin' cannot be chosen at registration".into(),
        )
        .into());
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = store
        .create_user(&CreateUser {
            role,
            username: input.username,
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            group_name: input.group,
            github_username: input.github_username,
            color_code: input.color_code,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = %user.id, role = %user.role, "User registered");
    Ok(user)
}

/// Check credentials and return the matching user.
pub async fn login(store: &dyn Store, input: &LoginRequest) -> AppResult<User> {
    let user = store
        .find_user_by_username(input.username.trim())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        tracing::debug!(user_id = %user.id, "Rejected login with wrong password");
        return Err(CoreError::Unauthorized(INVALID_CREDENTIALS.into()).into());
    }

    Ok(user)
}

pub async fn find_user(store: &dyn Store, id: UserId) -> AppResult<User> {
    store
        .find_user(id)
        .await?
        .ok_or_else(|| CoreError::not_found("User", id).into())
}

pub async fn list_users(store: &dyn Store, search: Option<&str>) -> AppResult<Vec<User>> {
    Ok(store.list_users(search).await?)
}

/// A user together with the projects they participate in.
pub async fn get_profile(store: &dyn Store, id: UserId) -> AppResult<(User, Vec<Project>)> {
    let user = find_user(store, id).await?;
    let projects = store.list_projects_for_user(id).await?;
    Ok((user, projects))
}

pub async fn update_user(
    store: &dyn Store,
    id: UserId,
    mut input: UpdateUserRequest,
) -> AppResult<User> {
    input.username = input.username.map(|u| u.trim().to_string());
    validate_input(&input)?;
    if let Some(username) = &input.username {
        validate_not_blank(username, "username")?;
    }

    let patch = UpdateUser {
        username: input.username,
        email: input.email,
        first_name: input.first_name,
        last_name: input.last_name,
        group_name: input.group,
        github_username: input.github_username,
        color_code: input.color_code,
    };

    let user = store
        .update_user(id, &patch)
        .await?
        .ok_or_else(|| CoreError::not_found("User", id))?;

    tracing::info!(user_id = %id, "User profile updated");
    Ok(user)
}

pub async fn delete_user(store: &dyn Store, id: UserId) -> AppResult<()> {
    if !store.delete_user(id).await? {
        return Err(CoreError::not_found("User", id).into());
    }
    tracing::info!(user_id = %id, "User deleted");
    Ok(())
}
