//! Token-to-identity resolution and global-role checks.
//!
//! A token only proves who the caller *was* when it was issued. Every check
//! here reloads the user from the store, so a deleted account or a changed
//! role is observed on the very next request.

use promon_core::access::check_global_role;
use promon_core::error::CoreError;
use promon_core::roles::GlobalRole;
use promon_core::types::UserId;
use promon_db::models::user::User;
use promon_db::Store;

use super::jwt::{validate_token, JwtConfig};
use crate::error::AppResult;

/// Decode a token and return its subject without touching the store.
pub fn user_id_from_token(token: &str, config: &JwtConfig) -> Result<UserId, CoreError> {
    validate_token(token, config)
        .map(|claims| claims.sub)
        .map_err(|_| CoreError::Unauthorized("Invalid or expired token".into()))
}

/// Verify a token and gate the resolved user on their global role.
///
/// An empty `allowed` slice admits any authenticated user.
///
/// # Errors
///
/// - `Unauthorized` if the token is invalid, expired, or names a user that
///   no longer exists.
/// - `Forbidden` if the user's global role is not in `allowed`.
pub async fn verify_token(
    store: &dyn Store,
    config: &JwtConfig,
    token: &str,
    allowed: &[GlobalRole],
) -> AppResult<User> {
    let user_id = user_id_from_token(token, config)?;

    let user = store.find_user(user_id).await?.ok_or_else(|| {
        tracing::debug!(%user_id, "Token subject no longer exists");
        CoreError::Unauthorized("Invalid or expired token".into())
    })?;

    check_global_role(user.role, allowed)?;
    Ok(user)
}

/// Require that the caller is acting on their own account.
pub fn verify_self(caller_id: UserId, target_id: UserId) -> Result<(), CoreError> {
    if caller_id != target_id {
        return Err(CoreError::Forbidden(
            "You can only perform this action on your own account".into(),
        ));
    }
    Ok(())
}
