//! Global-role extractors.
//!
//! Each wraps [`AuthUser`] and rejects callers whose global role is not
//! listed. Project-scoped checks happen in the handlers through
//! [`crate::auth::resolver::authorize_project`], because they need the
//! project id from the path.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use promon_core::roles::GlobalRole;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` global role. Rejects with 403 otherwise.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::extract_with_roles(parts, state, &[GlobalRole::Admin]).await?;
        Ok(RequireAdmin(user))
    }
}

/// Requires the `project_manager` global role. Rejects with 403 otherwise.
///
/// Admins are not implicitly admitted; their bypass covers project scope only.
pub struct RequireProjectManager(pub AuthUser);

impl FromRequestParts<AppState> for RequireProjectManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user =
            AuthUser::extract_with_roles(parts, state, &[GlobalRole::ProjectManager]).await?;
        Ok(RequireProjectManager(user))
    }
}

/// Requires any authenticated user.
///
/// Equivalent to [`AuthUser`], named for routes where that intent should
/// read explicitly.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
