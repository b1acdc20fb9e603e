//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use promon_core::error::CoreError;
use promon_core::roles::GlobalRole;
use promon_core::types::UserId;

use crate::auth::identity::verify_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from the `Authorization: Bearer` header.
///
/// The role is read from the store on every request, never from the token.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub role: GlobalRole,
}

impl AuthUser {
    /// Authenticate and additionally require one of `allowed` global roles.
    pub(crate) async fn extract_with_roles(
        parts: &mut Parts,
        state: &AppState,
        allowed: &[GlobalRole],
    ) -> Result<Self, AppError> {
        let token = bearer_token(parts)?;
        let user = verify_token(state.store(), &state.config.jwt, token, allowed).await?;
        Ok(AuthUser {
            user_id: user.id,
            role: user.role,
        })
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Self::extract_with_roles(parts, state, &[]).await
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing Authorization header".into(),
            ))
        })?;

    auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized(
            "Invalid Authorization format. Expected: Bearer <token>".into(),
        ))
    })
}
