//! Handlers for the `/auth` resource (register, login).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use promon_db::models::user::User;

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::user::{AuthView, UserView};
use crate::response::DataResponse;
use crate::services::users::{self, LoginRequest, RegisterRequest};
use crate::state::AppState;

fn issue_token(state: &AppState, user: &User) -> AppResult<AuthView> {
    let access_token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;
    Ok(AuthView {
        access_token,
        token_type: "Bearer",
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserView::from(user),
    })
}

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AuthView>>)> {
    let user = users::register(state.store(), state.config.min_password_length, input).await?;
    let view = issue_token(&state, &user)?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(view))))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<DataResponse<AuthView>>> {
    let user = users::login(state.store(), &input).await?;
    tracing::info!(user_id = %user.id, "User logged in");
    Ok(Json(DataResponse::new(issue_token(&state, &user)?)))
}
