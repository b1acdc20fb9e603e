//! Admin-only handlers under `/admin`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use promon_core::types::UserId;

use crate::error::AppResult;
use crate::extract::{AppPath, AppQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::query::SearchParams;
use crate::response::project::ProjectWithParticipantsView;
use crate::response::user::UserView;
use crate::response::DataResponse;
use crate::services::{projects, users};
use crate::state::AppState;

/// GET /api/v1/admin/users?search=
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<UserView>>>> {
    let found = users::list_users(state.store(), params.term()).await?;
    Ok(Json(DataResponse::new(
        found.iter().map(UserView::from).collect(),
    )))
}

/// DELETE /api/v1/admin/users/{id}
pub async fn delete_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<UserId>,
) -> AppResult<StatusCode> {
    users::delete_user(state.store(), id).await?;
    tracing::info!(admin_id = %admin.user_id, user_id = %id, "Admin deleted user");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/admin/projects?search=
pub async fn search_projects(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<ProjectWithParticipantsView>>>> {
    let found = projects::search_projects(state.store(), params.term()).await?;
    let views = found
        .iter()
        .map(|(project, members)| ProjectWithParticipantsView::assemble(project, members))
        .collect();
    Ok(Json(DataResponse::new(views)))
}
