//! Handlers for `/projects/{id}/participants`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use promon_core::access::{ANY_PARTICIPANT, PROJECT_MANAGERS};
use promon_core::types::{DbId, UserId};

use crate::auth::resolver::authorize_project;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::response::participant::{participant_views, ParticipantView};
use crate::response::DataResponse;
use crate::services::participants::{self, AddParticipantRequest};
use crate::state::AppState;

/// POST /api/v1/projects/{id}/participants
pub async fn add(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(project_id): AppPath<DbId>,
    AppJson(input): AppJson<AddParticipantRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ParticipantView>>)> {
    authorize_project(state.store(), user.user_id, user.role, project_id, PROJECT_MANAGERS)
        .await?;
    let member = participants::add_participant(state.store(), project_id, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(ParticipantView::from(&member))),
    ))
}

/// GET /api/v1/projects/{id}/participants
pub async fn list(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(project_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<ParticipantView>>>> {
    authorize_project(state.store(), user.user_id, user.role, project_id, ANY_PARTICIPANT)
        .await?;
    let members = participants::list_participants(state.store(), project_id).await?;
    Ok(Json(DataResponse::new(participant_views(&members))))
}

/// GET /api/v1/projects/{id}/participants/{participant_id}
pub async fn get_by_id(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath((project_id, participant_id)): AppPath<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<ParticipantView>>> {
    authorize_project(state.store(), user.user_id, user.role, project_id, ANY_PARTICIPANT)
        .await?;
    let member = participants::get_participant(state.store(), project_id, participant_id).await?;
    Ok(Json(DataResponse::new(ParticipantView::from(&member))))
}

/// DELETE /api/v1/projects/{id}/participants/by-user/{user_id}
pub async fn remove(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath((project_id, user_id)): AppPath<(DbId, UserId)>,
) -> AppResult<StatusCode> {
    authorize_project(state.store(), user.user_id, user.role, project_id, PROJECT_MANAGERS)
        .await?;
    participants::remove_participant(state.store(), project_id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
