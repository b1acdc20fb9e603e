//! Handlers for the `/projects` resource.
//!
//! Every handler authorizes against the project in the path before calling
//! into the service layer.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use promon_core::access::{ANY_PARTICIPANT, PROJECT_MANAGERS, PROJECT_OWNER};
use promon_core::types::DbId;

use crate::auth::resolver::authorize_project;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireProjectManager;
use crate::response::project::{CreatedProjectView, ProjectInfoView, ProjectWithParticipantsView};
use crate::response::DataResponse;
use crate::services::projects::{self, CreateProjectRequest, UpdateProjectRequest};
use crate::state::AppState;

/// POST /api/v1/projects
pub async fn create(
    RequireProjectManager(user): RequireProjectManager,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedProjectView>>)> {
    let (project, owner) = projects::create_project(state.store(), user.user_id, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(CreatedProjectView::assemble(&project, &owner))),
    ))
}

/// GET /api/v1/projects/{id}
pub async fn get_info(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<ProjectInfoView>>> {
    authorize_project(state.store(), user.user_id, user.role, id, ANY_PARTICIPANT).await?;
    let info = projects::get_project_info(state.store(), id).await?;
    Ok(Json(DataResponse::new(ProjectInfoView::assemble(
        &info.project,
        &info.participants,
        &info.tasks,
    ))))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateProjectRequest>,
) -> AppResult<Json<DataResponse<ProjectWithParticipantsView>>> {
    authorize_project(state.store(), user.user_id, user.role, id, PROJECT_MANAGERS).await?;
    let project = projects::update_project(state.store(), id, input).await?;
    let members = state.store().list_participants(project.id).await?;
    Ok(Json(DataResponse::new(ProjectWithParticipantsView::assemble(
        &project, &members,
    ))))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    authorize_project(state.store(), user.user_id, user.role, id, PROJECT_OWNER).await?;
    projects::delete_project(state.store(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
