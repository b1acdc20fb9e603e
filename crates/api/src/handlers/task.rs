//! Handlers for `/projects/{id}/tasks`.
//!
//! Any participant of the project (or an admin) may work with its tasks.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use promon_core::access::ANY_PARTICIPANT;
use promon_core::types::DbId;

use crate::auth::resolver::authorize_project;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::query::TaskListParams;
use crate::response::task::{ShortTaskView, TaskInfoView, TaskView};
use crate::response::DataResponse;
use crate::services::tasks::{self, CreateTaskRequest, UpdateTaskRequest};
use crate::state::AppState;

/// POST /api/v1/projects/{id}/tasks
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(project_id): AppPath<DbId>,
    AppJson(input): AppJson<CreateTaskRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<TaskView>>)> {
    authorize_project(state.store(), user.user_id, user.role, project_id, ANY_PARTICIPANT)
        .await?;
    let task = tasks::create_task(state.store(), project_id, user.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(TaskView::from(&task)))))
}

/// GET /api/v1/projects/{id}/tasks?status=&assignee=
pub async fn list(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(project_id): AppPath<DbId>,
    AppQuery(params): AppQuery<TaskListParams>,
) -> AppResult<Json<DataResponse<Vec<ShortTaskView>>>> {
    authorize_project(state.store(), user.user_id, user.role, project_id, ANY_PARTICIPANT)
        .await?;
    let found = tasks::list_tasks(state.store(), project_id, &params).await?;
    Ok(Json(DataResponse::new(
        found.iter().map(ShortTaskView::from).collect(),
    )))
}

/// GET /api/v1/projects/{id}/tasks/{task_id}
pub async fn get_info(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath((project_id, task_id)): AppPath<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<TaskInfoView>>> {
    authorize_project(state.store(), user.user_id, user.role, project_id, ANY_PARTICIPANT)
        .await?;
    let (task, creator, assignee) = tasks::get_task_info(state.store(), project_id, task_id).await?;
    Ok(Json(DataResponse::new(TaskInfoView::assemble(
        &task,
        creator.as_ref(),
        assignee.as_ref(),
    ))))
}

/// PUT /api/v1/projects/{id}/tasks/{task_id}
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath((project_id, task_id)): AppPath<(DbId, DbId)>,
    AppJson(input): AppJson<UpdateTaskRequest>,
) -> AppResult<Json<DataResponse<TaskView>>> {
    authorize_project(state.store(), user.user_id, user.role, project_id, ANY_PARTICIPANT)
        .await?;
    let task = tasks::update_task(state.store(), project_id, task_id, input).await?;
    Ok(Json(DataResponse::new(TaskView::from(&task))))
}

/// DELETE /api/v1/projects/{id}/tasks/{task_id}
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath((project_id, task_id)): AppPath<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    authorize_project(state.store(), user.user_id, user.role, project_id, ANY_PARTICIPANT)
        .await?;
    tasks::delete_task(state.store(), project_id, task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
