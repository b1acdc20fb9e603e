//! Task operations.
//!
//! Tasks are addressed through their project: a task id that belongs to a
//! different project is reported as not found.

use promon_core::error::CoreError;
use promon_core::patch::Patch;
use promon_core::task_status::TaskStatus;
use promon_core::types::{DbId, UserId};
use promon_core::validation::{validate_input, validate_max_length, validate_not_blank};
use promon_db::models::task::{CreateTask, Task, TaskFilter, UpdateTask};
use promon_db::models::user::User;
use promon_db::Store;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::query::TaskListParams;
use crate::services::projects::find_project;

/// Request body for `POST /projects/{id}/tasks`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[validate(length(max = 255))]
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "assignee")]
    pub assignee_id: Option<UserId>,
    /// Defaults to `BACKLOG`.
    pub status: Option<String>,
    #[serde(rename = "estimatedTime")]
    #[validate(length(max = 64))]
    pub estimate: Option<String>,
}

/// Request body for `PUT /projects/{id}/tasks/{task_id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Patch<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default, rename = "assignee")]
    pub assignee_id: Patch<UserId>,
    #[serde(default)]
    pub status: Patch<String>,
    #[serde(default, rename = "estimatedTime")]
    pub estimate: Patch<String>,
}

/// Reject assignees who are not participants of the project.
async fn ensure_assignee_is_participant(
    store: &dyn Store,
    project_id: DbId,
    assignee_id: UserId,
) -> AppResult<()> {
    if store.find_participant(assignee_id, project_id).await?.is_none() {
        return Err(CoreError::Validation(format!(
            "User {assignee_id} is not a participant of project {project_id}"
        ))
        .into());
    }
    Ok(())
}

pub async fn create_task(
    store: &dyn Store,
    project_id: DbId,
    creator_id: UserId,
    input: CreateTaskRequest,
) -> AppResult<Task> {
    validate_input(&input)?;
    validate_not_blank(&input.title, "title")?;
    let status = match input.status.as_deref() {
        Some(s) => s.parse::<TaskStatus>()?,
        None => TaskStatus::default(),
    };

    find_project(store, project_id).await?;
    if let Some(assignee_id) = input.assignee_id {
        ensure_assignee_is_participant(store, project_id, assignee_id).await?;
    }

    let task = store
        .create_task(&CreateTask {
            project_id,
            title: input.title.trim().to_string(),
            description: input.description,
            assignee_id: input.assignee_id,
            creator_id,
            status,
            estimate: input.estimate,
        })
        .await?;

    tracing::info!(project_id, task_id = task.id, creator_id = %creator_id, "Task created");
    Ok(task)
}

pub async fn list_tasks(
    store: &dyn Store,
    project_id: DbId,
    params: &TaskListParams,
) -> AppResult<Vec<Task>> {
    let status = params
        .status
        .as_deref()
        .map(str::parse::<TaskStatus>)
        .transpose()?;

    find_project(store, project_id).await?;
    let filter = TaskFilter {
        status,
        assignee_id: params.assignee,
    };
    Ok(store.list_tasks(project_id, &filter).await?)
}

/// Load a task, requiring that it belongs to `project_id`.
pub async fn find_task(store: &dyn Store, project_id: DbId, task_id: DbId) -> AppResult<Task> {
    store
        .find_task(task_id)
        .await?
        .filter(|t| t.project_id == project_id)
        .ok_or_else(|| CoreError::not_found("Task", task_id).into())
}

/// A task with its creator and assignee users, where they still exist.
pub async fn get_task_info(
    store: &dyn Store,
    project_id: DbId,
    task_id: DbId,
) -> AppResult<(Task, Option<User>, Option<User>)> {
    let task = find_task(store, project_id, task_id).await?;
    let creator = match task.creator_id {
        Some(id) => store.find_user(id).await?,
        None => None,
    };
    let assignee = match task.assignee_id {
        Some(id) => store.find_user(id).await?,
        None => None,
    };
    Ok((task, creator, assignee))
}

pub async fn update_task(
    store: &dyn Store,
    project_id: DbId,
    task_id: DbId,
    input: UpdateTaskRequest,
) -> AppResult<Task> {
    let title = input.title.into_required("title")?;
    if let Some(title) = &title {
        validate_not_blank(title, "title")?;
        validate_max_length(title.trim(), "title", 255)?;
    }
    if let Patch::Set(estimate) = &input.estimate {
        validate_max_length(estimate, "estimatedTime", 64)?;
    }
    let status = input
        .status
        .into_required("status")?
        .map(|s| s.parse::<TaskStatus>())
        .transpose()?;

    find_task(store, project_id, task_id).await?;
    if let Patch::Set(assignee_id) = &input.assignee_id {
        ensure_assignee_is_participant(store, project_id, *assignee_id).await?;
    }

    let patch = UpdateTask {
        title: title.map(|t| t.trim().to_string()),
        status,
        description: input.description,
        assignee_id: input.assignee_id,
        estimate: input.estimate,
    };

    let task = store
        .update_task(task_id, &patch)
        .await?
        .ok_or_else(|| CoreError::not_found("Task", task_id))?;

    tracing::info!(project_id, task_id, "Task updated");
    Ok(task)
}

pub async fn delete_task(store: &dyn Store, project_id: DbId, task_id: DbId) -> AppResult<()> {
    find_task(store, project_id, task_id).await?;
    if !store.delete_task(task_id).await? {
        return Err(CoreError::not_found("Task", task_id).into());
    }
    tracing::info!(project_id, task_id, "Task deleted");
    Ok(())
}
