//! Project operations.

use promon_core::error::CoreError;
use promon_core::patch::Patch;
use promon_core::types::{DbId, Timestamp, UserId};
use promon_core::validation::{validate_input, validate_max_length, validate_not_blank};
use promon_db::models::participant::ParticipantMember;
use promon_db::models::project::{CreateProject, Project, UpdateProject};
use promon_db::models::task::{Task, TaskFilter};
use promon_db::Store;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Request body for `POST /projects`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    #[validate(length(max = 255))]
    pub name: String,
    pub description: Option<String>,
    pub due_date: Timestamp,
    #[serde(rename = "avatar")]
    pub photo_url: Option<String>,
}

/// Request body for `PUT /projects/{id}`.
///
/// `name` and `dueDate` may be omitted but not cleared.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub due_date: Patch<Timestamp>,
    #[serde(default, rename = "avatar")]
    pub photo_url: Patch<String>,
    #[serde(default)]
    pub report_url: Patch<String>,
    #[serde(default)]
    pub report_name: Patch<String>,
    #[serde(default, rename = "repo")]
    pub repo_url: Patch<String>,
}

/// Everything shown on a project page.
#[derive(Debug)]
pub struct ProjectInfo {
    pub project: Project,
    pub participants: Vec<ParticipantMember>,
    pub tasks: Vec<Task>,
}

/// Create a project with `creator_id` as its owner.
///
/// The project row and the owner participant are written in one
/// transaction: either both exist afterwards or neither does.
pub async fn create_project(
    store: &dyn Store,
    creator_id: UserId,
    input: CreateProjectRequest,
) -> AppResult<(Project, ParticipantMember)> {
    validate_input(&input)?;
    validate_not_blank(&input.name, "name")?;

    let (project, owner) = store
        .create_project_with_owner(
            &CreateProject {
                name: input.name.trim().to_string(),
                description: input.description,
                due_date: input.due_date,
                photo_url: input.photo_url,
            },
            creator_id,
        )
        .await?;

    let owner = store
        .find_participant_member(owner.id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!(
                "Owner participant {} missing right after creating project {}",
                owner.id, project.id
            ))
        })?;

    tracing::info!(project_id = project.id, owner_id = %creator_id, "Project created");
    Ok((project, owner))
}

pub async fn find_project(store: &dyn Store, id: DbId) -> AppResult<Project> {
    store
        .find_project(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Project", id).into())
}

/// Assemble the project page from three independent reads.
///
/// The reads are not isolated from each other; a concurrent write can
/// show up in one list and not another.
pub async fn get_project_info(store: &dyn Store, id: DbId) -> AppResult<ProjectInfo> {
    let project = find_project(store, id).await?;
    let participants = store.list_participants(id).await?;
    let tasks = store.list_tasks(id, &TaskFilter::default()).await?;
    Ok(ProjectInfo {
        project,
        participants,
        tasks,
    })
}

pub async fn get_project_with_participants(
    store: &dyn Store,
    id: DbId,
) -> AppResult<(Project, Vec<ParticipantMember>)> {
    let project = find_project(store, id).await?;
    let participants = store.list_participants(id).await?;
    Ok((project, participants))
}

/// Case-insensitive name search, each hit with its participants.
pub async fn search_projects(
    store: &dyn Store,
    search: Option<&str>,
) -> AppResult<Vec<(Project, Vec<ParticipantMember>)>> {
    let projects = store.search_projects(search).await?;
    let mut result = Vec::with_capacity(projects.len());
    for project in projects {
        let participants = store.list_participants(project.id).await?;
        result.push((project, participants));
    }
    Ok(result)
}

pub async fn update_project(
    store: &dyn Store,
    id: DbId,
    input: UpdateProjectRequest,
) -> AppResult<Project> {
    let name = input.name.into_required("name")?;
    if let Some(name) = &name {
        validate_not_blank(name, "name")?;
        validate_max_length(name.trim(), "name", 255)?;
    }

    let patch = UpdateProject {
        name: name.map(|n| n.trim().to_string()),
        due_date: input.due_date.into_required("dueDate")?,
        description: input.description,
        photo_url: input.photo_url,
        report_url: input.report_url,
        report_name: input.report_name,
        repo_url: input.repo_url,
    };

    let project = store
        .update_project(id, &patch)
        .await?
        .ok_or_else(|| CoreError::not_found("Project", id))?;

    tracing::info!(project_id = id, "Project updated");
    Ok(project)
}

/// Delete a project with its participants and tasks.
pub async fn delete_project(store: &dyn Store, id: DbId) -> AppResult<()> {
    if !store.delete_project(id).await? {
        return Err(CoreError::not_found("Project", id).into());
    }
    tracing::info!(project_id = id, "Project deleted");
    Ok(())
}
