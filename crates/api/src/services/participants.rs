//! Project membership operations.

use promon_core::error::CoreError;
use promon_core::roles::ParticipantRole;
use promon_core::types::{DbId, UserId};
use promon_db::models::participant::{CreateParticipant, ParticipantMember};
use promon_db::Store;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::services::projects::find_project;

/// Request body for `POST /projects/{id}/participants`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddParticipantRequest {
    pub user_id: UserId,
    /// `teamlead` or `member`.
    pub role: String,
}

/// Add a user to a project.
///
/// The owner is fixed at creation, so `owner` is rejected here.
pub async fn add_participant(
    store: &dyn Store,
    project_id: DbId,
    input: AddParticipantRequest,
) -> AppResult<ParticipantMember> {
    let role: ParticipantRole = input.role.parse()?;
    if role == ParticipantRole::Owner {
        return Err(CoreError::Validation("A project can only have one owner".into()).into());
    }

    find_project(store, project_id).await?;
    if store.find_user(input.user_id).await?.is_none() {
        return Err(CoreError::not_found("User", input.user_id).into());
    }

    let participant = store
        .add_participant(&CreateParticipant {
            user_id: input.user_id,
            project_id,
            role,
        })
        .await?;

    tracing::info!(project_id, user_id = %input.user_id, role = %role, "Participant added");

    store
        .find_participant_member(participant.id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!(
                "Participant {} missing right after insert",
                participant.id
            ))
        })
}

pub async fn list_participants(
    store: &dyn Store,
    project_id: DbId,
) -> AppResult<Vec<ParticipantMember>> {
    find_project(store, project_id).await?;
    Ok(store.list_participants(project_id).await?)
}

/// Look up a participant by its own id, scoped to `project_id`.
pub async fn get_participant(
    store: &dyn Store,
    project_id: DbId,
    participant_id: DbId,
) -> AppResult<ParticipantMember> {
    store
        .find_participant_member(participant_id)
        .await?
        .filter(|m| m.participant.project_id == project_id)
        .ok_or_else(|| CoreError::not_found("Participant", participant_id).into())
}

/// Remove a user from a project and unassign their tasks there.
///
/// The owner cannot be removed.
pub async fn remove_participant(
    store: &dyn Store,
    project_id: DbId,
    user_id: UserId,
) -> AppResult<()> {
    let participant = store
        .find_participant(user_id, project_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Participant", user_id))?;

    if participant.role == ParticipantRole::Owner {
        return Err(CoreError::Validation("The project owner cannot be removed".into()).into());
    }

    if !store.remove_participant(user_id, project_id).await? {
        return Err(CoreError::not_found("Participant", user_id).into());
    }

    tracing::info!(project_id, user_id = %user_id, "Participant removed");
    Ok(())
}
