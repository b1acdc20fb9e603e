//! Project-scoped role resolution.
//!
//! Roles are per project: resolution always takes a `(user, project)` pair.
//! [`authorize_project`] is the entry point handlers use. It applies the
//! admin bypass before any participant row is read.

use promon_core::access::{bypasses_project_scope, check_participant_role, ProjectAccess};
use promon_core::error::CoreError;
use promon_core::roles::{GlobalRole, ParticipantRole};
use promon_core::types::{DbId, UserId};
use promon_db::models::participant::Participant;
use promon_db::Store;

use crate::error::{AppError, AppResult};

/// Require a participant row for exactly this `(user, project)` pair.
pub async fn verify_participant(
    store: &dyn Store,
    user_id: UserId,
    project_id: DbId,
) -> AppResult<Participant> {
    store
        .find_participant(user_id, project_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "You are not a participant of this project".into(),
            ))
        })
}

/// Require a participant row whose role is in `allowed` (empty = any role).
pub async fn verify_participant_role(
    store: &dyn Store,
    user_id: UserId,
    project_id: DbId,
    allowed: &[ParticipantRole],
) -> AppResult<ParticipantRole> {
    let participant = verify_participant(store, user_id, project_id).await?;
    let role = check_participant_role(Some(participant.role), allowed)?;
    Ok(role)
}

/// Authorize a caller for a project-scoped operation.
///
/// Admins pass without a store lookup. Everyone else must hold a
/// participant role in `allowed` for this project.
pub async fn authorize_project(
    store: &dyn Store,
    user_id: UserId,
    global_role: GlobalRole,
    project_id: DbId,
    allowed: &[ParticipantRole],
) -> AppResult<ProjectAccess> {
    if bypasses_project_scope(global_role) {
        tracing::debug!(%user_id, project_id, "Admin bypass for project scope");
        return Ok(ProjectAccess::AdminBypass);
    }

    let role = verify_participant_role(store, user_id, project_id, allowed).await?;
    Ok(ProjectAccess::Participant(role))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, Utc};
    use promon_core::access::{ANY_PARTICIPANT, PROJECT_MANAGERS, PROJECT_OWNER};
    use promon_db::models::participant::CreateParticipant;
    use promon_db::models::project::CreateProject;
    use promon_db::models::user::{CreateUser, User};
    use promon_db::MemoryStore;
    use uuid::Uuid;

    use super::*;

    async fn seed_user(store: &MemoryStore, role: GlobalRole) -> User {
        let suffix = Uuid::new_v4().simple().to_string();
        store
            .create_user(&CreateUser {
                role,
                username: format!("user_{suffix}"),
                email: format!("{suffix}@example.com"),
                first_name: "Test".into(),
                last_name: "User".into(),
                group_name: None,
                github_username: None,
                color_code: None,
                password_hash: "unused".into(),
            })
            .await
            .unwrap()
    }

    async fn seed_project(store: &MemoryStore, owner: UserId) -> DbId {
        let (project, _) = store
            .create_project_with_owner(
                &CreateProject {
                    name: "Resolver".into(),
                    description: None,
                    due_date: Utc::now() + Duration::days(7),
                    photo_url: None,
                },
                owner,
            )
            .await
            .unwrap();
        project.id
    }

    #[tokio::test]
    async fn participant_check_is_scoped_to_the_pair() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, GlobalRole::ProjectManager).await;
        let bob = seed_user(&store, GlobalRole::ProjectManager).await;
        let p1 = seed_project(&store, alice.id).await;
        let p2 = seed_project(&store, bob.id).await;

        assert!(verify_participant(&store, alice.id, p1).await.is_ok());
        assert!(verify_participant(&store, bob.id, p2).await.is_ok());
        assert_matches!(
            verify_participant(&store, alice.id, p2).await,
            Err(AppError::Core(CoreError::Forbidden(_)))
        );
        assert_matches!(
            verify_participant(&store, bob.id, p1).await,
            Err(AppError::Core(CoreError::Forbidden(_)))
        );
    }

    #[tokio::test]
    async fn member_cannot_pass_manager_gate() {
        let store = MemoryStore::new();
        let owner = seed_user(&store, GlobalRole::ProjectManager).await;
        let member = seed_user(&store, GlobalRole::Student).await;
        let project_id = seed_project(&store, owner.id).await;
        store
            .add_participant(&CreateParticipant {
                user_id: member.id,
                project_id,
                role: ParticipantRole::Member,
            })
            .await
            .unwrap();

        assert_eq!(
            verify_participant_role(&store, member.id, project_id, ANY_PARTICIPANT)
                .await
                .unwrap(),
            ParticipantRole::Member
        );
        assert_matches!(
            verify_participant_role(&store, member.id, project_id, PROJECT_MANAGERS).await,
            Err(AppError::Core(CoreError::Forbidden(_)))
        );
        assert_eq!(
            verify_participant_role(&store, owner.id, project_id, PROJECT_OWNER)
                .await
                .unwrap(),
            ParticipantRole::Owner
        );
    }

    #[tokio::test]
    async fn admin_bypasses_projects_without_participants() {
        let store = MemoryStore::new();
        let admin = seed_user(&store, GlobalRole::Admin).await;

        // No such project and no participant rows at all.
        let access = authorize_project(&store, admin.id, GlobalRole::Admin, 999, PROJECT_OWNER)
            .await
            .unwrap();
        assert_eq!(access, ProjectAccess::AdminBypass);
    }

    #[tokio::test]
    async fn non_admin_without_row_is_forbidden() {
        let store = MemoryStore::new();
        let owner = seed_user(&store, GlobalRole::ProjectManager).await;
        let outsider = seed_user(&store, GlobalRole::ProjectManager).await;
        let project_id = seed_project(&store, owner.id).await;

        assert_matches!(
            authorize_project(
                &store,
                outsider.id,
                GlobalRole::ProjectManager,
                project_id,
                ANY_PARTICIPANT
            )
            .await,
            Err(AppError::Core(CoreError::Forbidden(_)))
        );
        assert_eq!(
            authorize_project(
                &store,
                owner.id,
                GlobalRole::ProjectManager,
                project_id,
                PROJECT_OWNER
            )
            .await
            .unwrap(),
            ProjectAccess::Participant(ParticipantRole::Owner)
        );
    }

    #[tokio::test]
    async fn authorize_project_applies_participant_role_allow_list() {
        let store = MemoryStore::new();
        let owner = seed_user(&store, GlobalRole::ProjectManager).await;
        let lead = seed_user(&store, GlobalRole::Student).await;
        let project_id = seed_project(&store, owner.id).await;
        store
            .add_participant(&CreateParticipant {
                user_id: lead.id,
                project_id,
                role: ParticipantRole::Teamlead,
            })
            .await
            .unwrap();

        assert_eq!(
            authorize_project(&store, lead.id, GlobalRole::Student, project_id, PROJECT_MANAGERS)
                .await
                .unwrap(),
            ProjectAccess::Participant(ParticipantRole::Teamlead)
        );
        assert_matches!(
            authorize_project(&store, lead.id, GlobalRole::Student, project_id, PROJECT_OWNER)
                .await,
            Err(AppError::Core(CoreError::Forbidden(_)))
        );
    }
}
