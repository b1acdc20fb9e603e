//! The persistence interface used by the HTTP layer.
//!
//! [`Store`] is the narrow set of per-entity operations the domain services
//! need. Absence is reported through `Option`/`bool`, constraint violations
//! through [`StoreError`](crate::StoreError).

use async_trait::async_trait;
use promon_core::types::{DbId, UserId};

use crate::error::StoreResult;
use crate::models::participant::{CreateParticipant, Participant, ParticipantMember};
use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::models::task::{CreateTask, Task, TaskFilter, UpdateTask};
use crate::models::user::{CreateUser, UpdateUser, User};
use crate::repositories::{ParticipantRepo, ProjectRepo, TaskRepo, UserRepo};
use crate::DbPool;

#[async_trait]
pub trait Store: Send + Sync {
    /// Confirm the backend is reachable.
    async fn ping(&self) -> StoreResult<()>;

    // -- users --------------------------------------------------------------

    async fn create_user(&self, input: &CreateUser) -> StoreResult<User>;
    async fn find_user(&self, id: UserId) -> StoreResult<Option<User>>;
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;
    async fn list_users(&self, search: Option<&str>) -> StoreResult<Vec<User>>;
    async fn update_user(&self, id: UserId, input: &UpdateUser) -> StoreResult<Option<User>>;
    async fn delete_user(&self, id: UserId) -> StoreResult<bool>;

    // -- projects -----------------------------------------------------------

    /// Create a project and its owner participant atomically.
    async fn create_project_with_owner(
        &self,
        input: &CreateProject,
        owner_id: UserId,
    ) -> StoreResult<(Project, Participant)>;
    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>>;
    async fn search_projects(&self, search: Option<&str>) -> StoreResult<Vec<Project>>;
    async fn list_projects_for_user(&self, user_id: UserId) -> StoreResult<Vec<Project>>;
    async fn update_project(&self, id: DbId, input: &UpdateProject)
        -> StoreResult<Option<Project>>;
    /// Delete a project together with its participants and tasks.
    async fn delete_project(&self, id: DbId) -> StoreResult<bool>;

    // -- participants -------------------------------------------------------

    async fn add_participant(&self, input: &CreateParticipant) -> StoreResult<Participant>;
    async fn find_participant(
        &self,
        user_id: UserId,
        project_id: DbId,
    ) -> StoreResult<Option<Participant>>;
    async fn find_participant_member(&self, id: DbId) -> StoreResult<Option<ParticipantMember>>;
    async fn list_participants(&self, project_id: DbId) -> StoreResult<Vec<ParticipantMember>>;
    /// Remove a participant and unassign their tasks in that project.
    async fn remove_participant(&self, user_id: UserId, project_id: DbId) -> StoreResult<bool>;

    // -- tasks --------------------------------------------------------------

    async fn create_task(&self, input: &CreateTask) -> StoreResult<Task>;
    async fn find_task(&self, id: DbId) -> StoreResult<Option<Task>>;
    async fn list_tasks(&self, project_id: DbId, filter: &TaskFilter) -> StoreResult<Vec<Task>>;
    async fn update_task(&self, id: DbId, input: &UpdateTask) -> StoreResult<Option<Task>>;
    async fn delete_task(&self, id: DbId) -> StoreResult<bool>;
}

/// PostgreSQL-backed [`Store`] delegating to the repositories.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        Ok(UserRepo::create(&self.pool, input).await?)
    }

    async fn find_user(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_username(&self.pool, username).await?)
    }

    async fn list_users(&self, search: Option<&str>) -> StoreResult<Vec<User>> {
        Ok(UserRepo::list(&self.pool, search).await?)
    }

    async fn update_user(&self, id: UserId, input: &UpdateUser) -> StoreResult<Option<User>> {
        Ok(UserRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_user(&self, id: UserId) -> StoreResult<bool> {
        Ok(UserRepo::delete(&self.pool, id).await?)
    }

    async fn create_project_with_owner(
        &self,
        input: &CreateProject,
        owner_id: UserId,
    ) -> StoreResult<(Project, Participant)> {
        Ok(ProjectRepo::create_with_owner(&self.pool, input, owner_id).await?)
    }

    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>> {
        Ok(ProjectRepo::find_by_id(&self.pool, id).await?)
    }

    async fn search_projects(&self, search: Option<&str>) -> StoreResult<Vec<Project>> {
        Ok(ProjectRepo::search(&self.pool, search).await?)
    }

    async fn list_projects_for_user(&self, user_id: UserId) -> StoreResult<Vec<Project>> {
        Ok(ProjectRepo::list_for_user(&self.pool, user_id).await?)
    }

    async fn update_project(
        &self,
        id: DbId,
        input: &UpdateProject,
    ) -> StoreResult<Option<Project>> {
        Ok(ProjectRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_project(&self, id: DbId) -> StoreResult<bool> {
        Ok(ProjectRepo::delete(&self.pool, id).await?)
    }

    async fn add_participant(&self, input: &CreateParticipant) -> StoreResult<Participant> {
        Ok(ParticipantRepo::create(&self.pool, input).await?)
    }

    async fn find_participant(
        &self,
        user_id: UserId,
        project_id: DbId,
    ) -> StoreResult<Option<Participant>> {
        Ok(ParticipantRepo::find(&self.pool, user_id, project_id).await?)
    }

    async fn find_participant_member(&self, id: DbId) -> StoreResult<Option<ParticipantMember>> {
        Ok(ParticipantRepo::find_member_by_id(&self.pool, id).await?)
    }

    async fn list_participants(&self, project_id: DbId) -> StoreResult<Vec<ParticipantMember>> {
        Ok(ParticipantRepo::list_members(&self.pool, project_id).await?)
    }

    async fn remove_participant(&self, user_id: UserId, project_id: DbId) -> StoreResult<bool> {
        Ok(ParticipantRepo::delete(&self.pool, user_id, project_id).await?)
    }

    async fn create_task(&self, input: &CreateTask) -> StoreResult<Task> {
        Ok(TaskRepo::create(&self.pool, input).await?)
    }

    async fn find_task(&self, id: DbId) -> StoreResult<Option<Task>> {
        Ok(TaskRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_tasks(&self, project_id: DbId, filter: &TaskFilter) -> StoreResult<Vec<Task>> {
        Ok(TaskRepo::list_by_project(&self.pool, project_id, filter).await?)
    }

    async fn update_task(&self, id: DbId, input: &UpdateTask) -> StoreResult<Option<Task>> {
        Ok(TaskRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_task(&self, id: DbId) -> StoreResult<bool> {
        Ok(TaskRepo::delete(&self.pool, id).await?)
    }
}
