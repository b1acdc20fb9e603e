//! In-process [`Store`] backed by ordered maps behind a single `RwLock`.
//!
//! Mirrors the PostgreSQL schema's constraints (unique usernames/emails, one
//! participant row per user and project, a single owner per project, foreign
//! keys and cascades) so the same service code behaves identically on both
//! backends. Every write holds the lock for its whole duration, which makes
//! multi-row operations such as cascading deletes atomic.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use promon_core::patch::Patch;
use promon_core::roles::ParticipantRole;
use promon_core::types::{DbId, UserId};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::participant::{CreateParticipant, Participant, ParticipantMember};
use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::models::task::{CreateTask, Task, TaskFilter, UpdateTask};
use crate::models::user::{CreateUser, ShortUser, UpdateUser, User};
use crate::store::Store;

#[derive(Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    projects: BTreeMap<DbId, Project>,
    participants: BTreeMap<DbId, Participant>,
    tasks: BTreeMap<DbId, Task>,
    next_project_id: DbId,
    next_participant_id: DbId,
    next_task_id: DbId,
}

impl Tables {
    fn next_id(counter: &mut DbId) -> DbId {
        *counter += 1;
        *counter
    }

    fn check_user_unique(
        &self,
        username: &str,
        email: &str,
        except: Option<UserId>,
    ) -> StoreResult<()> {
        for user in self.users.values().filter(|u| Some(u.id) != except) {
            if user.username == username {
                return Err(conflict("uq_users_username"));
            }
            if user.email == email {
                return Err(conflict("uq_users_email"));
            }
        }
        Ok(())
    }

    fn find_participant(&self, user_id: UserId, project_id: DbId) -> Option<&Participant> {
        self.participants
            .values()
            .find(|p| p.user_id == user_id && p.project_id == project_id)
    }

    fn insert_participant(&mut self, input: &CreateParticipant) -> StoreResult<Participant> {
        if !self.users.contains_key(&input.user_id) {
            return Err(invalid_reference("participants_user_id_fkey"));
        }
        if !self.projects.contains_key(&input.project_id) {
            return Err(invalid_reference("participants_project_id_fkey"));
        }
        if self.find_participant(input.user_id, input.project_id).is_some() {
            return Err(conflict("uq_participants_user_project"));
        }
        if input.role == ParticipantRole::Owner
            && self
                .participants
                .values()
                .any(|p| p.project_id == input.project_id && p.role == ParticipantRole::Owner)
        {
            return Err(conflict("uq_participants_project_owner"));
        }

        let participant = Participant {
            id: Self::next_id(&mut self.next_participant_id),
            user_id: input.user_id,
            project_id: input.project_id,
            role: input.role,
            created_at: Utc::now(),
        };
        self.participants.insert(participant.id, participant.clone());
        Ok(participant)
    }

    fn member(&self, participant: &Participant) -> Option<ParticipantMember> {
        self.users
            .get(&participant.user_id)
            .map(|user| ParticipantMember {
                participant: participant.clone(),
                user: ShortUser::from(user),
            })
    }
}

fn conflict(constraint: &str) -> StoreError {
    StoreError::Conflict(format!(
        "Duplicate value violates unique constraint: {constraint}"
    ))
}

fn invalid_reference(constraint: &str) -> StoreError {
    StoreError::InvalidReference(format!("Referenced row does not exist: {constraint}"))
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// In-memory [`Store`] implementation.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        let mut t = self.tables.write().await;
        t.check_user_unique(&input.username, &input.email, None)?;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            role: input.role,
            username: input.username.clone(),
            email: input.email.clone(),
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            group_name: input.group_name.clone(),
            github_username: input.github_username.clone(),
            color_code: input.color_code.clone(),
            password_hash: input.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        t.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let t = self.tables.read().await;
        Ok(t.users.values().find(|u| u.username == username).cloned())
    }

    async fn list_users(&self, search: Option<&str>) -> StoreResult<Vec<User>> {
        let t = self.tables.read().await;
        let mut users: Vec<User> = t
            .users
            .values()
            .filter(|u| match search {
                None => true,
                Some(s) => {
                    contains_ci(&u.username, s)
                        || contains_ci(&u.first_name, s)
                        || contains_ci(&u.last_name, s)
                }
            })
            .cloned()
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn update_user(&self, id: UserId, input: &UpdateUser) -> StoreResult<Option<User>> {
        let mut t = self.tables.write().await;
        let Some(current) = t.users.get(&id).cloned() else {
            return Ok(None);
        };

        let username = input.username.clone().unwrap_or(current.username.clone());
        let email = input.email.clone().unwrap_or(current.email.clone());
        t.check_user_unique(&username, &email, Some(id))?;

        let updated = User {
            username,
            email,
            first_name: input.first_name.clone().unwrap_or(current.first_name),
            last_name: input.last_name.clone().unwrap_or(current.last_name),
            group_name: input.group_name.clone().apply(current.group_name),
            github_username: input.github_username.clone().apply(current.github_username),
            color_code: input.color_code.clone().apply(current.color_code),
            updated_at: Utc::now(),
            ..current
        };
        t.users.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete_user(&self, id: UserId) -> StoreResult<bool> {
        let mut t = self.tables.write().await;
        if t.users.remove(&id).is_none() {
            return Ok(false);
        }
        t.participants.retain(|_, p| p.user_id != id);
        for task in t.tasks.values_mut() {
            if task.assignee_id == Some(id) {
                task.assignee_id = None;
            }
            if task.creator_id == Some(id) {
                task.creator_id = None;
            }
        }
        Ok(true)
    }

    async fn create_project_with_owner(
        &self,
        input: &CreateProject,
        owner_id: UserId,
    ) -> StoreResult<(Project, Participant)> {
        let mut t = self.tables.write().await;
        if !t.users.contains_key(&owner_id) {
            tracing::debug!(%owner_id, "Rejected project creation for unknown owner");
            return Err(invalid_reference("participants_user_id_fkey"));
        }

        let now = Utc::now();
        let project = Project {
            id: Tables::next_id(&mut t.next_project_id),
            name: input.name.clone(),
            description: input.description.clone(),
            due_date: input.due_date,
            photo_url: input.photo_url.clone(),
            report_url: None,
            report_name: None,
            repo_url: None,
            created_at: now,
            updated_at: now,
        };
        t.projects.insert(project.id, project.clone());

        let owner = t.insert_participant(&CreateParticipant {
            user_id: owner_id,
            project_id: project.id,
            role: ParticipantRole::Owner,
        });
        match owner {
            Ok(owner) => Ok((project, owner)),
            Err(err) => {
                tracing::debug!(project_id = project.id, error = %err, "Rolling back project");
                t.projects.remove(&project.id);
                Err(err)
            }
        }
    }

    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>> {
        Ok(self.tables.read().await.projects.get(&id).cloned())
    }

    async fn search_projects(&self, search: Option<&str>) -> StoreResult<Vec<Project>> {
        let t = self.tables.read().await;
        Ok(t.projects
            .values()
            .filter(|p| search.map_or(true, |s| contains_ci(&p.name, s)))
            .cloned()
            .collect())
    }

    async fn list_projects_for_user(&self, user_id: UserId) -> StoreResult<Vec<Project>> {
        let t = self.tables.read().await;
        Ok(t.projects
            .values()
            .filter(|p| t.find_participant(user_id, p.id).is_some())
            .cloned()
            .collect())
    }

    async fn update_project(
        &self,
        id: DbId,
        input: &UpdateProject,
    ) -> StoreResult<Option<Project>> {
        let mut t = self.tables.write().await;
        let Some(current) = t.projects.get(&id).cloned() else {
            return Ok(None);
        };

        let updated = Project {
            name: input.name.clone().unwrap_or(current.name),
            due_date: input.due_date.unwrap_or(current.due_date),
            description: input.description.clone().apply(current.description),
            photo_url: input.photo_url.clone().apply(current.photo_url),
            report_url: input.report_url.clone().apply(current.report_url),
            report_name: input.report_name.clone().apply(current.report_name),
            repo_url: input.repo_url.clone().apply(current.repo_url),
            updated_at: Utc::now(),
            ..current
        };
        t.projects.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete_project(&self, id: DbId) -> StoreResult<bool> {
        let mut t = self.tables.write().await;
        if t.projects.remove(&id).is_none() {
            return Ok(false);
        }
        t.participants.retain(|_, p| p.project_id != id);
        t.tasks.retain(|_, task| task.project_id != id);
        Ok(true)
    }

    async fn add_participant(&self, input: &CreateParticipant) -> StoreResult<Participant> {
        self.tables.write().await.insert_participant(input)
    }

    async fn find_participant(
        &self,
        user_id: UserId,
        project_id: DbId,
    ) -> StoreResult<Option<Participant>> {
        let t = self.tables.read().await;
        Ok(t.find_participant(user_id, project_id).cloned())
    }

    async fn find_participant_member(&self, id: DbId) -> StoreResult<Option<ParticipantMember>> {
        let t = self.tables.read().await;
        Ok(t.participants.get(&id).and_then(|p| t.member(p)))
    }

    async fn list_participants(&self, project_id: DbId) -> StoreResult<Vec<ParticipantMember>> {
        let t = self.tables.read().await;
        Ok(t.participants
            .values()
            .filter(|p| p.project_id == project_id)
            .filter_map(|p| t.member(p))
            .collect())
    }

    async fn remove_participant(&self, user_id: UserId, project_id: DbId) -> StoreResult<bool> {
        let mut t = self.tables.write().await;
        let Some(id) = t.find_participant(user_id, project_id).map(|p| p.id) else {
            return Ok(false);
        };
        t.participants.remove(&id);
        for task in t.tasks.values_mut() {
            if task.project_id == project_id && task.assignee_id == Some(user_id) {
                task.assignee_id = None;
            }
        }
        Ok(true)
    }

    async fn create_task(&self, input: &CreateTask) -> StoreResult<Task> {
        let mut t = self.tables.write().await;
        if !t.projects.contains_key(&input.project_id) {
            return Err(invalid_reference("tasks_project_id_fkey"));
        }
        if !t.users.contains_key(&input.creator_id) {
            return Err(invalid_reference("tasks_creator_id_fkey"));
        }
        if let Some(assignee) = input.assignee_id {
            if !t.users.contains_key(&assignee) {
                return Err(invalid_reference("tasks_assignee_id_fkey"));
            }
        }

        let now = Utc::now();
        let task = Task {
            id: Tables::next_id(&mut t.next_task_id),
            project_id: input.project_id,
            title: input.title.clone(),
            description: input.description.clone(),
            assignee_id: input.assignee_id,
            creator_id: Some(input.creator_id),
            status: input.status,
            estimate: input.estimate.clone(),
            created_at: now,
            updated_at: now,
        };
        t.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn find_task(&self, id: DbId) -> StoreResult<Option<Task>> {
        Ok(self.tables.read().await.tasks.get(&id).cloned())
    }

    async fn list_tasks(&self, project_id: DbId, filter: &TaskFilter) -> StoreResult<Vec<Task>> {
        let t = self.tables.read().await;
        Ok(t.tasks
            .values()
            .filter(|task| task.project_id == project_id)
            .filter(|task| filter.status.map_or(true, |s| task.status == s))
            .filter(|task| {
                filter
                    .assignee_id
                    .map_or(true, |a| task.assignee_id == Some(a))
            })
            .cloned()
            .collect())
    }

    async fn update_task(&self, id: DbId, input: &UpdateTask) -> StoreResult<Option<Task>> {
        let mut t = self.tables.write().await;
        let Some(current) = t.tasks.get(&id).cloned() else {
            return Ok(None);
        };
        if let Patch::Set(assignee) = &input.assignee_id {
            if !t.users.contains_key(assignee) {
                return Err(invalid_reference("tasks_assignee_id_fkey"));
            }
        }

        let updated = Task {
            title: input.title.clone().unwrap_or(current.title),
            status: input.status.unwrap_or(current.status),
            description: input.description.clone().apply(current.description),
            assignee_id: input.assignee_id.clone().apply(current.assignee_id),
            estimate: input.estimate.clone().apply(current.estimate),
            updated_at: Utc::now(),
            ..current
        };
        t.tasks.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete_task(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.tables.write().await.tasks.remove(&id).is_some())
    }
}
