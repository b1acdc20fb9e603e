//! Task entity model and DTOs.

use promon_core::patch::Patch;
use promon_core::task_status::TaskStatus;
use promon_core::types::{DbId, Timestamp, UserId};
use sqlx::FromRow;

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow)]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub assignee_id: Option<UserId>,
    /// Required on creation; becomes `None` if the creator's account is deleted.
    pub creator_id: Option<UserId>,
    #[sqlx(try_from = "String")]
    pub status: TaskStatus,
    pub estimate: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new task.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub assignee_id: Option<UserId>,
    pub creator_id: UserId,
    pub status: TaskStatus,
    pub estimate: Option<String>,
}

/// Sparse task update.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub status: Option<TaskStatus>,
    pub description: Patch<String>,
    pub assignee_id: Patch<UserId>,
    pub estimate: Patch<String>,
}

/// Optional filters for listing a project's tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub assignee_id: Option<UserId>,
}
