use promon_core::task_status::TaskStatus;
use promon_core::types::{DbId, Timestamp, UserId};
use promon_db::models::task::Task;
use promon_db::models::user::User;
use serde::Serialize;

use super::user::ShortUserView;

/// Short task projection, used on boards and inside the project page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortTaskView {
    pub id: DbId,
    pub title: String,
    pub status: TaskStatus,
    pub assignee: Option<UserId>,
    pub estimated_time: Option<String>,
    pub updated_at: Timestamp,
}

impl From<&Task> for ShortTaskView {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            status: task.status,
            assignee: task.assignee_id,
            estimated_time: task.estimate.clone(),
            updated_at: task.updated_at,
        }
    }
}

/// Full task projection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub assignee: Option<UserId>,
    pub creator_id: Option<UserId>,
    pub status: TaskStatus,
    pub estimated_time: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            project_id: task.project_id,
            title: task.title.clone(),
            description: task.description.clone(),
            assignee: task.assignee_id,
            creator_id: task.creator_id,
            status: task.status,
            estimated_time: task.estimate.clone(),
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

/// A task with the short views of its creator and assignee.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfoView {
    #[serde(flatten)]
    pub task: TaskView,
    pub creator: Option<ShortUserView>,
    pub assigned_to: Option<ShortUserView>,
}

impl TaskInfoView {
    pub fn assemble(task: &Task, creator: Option<&User>, assignee: Option<&User>) -> Self {
        Self {
            task: TaskView::from(task),
            creator: creator.map(ShortUserView::from),
            assigned_to: assignee.map(ShortUserView::from),
        }
    }
}
