//! Project entity model and DTOs.

use promon_core::patch::Patch;
use promon_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub due_date: Timestamp,
    pub photo_url: Option<String>,
    pub report_url: Option<String>,
    pub report_name: Option<String>,
    pub repo_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
    pub due_date: Timestamp,
    pub photo_url: Option<String>,
}

/// Sparse project update.
///
/// `name` and `due_date` are non-nullable columns and use `Option`
/// (`None` = keep). The nullable columns use [`Patch`] so they can be cleared.
#[derive(Debug, Clone, Default)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub due_date: Option<Timestamp>,
    pub description: Patch<String>,
    pub photo_url: Patch<String>,
    pub report_url: Patch<String>,
    pub report_name: Patch<String>,
    pub repo_url: Patch<String>,
}
