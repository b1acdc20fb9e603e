//! Repository for the `tasks` table.

use promon_core::types::DbId;
use sqlx::PgPool;

use crate::models::task::{CreateTask, Task, TaskFilter, UpdateTask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, title, description, assignee_id, creator_id, status, \
                       estimate, created_at, updated_at";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (project_id, title, description, assignee_id, creator_id, status, estimate)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(input.project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.assignee_id)
            .bind(input.creator_id)
            .bind(input.status.as_str())
            .bind(&input.estimate)
            .fetch_one(pool)
            .await
    }

    /// Find a task by its id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's tasks ordered by id, applying the optional filters.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
        filter: &TaskFilter,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE project_id = $1
               AND ($2::TEXT IS NULL OR status = $2)
               AND ($3::UUID IS NULL OR assignee_id = $3)
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.assignee_id)
            .fetch_all(pool)
            .await
    }

    /// Update a task. `None`/`Keep` fields are left unchanged.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let (description_set, description) = input.description.clone().into_sql_parts();
        let (assignee_set, assignee_id) = input.assignee_id.clone().into_sql_parts();
        let (estimate_set, estimate) = input.estimate.clone().into_sql_parts();

        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($2, title),
                status = COALESCE($3, status),
                description = CASE WHEN $4 THEN $5 ELSE description END,
                assignee_id = CASE WHEN $6 THEN $7 ELSE assignee_id END,
                estimate = CASE WHEN $8 THEN $9 ELSE estimate END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.status.map(|s| s.as_str()))
            .bind(description_set)
            .bind(description)
            .bind(assignee_set)
            .bind(assignee_id)
            .bind(estimate_set)
            .bind(estimate)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
