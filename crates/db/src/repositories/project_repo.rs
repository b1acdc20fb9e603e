//! Repository for the `projects` table.

use promon_core::roles::ParticipantRole;
use promon_core::types::{DbId, UserId};
use sqlx::PgPool;

use super::like_pattern;
use super::participant_repo::ParticipantRepo;
use crate::models::participant::{CreateParticipant, Participant};
use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, due_date, photo_url, report_url, report_name, \
                       repo_url, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project and its owner participant in one transaction.
    ///
    /// Either both rows are committed or neither is.
    pub async fn create_with_owner(
        pool: &PgPool,
        input: &CreateProject,
        owner_id: UserId,
    ) -> Result<(Project, Participant), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects (name, description, due_date, photo_url)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.due_date)
            .bind(&input.photo_url)
            .fetch_one(&mut *tx)
            .await?;

        let owner = ParticipantRepo::create_in_tx(
            &mut tx,
            &CreateParticipant {
                user_id: owner_id,
                project_id: project.id,
                role: ParticipantRole::Owner,
            },
        )
        .await
        .inspect_err(|e| {
            tracing::debug!(
                project_id = project.id,
                %owner_id,
                error = %e,
                "Owner insert failed, rolling back project"
            );
        })?;

        tx.commit().await?;
        Ok((project, owner))
    }

    /// Find a project by its id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Search projects by case-insensitive name substring, ordered by id.
    /// `None` lists every project.
    pub async fn search(pool: &PgPool, search: Option<&str>) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE $1::TEXT IS NULL OR name ILIKE $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(search.map(like_pattern))
            .fetch_all(pool)
            .await
    }

    /// List the projects a user participates in, ordered by id.
    pub async fn list_for_user(pool: &PgPool, user_id: UserId) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {cols} FROM projects p
             JOIN participants pa ON pa.project_id = p.id
             WHERE pa.user_id = $1
             ORDER BY p.id ASC",
            cols = prefixed_columns("p")
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a project. `None`/`Keep` fields are left unchanged.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let (description_set, description) = input.description.clone().into_sql_parts();
        let (photo_set, photo_url) = input.photo_url.clone().into_sql_parts();
        let (report_url_set, report_url) = input.report_url.clone().into_sql_parts();
        let (report_name_set, report_name) = input.report_name.clone().into_sql_parts();
        let (repo_set, repo_url) = input.repo_url.clone().into_sql_parts();

        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                due_date = COALESCE($3, due_date),
                description = CASE WHEN $4 THEN $5 ELSE description END,
                photo_url = CASE WHEN $6 THEN $7 ELSE photo_url END,
                report_url = CASE WHEN $8 THEN $9 ELSE report_url END,
                report_name = CASE WHEN $10 THEN $11 ELSE report_name END,
                repo_url = CASE WHEN $12 THEN $13 ELSE repo_url END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.due_date)
            .bind(description_set)
            .bind(description)
            .bind(photo_set)
            .bind(photo_url)
            .bind(report_url_set)
            .bind(report_url)
            .bind(report_name_set)
            .bind(report_name)
            .bind(repo_set)
            .bind(repo_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project. Participants and tasks are removed by `ON DELETE
    /// CASCADE` within the same statement.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn prefixed_columns(alias: &str) -> String {
    COLUMNS
        .split(',')
        .map(|c| format!("{alias}.{}", c.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}
