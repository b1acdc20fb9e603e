//! Repository for the `participants` table.

use promon_core::roles::ParticipantRole;
use promon_core::types::{DbId, Timestamp, UserId};
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use crate::models::participant::{CreateParticipant, Participant, ParticipantMember};
use crate::models::user::ShortUser;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, project_id, role, created_at";

/// Participant joined with its user's display columns.
const MEMBER_SELECT: &str = "SELECT pa.id, pa.user_id, pa.project_id, pa.role, pa.created_at,
        u.username, u.first_name, u.last_name, u.group_name, u.github_username, u.color_code
     FROM participants pa
     JOIN users u ON u.id = pa.user_id";

#[derive(FromRow)]
struct MemberRow {
    id: DbId,
    user_id: UserId,
    project_id: DbId,
    #[sqlx(try_from = "String")]
    role: ParticipantRole,
    created_at: Timestamp,
    username: String,
    first_name: String,
    last_name: String,
    group_name: Option<String>,
    github_username: Option<String>,
    color_code: Option<String>,
}

impl From<MemberRow> for ParticipantMember {
    fn from(row: MemberRow) -> Self {
        ParticipantMember {
            participant: Participant {
                id: row.id,
                user_id: row.user_id,
                project_id: row.project_id,
                role: row.role,
                created_at: row.created_at,
            },
            user: ShortUser {
                id: row.user_id,
                username: row.username,
                first_name: row.first_name,
                last_name: row.last_name,
                group_name: row.group_name,
                github_username: row.github_username,
                color_code: row.color_code,
            },
        }
    }
}

/// Provides CRUD operations for project participants.
pub struct ParticipantRepo;

impl ParticipantRepo {
    /// Insert a participant, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateParticipant,
    ) -> Result<Participant, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let participant = Self::create_in_tx(&mut tx, input).await?;
        tx.commit().await?;
        Ok(participant)
    }

    /// Insert a participant within an existing transaction.
    pub(crate) async fn create_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateParticipant,
    ) -> Result<Participant, sqlx::Error> {
        let query = format!(
            "INSERT INTO participants (user_id, project_id, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(input.user_id)
            .bind(input.project_id)
            .bind(input.role.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Find the participant row for exactly this (user, project) pair.
    pub async fn find(
        pool: &PgPool,
        user_id: UserId,
        project_id: DbId,
    ) -> Result<Option<Participant>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM participants WHERE user_id = $1 AND project_id = $2");
        sqlx::query_as::<_, Participant>(&query)
            .bind(user_id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a participant by its own id, joined with its user.
    pub async fn find_member_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ParticipantMember>, sqlx::Error> {
        let query = format!("{MEMBER_SELECT} WHERE pa.id = $1");
        let row = sqlx::query_as::<_, MemberRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(ParticipantMember::from))
    }

    /// List a project's participants with their users, ordered by id.
    pub async fn list_members(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ParticipantMember>, sqlx::Error> {
        let query = format!("{MEMBER_SELECT} WHERE pa.project_id = $1 ORDER BY pa.id ASC");
        let rows = sqlx::query_as::<_, MemberRow>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(ParticipantMember::from).collect())
    }

    /// Remove a participant and unassign their tasks in that project.
    ///
    /// Returns `true` if a participant row was removed.
    pub async fn delete(
        pool: &PgPool,
        user_id: UserId,
        project_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query("DELETE FROM participants WHERE user_id = $1 AND project_id = $2")
            .bind(user_id)
            .bind(project_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query("UPDATE tasks SET assignee_id = NULL WHERE assignee_id = $1 AND project_id = $2")
            .bind(user_id)
            .bind(project_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}
