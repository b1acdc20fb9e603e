//! Repository for the `users` table.

use promon_core::types::UserId;
use sqlx::PgPool;
use uuid::Uuid;

use super::like_pattern;
use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, role, username, email, first_name, last_name, group_name, \
                       github_username, color_code, password_hash, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user with a freshly generated id, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, role, username, email, first_name, last_name,
                                group_name, github_username, color_code, password_hash)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(Uuid::new_v4())
            .bind(input.role.as_str())
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.group_name)
            .bind(&input.github_username)
            .bind(&input.color_code)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by id.
    pub async fn find_by_id(pool: &PgPool, id: UserId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// List users ordered by username, optionally filtered by a
    /// case-insensitive substring of username, first or last name.
    pub async fn list(pool: &PgPool, search: Option<&str>) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE $1::TEXT IS NULL
                OR username ILIKE $1
                OR first_name ILIKE $1
                OR last_name ILIKE $1
             ORDER BY username ASC"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(search.map(like_pattern))
            .fetch_all(pool)
            .await
    }

    /// Update a user's profile. `None`/`Keep` fields are left unchanged.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: UserId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let (group_set, group_name) = input.group_name.clone().into_sql_parts();
        let (github_set, github_username) = input.github_username.clone().into_sql_parts();
        let (color_set, color_code) = input.color_code.clone().into_sql_parts();

        let query = format!(
            "UPDATE users SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                first_name = COALESCE($4, first_name),
                last_name = COALESCE($5, last_name),
                group_name = CASE WHEN $6 THEN $7 ELSE group_name END,
                github_username = CASE WHEN $8 THEN $9 ELSE github_username END,
                color_code = CASE WHEN $10 THEN $11 ELSE color_code END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(group_set)
            .bind(group_name)
            .bind(github_set)
            .bind(github_username)
            .bind(color_set)
            .bind(color_code)
            .fetch_optional(pool)
            .await
    }

    /// Delete a user. Participant rows cascade; task references are nulled.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: UserId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
