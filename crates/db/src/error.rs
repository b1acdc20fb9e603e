//! Errors surfaced by [`Store`](crate::Store) implementations.
//!
//! Absence is not an error at this layer: lookups return `Option`, updates
//! return `Option`, deletes return `bool`. Only constraint violations and
//! backend failures are reported here.

/// PostgreSQL `unique_violation`.
const PG_UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL `foreign_key_violation`.
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated (e.g. duplicate participant).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A row references an entity that does not exist.
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// Any other backend failure.
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            match db_err.code().as_deref() {
                Some(PG_UNIQUE_VIOLATION) => {
                    return StoreError::Conflict(format!(
                        "Duplicate value violates unique constraint: {constraint}"
                    ));
                }
                Some(PG_FOREIGN_KEY_VIOLATION) => {
                    return StoreError::InvalidReference(format!(
                        "Referenced row does not exist: {constraint}"
                    ));
                }
                _ => {}
            }
        }
        StoreError::Database(err)
    }
}
