//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod participant_repo;
pub mod project_repo;
pub mod task_repo;
pub mod user_repo;

pub use participant_repo::ParticipantRepo;
pub use project_repo::ProjectRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;

/// Build an `ILIKE` substring pattern, escaping the LIKE wildcards in `search`.
pub(crate) fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("web"), "%web%");
        assert_eq!(like_pattern("100%_ok"), "%100\\%\\_ok%");
    }
}
