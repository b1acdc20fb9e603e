//! Shared query parameter types for API handlers.

use promon_core::types::UserId;
use serde::Deserialize;

/// `?search=` on list endpoints. Blank values are treated as absent.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

impl SearchParams {
    pub fn term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// `?status=&assignee=` on the task list.
///
/// `status` stays a string so unknown literals surface as a validation
/// error rather than a deserialization rejection.
#[derive(Debug, Default, Deserialize)]
pub struct TaskListParams {
    pub status: Option<String>,
    pub assignee: Option<UserId>,
}
