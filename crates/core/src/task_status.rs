//! Task lifecycle statuses.
//!
//! The statuses form an ordered pipeline for display purposes only: any
//! status may be set from any other.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const STATUS_BACKLOG: &str = "BACKLOG";
pub const STATUS_IN_PROGRESS: &str = "IN_PROGRESS";
pub const STATUS_REVIEW: &str = "REVIEW";
pub const STATUS_DONE: &str = "DONE";

/// All valid status literals, in pipeline order.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_BACKLOG,
    STATUS_IN_PROGRESS,
    STATUS_REVIEW,
    STATUS_DONE,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Backlog,
    InProgress,
    Review,
    Done,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Backlog => STATUS_BACKLOG,
            TaskStatus::InProgress => STATUS_IN_PROGRESS,
            TaskStatus::Review => STATUS_REVIEW,
            TaskStatus::Done => STATUS_DONE,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_BACKLOG => Ok(TaskStatus::Backlog),
            STATUS_IN_PROGRESS => Ok(TaskStatus::InProgress),
            STATUS_REVIEW => Ok(TaskStatus::Review),
            STATUS_DONE => Ok(TaskStatus::Done),
            other => Err(CoreError::Validation(format!(
                "Unknown task status '{other}', expected one of: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
