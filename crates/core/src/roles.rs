//! Global (user-level) and project-scoped (participant) roles.
//!
//! Both are stored as TEXT columns; the string forms below must match the
//! `CHECK` constraints in the `users` and `participants` migrations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_STUDENT: &str = "student";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_PROJECT_MANAGER: &str = "project_manager";

pub const PARTICIPANT_OWNER: &str = "owner";
pub const PARTICIPANT_TEAMLEAD: &str = "teamlead";
pub const PARTICIPANT_MEMBER: &str = "member";

/// User-level permission tier, independent of any project.
///
/// Set at registration and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalRole {
    Student,
    Admin,
    ProjectManager,
}

impl GlobalRole {
    pub fn as_str(self) -> &'static str {
        match self {
            GlobalRole::Student => ROLE_STUDENT,
            GlobalRole::Admin => ROLE_ADMIN,
            GlobalRole::ProjectManager => ROLE_PROJECT_MANAGER,
        }
    }
}

impl fmt::Display for GlobalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GlobalRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_STUDENT => Ok(GlobalRole::Student),
            ROLE_ADMIN => Ok(GlobalRole::Admin),
            ROLE_PROJECT_MANAGER => Ok(GlobalRole::ProjectManager),
            other => Err(CoreError::Validation(format!("Unknown role '{other}'"))),
        }
    }
}

impl TryFrom<String> for GlobalRole {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Project-scoped permission tier held by a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantRole {
    Owner,
    Teamlead,
    Member,
}

impl ParticipantRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ParticipantRole::Owner => PARTICIPANT_OWNER,
            ParticipantRole::Teamlead => PARTICIPANT_TEAMLEAD,
            ParticipantRole::Member => PARTICIPANT_MEMBER,
        }
    }
}

impl fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParticipantRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PARTICIPANT_OWNER => Ok(ParticipantRole::Owner),
            PARTICIPANT_TEAMLEAD => Ok(ParticipantRole::Teamlead),
            PARTICIPANT_MEMBER => Ok(ParticipantRole::Member),
            other => Err(CoreError::Validation(format!(
                "Unknown participant role '{other}'"
            ))),
        }
    }
}

impl TryFrom<String> for ParticipantRole {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
