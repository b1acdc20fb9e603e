//! Access policy predicates.
//!
//! Authorization is evaluated as an ordered policy of two independent steps:
//!
//! 1. **Global gate** -- [`check_global_role`] compares the caller's global
//!    role against the roles an endpoint allows. An Admin caller short-circuits
//!    every project-scoped check ([`bypasses_project_scope`]).
//! 2. **Project scope** -- [`check_participant_role`] compares the caller's
//!    participant role *for that project* against the roles an operation
//!    allows. A missing participant row is always a rejection.
//!
//! The functions here are pure; loading the user and participant rows and
//! running the steps in order is the caller's job.

use crate::error::CoreError;
use crate::roles::{GlobalRole, ParticipantRole};

/// Outcome of a successful project-scoped authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectAccess {
    /// The caller is an admin; no participant row was consulted.
    AdminBypass,
    /// The caller is a participant holding this role.
    Participant(ParticipantRole),
}

/// Participant roles allowed to manage a project's membership and settings.
pub const PROJECT_MANAGERS: &[ParticipantRole] =
    &[ParticipantRole::Owner, ParticipantRole::Teamlead];

/// Only the owner.
pub const PROJECT_OWNER: &[ParticipantRole] = &[ParticipantRole::Owner];

/// Any participant, regardless of role.
pub const ANY_PARTICIPANT: &[ParticipantRole] = &[];

/// Check a global role against an allow-list. An empty list admits any role.
pub fn check_global_role(role: GlobalRole, allowed: &[GlobalRole]) -> Result<(), CoreError> {
    if allowed.is_empty() || allowed.contains(&role) {
        return Ok(());
    }
    Err(CoreError::Forbidden(format!(
        "Role '{role}' is not allowed to perform this action"
    )))
}

/// Returns `true` when the global role skips project-scoped checks entirely.
pub fn bypasses_project_scope(role: GlobalRole) -> bool {
    role == GlobalRole::Admin
}

/// Check a (possibly absent) participant role against an allow-list.
///
/// `None` means the caller has no participant row for the project and is
/// always rejected. An empty allow-list admits any participant.
pub fn check_participant_role(
    role: Option<ParticipantRole>,
    allowed: &[ParticipantRole],
) -> Result<ParticipantRole, CoreError> {
    let role = role.ok_or_else(|| {
        CoreError::Forbidden("You are not a participant of this project".into())
    })?;
    if allowed.is_empty() || allowed.contains(&role) {
        return Ok(role);
    }
    Err(CoreError::Forbidden(format!(
        "Participant role '{role}' is not allowed to perform this action"
    )))
}
