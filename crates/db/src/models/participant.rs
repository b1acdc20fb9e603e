//! Participant (user x project membership) model and DTOs.

use promon_core::roles::ParticipantRole;
use promon_core::types::{DbId, Timestamp, UserId};
use sqlx::FromRow;

use super::user::ShortUser;

/// A row from the `participants` table.
#[derive(Debug, Clone, FromRow)]
pub struct Participant {
    pub id: DbId,
    pub user_id: UserId,
    pub project_id: DbId,
    #[sqlx(try_from = "String")]
    pub role: ParticipantRole,
    pub created_at: Timestamp,
}

/// A participant together with the short view of its user.
#[derive(Debug, Clone)]
pub struct ParticipantMember {
    pub participant: Participant,
    pub user: ShortUser,
}

/// DTO for adding a participant to a project.
#[derive(Debug, Clone)]
pub struct CreateParticipant {
    pub user_id: UserId,
    pub project_id: DbId,
    pub role: ParticipantRole,
}
