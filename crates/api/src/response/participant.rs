use promon_core::roles::ParticipantRole;
use promon_core::types::{DbId, Timestamp};
use promon_db::models::participant::ParticipantMember;
use serde::Serialize;

use super::user::ShortUserView;

/// A participant with the short view of its user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantView {
    pub id: DbId,
    pub project_id: DbId,
    pub role: ParticipantRole,
    pub user: ShortUserView,
    pub created_at: Timestamp,
}

impl From<&ParticipantMember> for ParticipantView {
    fn from(member: &ParticipantMember) -> Self {
        Self {
            id: member.participant.id,
            project_id: member.participant.project_id,
            role: member.participant.role,
            user: ShortUserView::from(&member.user),
            created_at: member.participant.created_at,
        }
    }
}

pub fn participant_views(members: &[ParticipantMember]) -> Vec<ParticipantView> {
    members.iter().map(ParticipantView::from).collect()
}
