use promon_core::types::{DbId, Timestamp};
use promon_db::models::participant::ParticipantMember;
use promon_db::models::project::Project;
use promon_db::models::task::Task;
use serde::Serialize;

use super::participant::{participant_views, ParticipantView};
use super::task::ShortTaskView;

/// Short project projection, used in lists and on profiles.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortProjectView {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub avatar: Option<String>,
    pub due_date: Timestamp,
}

impl From<&Project> for ShortProjectView {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            description: project.description.clone(),
            avatar: project.photo_url.clone(),
            due_date: project.due_date,
        }
    }
}

/// Full project projection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub avatar: Option<String>,
    pub due_date: Timestamp,
    pub report_url: Option<String>,
    pub report_name: Option<String>,
    pub repo: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Project> for ProjectView {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            description: project.description.clone(),
            avatar: project.photo_url.clone(),
            due_date: project.due_date,
            report_url: project.report_url.clone(),
            report_name: project.report_name.clone(),
            repo: project.repo_url.clone(),
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

/// A project with its participants.
#[derive(Debug, Serialize)]
pub struct ProjectWithParticipantsView {
    #[serde(flatten)]
    pub project: ProjectView,
    pub participants: Vec<ParticipantView>,
}

impl ProjectWithParticipantsView {
    pub fn assemble(project: &Project, members: &[ParticipantMember]) -> Self {
        Self {
            project: ProjectView::from(project),
            participants: participant_views(members),
        }
    }
}

/// The project page: project, participants and short tasks.
#[derive(Debug, Serialize)]
pub struct ProjectInfoView {
    #[serde(flatten)]
    pub project: ProjectView,
    pub participants: Vec<ParticipantView>,
    pub tasks: Vec<ShortTaskView>,
}

impl ProjectInfoView {
    pub fn assemble(project: &Project, members: &[ParticipantMember], tasks: &[Task]) -> Self {
        Self {
            project: ProjectView::from(project),
            participants: participant_views(members),
            tasks: tasks.iter().map(ShortTaskView::from).collect(),
        }
    }
}

/// Result of project creation: the project and its owner.
#[derive(Debug, Serialize)]
pub struct CreatedProjectView {
    #[serde(flatten)]
    pub project: ProjectView,
    pub owner: ParticipantView,
}

impl CreatedProjectView {
    pub fn assemble(project: &Project, owner: &ParticipantMember) -> Self {
        Self {
            project: ProjectView::from(project),
            owner: ParticipantView::from(owner),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use promon_core::roles::ParticipantRole;
    use promon_core::task_status::TaskStatus;
    use promon_db::models::participant::Participant;
    use promon_db::models::user::ShortUser;
    use uuid::Uuid;

    use super::*;

    fn sample_project() -> Project {
        Project {
            id: 7,
            name: "Compiler".into(),
            description: Some("A toy compiler".into()),
            due_date: Utc::now(),
            photo_url: Some("https://img.example/c.png".into()),
            report_url: None,
            report_name: None,
            repo_url: Some("https://git.example/compiler".into()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_member(project_id: DbId) -> ParticipantMember {
        let user_id = Uuid::new_v4();
        ParticipantMember {
            participant: Participant {
                id: 1,
                user_id,
                project_id,
                role: ParticipantRole::Owner,
                created_at: Utc::now(),
            },
            user: ShortUser {
                id: user_id,
                username: "owner".into(),
                first_name: "Olga".into(),
                last_name: "Owner".into(),
                group_name: None,
                github_username: None,
                color_code: None,
            },
        }
    }

    fn sample_task(project_id: DbId) -> Task {
        Task {
            id: 3,
            project_id,
            title: "Lexer".into(),
            description: Some("Tokenize input".into()),
            assignee_id: None,
            creator_id: Some(Uuid::new_v4()),
            status: TaskStatus::InProgress,
            estimate: Some("2d".into()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn project_info_nests_participants_and_short_tasks() {
        let project = sample_project();
        let view = ProjectInfoView::assemble(
            &project,
            &[sample_member(project.id)],
            &[sample_task(project.id)],
        );
        let json = serde_json::to_value(view).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["avatar"], "https://img.example/c.png");
        assert_eq!(json["repo"], "https://git.example/compiler");
        assert_eq!(json["participants"][0]["role"], "owner");
        assert_eq!(json["participants"][0]["user"]["username"], "owner");
        assert_eq!(json["tasks"][0]["title"], "Lexer");
        assert_eq!(json["tasks"][0]["status"], "IN_PROGRESS");
        // Short tasks leave out the description.
        assert!(json["tasks"][0].get("description").is_none());
    }

    #[test]
    fn short_project_leaves_out_links() {
        let json = serde_json::to_value(ShortProjectView::from(&sample_project())).unwrap();
        assert!(json.get("repo").is_none());
        assert!(json.get("reportUrl").is_none());
        assert!(json.get("dueDate").is_some());
    }
}
