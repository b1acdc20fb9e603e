use promon_core::roles::GlobalRole;
use promon_core::types::{Timestamp, UserId};
use promon_db::models::project::Project;
use promon_db::models::user::{ShortUser, User};
use serde::Serialize;

use super::project::ShortProjectView;

/// Short user projection, embedded in participant and task views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortUserView {
    pub id: UserId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub group: Option<String>,
    pub github_username: Option<String>,
    pub color_code: Option<String>,
}

impl From<&ShortUser> for ShortUserView {
    fn from(user: &ShortUser) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            group: user.group_name.clone(),
            github_username: user.github_username.clone(),
            color_code: user.color_code.clone(),
        }
    }
}

impl From<&User> for ShortUserView {
    fn from(user: &User) -> Self {
        Self::from(&ShortUser::from(user))
    }
}

/// Full user projection. Contact details and role, but no credentials.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: UserId,
    pub role: GlobalRole,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub group: Option<String>,
    pub github_username: Option<String>,
    pub color_code: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            role: user.role,
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            group: user.group_name.clone(),
            github_username: user.github_username.clone(),
            color_code: user.color_code.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// A user's profile page: the full user plus the projects they take part in.
#[derive(Debug, Serialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub user: UserView,
    pub projects: Vec<ShortProjectView>,
}

impl ProfileView {
    pub fn assemble(user: &User, projects: &[Project]) -> Self {
        Self {
            user: UserView::from(user),
            projects: projects.iter().map(ShortProjectView::from).collect(),
        }
    }
}

/// Registration and login result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthView {
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserView,
}
