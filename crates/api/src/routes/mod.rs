pub mod admin;
pub mod auth;
pub mod health;
pub mod project;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
///
/// /users                                           list (auth)
/// /users/{id}                                      profile, update (self or admin)
///
/// /admin/users                                     list (admin)
/// /admin/users/{id}                                delete (admin)
/// /admin/projects                                  search with participants (admin)
///
/// /projects                                        create (project_manager)
/// /projects/{id}                                   info, update, delete
/// /projects/{id}/participants                      list, add
/// /projects/{id}/participants/{participant_id}     get
/// /projects/{id}/participants/by-user/{user_id}    remove
/// /projects/{id}/tasks                             list, create
/// /projects/{id}/tasks/{task_id}                   info, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Registration and login.
        .nest("/auth", auth::router())
        // Admin-only user and project management.
        .nest("/admin", admin::router())
        // User directory and profiles.
        .nest("/users", users::router())
        // Projects with their participants and tasks.
        .nest("/projects", project::router())
}
