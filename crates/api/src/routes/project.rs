//! Route definitions for the `/projects` resource and its nested
//! participant and task collections.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{participant, project, task};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// POST   /                                        -> project::create
/// GET    /{id}                                    -> project::get_info
/// PUT    /{id}                                    -> project::update
/// DELETE /{id}                                    -> project::delete
///
/// GET    /{id}/participants                       -> participant::list
/// POST   /{id}/participants                       -> participant::add
/// GET    /{id}/participants/{participant_id}      -> participant::get_by_id
/// DELETE /{id}/participants/by-user/{user_id}     -> participant::remove
///
/// GET    /{id}/tasks                              -> task::list
/// POST   /{id}/tasks                              -> task::create
/// GET    /{id}/tasks/{task_id}                    -> task::get_info
/// PUT    /{id}/tasks/{task_id}                    -> task::update
/// DELETE /{id}/tasks/{task_id}                    -> task::delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(project::create))
        .route(
            "/{id}",
            get(project::get_info)
                .put(project::update)
                .delete(project::delete),
        )
        .route(
            "/{id}/participants",
            get(participant::list).post(participant::add),
        )
        .route(
            "/{id}/participants/{participant_id}",
            get(participant::get_by_id),
        )
        .route(
            "/{id}/participants/by-user/{user_id}",
            delete(participant::remove),
        )
        .route("/{id}/tasks", get(task::list).post(task::create))
        .route(
            "/{id}/tasks/{task_id}",
            get(task::get_info)
                .put(task::update)
                .delete(task::delete),
        )
}
