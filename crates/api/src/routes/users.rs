//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET /       -> list
/// GET /{id}   -> get_profile
/// PUT /{id}   -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list))
        .route("/{id}", get(users::get_profile).put(users::update))
}
