//! Handlers for the `/users` resource.

use axum::extract::State;
use axum::Json;
use promon_core::roles::GlobalRole;
use promon_core::types::UserId;

use crate::auth::identity::verify_self;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequireAuth;
use crate::query::SearchParams;
use crate::response::user::{ProfileView, ShortUserView, UserView};
use crate::response::DataResponse;
use crate::services::users::{self, UpdateUserRequest};
use crate::state::AppState;

/// GET /api/v1/users?search=
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<ShortUserView>>>> {
    let found = users::list_users(state.store(), params.term()).await?;
    let views = found.iter().map(ShortUserView::from).collect();
    Ok(Json(DataResponse::new(views)))
}

/// GET /api/v1/users/{id}
pub async fn get_profile(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    AppPath(id): AppPath<UserId>,
) -> AppResult<Json<DataResponse<ProfileView>>> {
    let (user, projects) = users::get_profile(state.store(), id).await?;
    Ok(Json(DataResponse::new(ProfileView::assemble(&user, &projects))))
}

/// PUT /api/v1/users/{id}
///
/// Users edit their own profile; admins may edit anyone's.
pub async fn update(
    RequireAuth(caller): RequireAuth,
    State(state): State<AppState>,
    AppPath(id): AppPath<UserId>,
    AppJson(input): AppJson<UpdateUserRequest>,
) -> AppResult<Json<DataResponse<UserView>>> {
    if caller.role != GlobalRole::Admin {
        verify_self(caller.user_id, id)?;
    }
    let user = users::update_user(state.store(), id, input).await?;
    Ok(Json(DataResponse::new(UserView::from(&user))))
}
