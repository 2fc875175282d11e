//! User profile handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::JsonBody;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::serializers::{user, RequestContext, UserRepresentation, UserUpdateInput};

/// Create user routes (require authentication)
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_current_user))
        .route("/:id", get(get_user).put(update_user))
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = UserRepresentation),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    ctx: RequestContext,
    current_user: CurrentUser,
) -> AppResult<Json<UserRepresentation>> {
    let profile = user::retrieve(&ctx, state.uow.as_ref(), current_user.id).await?;
    Ok(Json(profile))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserRepresentation),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<i64>,
) -> AppResult<Json<UserRepresentation>> {
    let profile = user::retrieve(&ctx, state.uow.as_ref(), id).await?;
    Ok(Json(profile))
}

/// Update a user's own profile
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    request_body = UserUpdateInput,
    responses(
        (status = 200, description = "User updated", body = UserRepresentation),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not your profile"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<UserUpdateInput>,
) -> AppResult<Json<UserRepresentation>> {
    let profile = user::update(&ctx, state.uow.as_ref(), id, payload).await?;
    Ok(Json(profile))
}
