//! Shop handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::JsonBody;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::serializers::{shop, RequestContext, ShopCreateInput, ShopRepresentation};

/// Create shop routes (require authentication)
pub fn shop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_shops).post(create_shop))
        .route("/:id", get(get_shop))
}

/// List all shops
#[utoipa::path(
    get,
    path = "/shops",
    tag = "Shops",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of shops", body = Vec<ShopRepresentation>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_shops(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> AppResult<Json<Vec<ShopRepresentation>>> {
    let shops = shop::list(&ctx, state.uow.as_ref()).await?;
    Ok(Json(shops))
}

/// Get a shop by id
#[utoipa::path(
    get,
    path = "/shops/{id}",
    tag = "Shops",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Shop ID")),
    responses(
        (status = 200, description = "Shop found", body = ShopRepresentation),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Shop not found")
    )
)]
pub async fn get_shop(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<i64>,
) -> AppResult<Json<ShopRepresentation>> {
    let rendered = shop::retrieve(&ctx, state.uow.as_ref(), id).await?;
    Ok(Json(rendered))
}

/// Create a shop owned by the given user
#[utoipa::path(
    post,
    path = "/shops",
    tag = "Shops",
    security(("bearer_auth" = [])),
    request_body = ShopCreateInput,
    responses(
        (status = 201, description = "Shop created", body = ShopRepresentation),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn create_shop(
    State(state): State<AppState>,
    ctx: RequestContext,
    JsonBody(payload): JsonBody<ShopCreateInput>,
) -> AppResult<(StatusCode, Json<ShopRepresentation>)> {
    let rendered = shop::create(&ctx, state.uow.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(rendered)))
}
