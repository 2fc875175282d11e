//! Product handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};

use crate::api::extractors::JsonBody;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::serializers::{
    product, ImageInput, ProductInput, ProductListItem, ProductRepresentation, RequestContext,
};

/// Create product routes (require authentication)
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/:id/images", post(add_product_image))
}

/// List all products
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of products", body = Vec<ProductListItem>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<ProductListItem>>> {
    let products = product::list(state.uow.as_ref()).await?;
    Ok(Json(products))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = ProductRepresentation),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product or its shop not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<i64>,
) -> AppResult<Json<ProductRepresentation>> {
    let rendered = product::retrieve(&ctx, state.uow.as_ref(), id).await?;
    Ok(Json(rendered))
}

/// Create a product
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    security(("bearer_auth" = [])),
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = ProductRepresentation),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ctx: RequestContext,
    JsonBody(payload): JsonBody<ProductInput>,
) -> AppResult<(StatusCode, Json<ProductRepresentation>)> {
    let rendered = product::save(&ctx, state.uow.as_ref(), None, payload).await?;
    Ok((StatusCode::CREATED, Json(rendered)))
}

/// Overwrite a product
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Product ID")),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated", body = ProductRepresentation),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<ProductInput>,
) -> AppResult<Json<ProductRepresentation>> {
    let rendered = product::save(&ctx, state.uow.as_ref(), Some(id), payload).await?;
    Ok(Json(rendered))
}

/// Delete a product with its images and colors
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    product::delete(state.uow.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Attach an image to a product
#[utoipa::path(
    post,
    path = "/products/{id}/images",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Product ID")),
    request_body = ImageInput,
    responses(
        (status = 201, description = "Image attached", body = ProductRepresentation),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn add_product_image(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<ImageInput>,
) -> AppResult<(StatusCode, Json<ProductRepresentation>)> {
    let rendered = product::add_image(&ctx, state.uow.as_ref(), id, payload).await?;
    Ok((StatusCode::CREATED, Json(rendered)))
}
