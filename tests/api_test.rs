//! Integration tests for API endpoints.
//!
//! The router runs over the in-memory store, so no database is needed.

mod common;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{MemoryStore, TEST_SECRET};
use dream_space::api::create_router;
use dream_space::{AppState, Config};

// =============================================================================
// Helpers
// =============================================================================

const HOST: &str = "shop.example.com";

fn app(store: &MemoryStore) -> Router {
    let mut config = Config::new(TEST_SECRET);
    config.allowed_hosts = vec![HOST.to_string()];
    let state = AppState::with_unit_of_work(Arc::new(store.clone()), config).unwrap();
    create_router(state)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    send_from(app, HOST, method, uri, token, body).await
}

async fn send_from(
    app: &Router,
    host: &str,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::HOST, host);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["access_token"].as_str().unwrap().to_string()
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_register_then_login() {
    let store = MemoryStore::new();
    let app = app(&store);

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({
            "email": "ada@example.com",
            "first_name": "Ada",
            "password": "correct-horse"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["last_name"], "");
    assert!(body.get("password").is_none());

    let token = login(&app, "ada@example.com", "correct-horse").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_register_reports_field_errors() {
    let store = MemoryStore::new();
    store.seed_user("ada@example.com", "correct-horse");
    let app = app(&store);

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "email": "ada@example.com", "password": "short" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["fields"]["password"].is_array());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let store = MemoryStore::new();
    store.seed_user("ada@example.com", "correct-horse");
    let app = app(&store);

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": "ada@example.com", "password": "wrong-horse" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let store = MemoryStore::new();
    let app = app(&store);

    for uri in ["/users/me", "/shops", "/products"] {
        let (status, body) = send(&app, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    let (status, _) = send(&app, Method::GET, "/users/me", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_me_and_foreign_profile_update() {
    let store = MemoryStore::new();
    let ada = store.seed_user("ada@example.com", "correct-horse");
    let grace = store.seed_user("grace@example.com", "correct-horse");
    let app = app(&store);
    let token = login(&app, "ada@example.com", "correct-horse").await;

    let (status, me) = send(&app, Method::GET, "/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], ada.id);
    assert_eq!(me["favorites"], json!([]));

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/users/{}", grace.id),
        Some(&token),
        Some(json!({ "first_name": "Hijack" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/users/{}", ada.id),
        Some(&token),
        Some(json!({ "first_name": "Augusta" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["first_name"], "Augusta");
}

// =============================================================================
// Shops and products
// =============================================================================

#[tokio::test]
async fn test_shop_and_product_lifecycle() {
    let store = MemoryStore::new();
    let ada = store.seed_user("ada@example.com", "correct-horse");
    let app = app(&store);
    let token = login(&app, "ada@example.com", "correct-horse").await;

    let (status, shop) = send(
        &app,
        Method::POST,
        "/shops",
        Some(&token),
        Some(json!({ "name": "Lumen", "logo": "logos/lumen.png", "user_id": ada.id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(shop["logo"], "http://shop.example.com/media/logos/lumen.png");
    let shop_id = shop["id"].as_i64().unwrap();

    let (status, product) = send(
        &app,
        Method::POST,
        "/products",
        Some(&token),
        Some(json!({
            "name": "Desk lamp",
            "price": "49.90",
            "category": "lighting",
            "shop": shop_id,
            "colors": ["red", "blue"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(product["shop_name"], "Lumen");
    assert_eq!(product["price"], "49.90");
    let product_id = product["id"].as_i64().unwrap();
    let product_uri = format!("/products/{}", product_id);

    let (status, with_image) = send(
        &app,
        Method::POST,
        &format!("{}/images", product_uri),
        Some(&token),
        Some(json!({ "image": "products/front.jpg" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        with_image["images"],
        json!(["http://shop.example.com/media/products/front.jpg"])
    );

    let (status, listing) = send(&app, Method::GET, "/products", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing[0]["shop"], shop_id);
    assert!(listing[0].get("images").is_none());

    let (status, updated) = send(
        &app,
        Method::PUT,
        &product_uri,
        Some(&token),
        Some(json!({
            "name": "Floor lamp",
            "price": "120",
            "category": "lighting",
            "shop": shop_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Floor lamp");
    assert_eq!(updated["colors"].as_array().unwrap().len(), 2);

    let (status, _) = send(&app, Method::DELETE, &product_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &product_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(
        body["error"]["message"],
        format!("Product with id '{}' not found.", product_id)
    );
}

#[tokio::test]
async fn test_product_with_unknown_shop_is_rejected() {
    let store = MemoryStore::new();
    store.seed_user("ada@example.com", "correct-horse");
    let app = app(&store);
    let token = login(&app, "ada@example.com", "correct-horse").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/products",
        Some(&token),
        Some(json!({ "name": "Desk lamp", "price": "10.00", "category": "x", "shop": 999 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["fields"]["shop"].is_array());
}

#[tokio::test]
async fn test_foreign_host_gets_public_base_urls() {
    let store = MemoryStore::new();
    let ada = store.seed_user("ada@example.com", "correct-horse");
    let lumen = store.seed_shop("Lumen", Some("logos/lumen.png"));
    let app = app(&store);
    let token = login(&app, &ada.email, "correct-horse").await;

    let (status, shop) = send_from(
        &app,
        "attacker.example.net",
        Method::GET,
        &format!("/shops/{}", lumen.id),
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(shop["logo"], "http://localhost:3000/media/logos/lumen.png");
}

#[tokio::test]
async fn test_mistyped_fields_are_validation_errors() {
    let store = MemoryStore::new();
    let ada = store.seed_user("ada@example.com", "correct-horse");
    let lumen = store.seed_shop("Lumen", None);
    let app = app(&store);
    let token = login(&app, &ada.email, "correct-horse").await;

    let cases = [
        ("/shops", json!({ "name": "Lumen", "user_id": "abc" }), "user_id"),
        (
            "/products",
            json!({ "name": "Lamp", "price": "abc", "category": "x", "shop": lumen.id }),
            "price",
        ),
        (
            "/products",
            json!({ "name": "Lamp", "price": "1.00", "category": "x", "shop": lumen.id, "colors": "red" }),
            "colors",
        ),
    ];

    for (uri, payload, field) in cases {
        let (status, body) = send(&app, Method::POST, uri, Some(&token), Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", field);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR", "{}", field);
        assert!(body["error"]["fields"][field].is_array(), "{}: {}", field, body);
    }

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/users/{}", ada.id),
        Some(&token),
        Some(json!({ "favorites": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["fields"]["favorites"].is_array());
}

#[tokio::test]
async fn test_overlong_logo_is_field_error() {
    let store = MemoryStore::new();
    let ada = store.seed_user("ada@example.com", "correct-horse");
    let app = app(&store);
    let token = login(&app, &ada.email, "correct-horse").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/shops",
        Some(&token),
        Some(json!({ "name": "Lumen", "logo": "x".repeat(300), "user_id": ada.id })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["fields"]["logo"].is_array());
    assert_eq!(store.shop_count(), 0);
}

#[tokio::test]
async fn test_written_price_renders_like_stored_price() {
    let store = MemoryStore::new();
    let ada = store.seed_user("ada@example.com", "correct-horse");
    let lumen = store.seed_shop("Lumen", None);
    let app = app(&store);
    let token = login(&app, &ada.email, "correct-horse").await;

    let (status, product) = send(
        &app,
        Method::POST,
        "/products",
        Some(&token),
        Some(json!({ "name": "Lamp", "price": "1.5", "category": "x", "shop": lumen.id })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(product["price"], "1.50");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let store = MemoryStore::new();
    let app = app(&store);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_and_root() {
    let store = MemoryStore::new();
    let app = app(&store);

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "healthy");

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
