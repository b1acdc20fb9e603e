#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use promon_api::app::build_app_router;
use promon_api::auth::jwt::JwtConfig;
use promon_api::auth::password::hash_password;
use promon_api::config::ServerConfig;
use promon_api::state::AppState;
use promon_core::roles::GlobalRole;
use promon_db::models::user::{CreateUser, User};
use promon_db::{MemoryStore, Store};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        min_password_length: 8,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// A router over a fresh in-memory store, plus a handle on that store for
/// seeding and inspection.
pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub config: ServerConfig,
    router: Router,
}

impl TestApp {
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let config = test_config();
    let state = AppState::new(store.clone(), config.clone());
    TestApp {
        store,
        config,
        router: build_app_router(state),
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Read the full body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the status and return the `data` payload.
pub async fn expect_data(response: Response, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    json["data"].clone()
}

/// Assert the status and the error `code` of an error response.
pub async fn expect_error(response: Response, status: StatusCode, code: &str) -> Value {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code, "unexpected error body: {json}");
    json
}

// ---------------------------------------------------------------------------
// Seeding helpers
// ---------------------------------------------------------------------------

/// Insert a user straight into the store. Needed for admins, who cannot
/// self-register.
pub async fn seed_user(app: &TestApp, username: &str, role: GlobalRole) -> User {
    let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    app.store
        .create_user(&CreateUser {
            role,
            username: username.to_string(),
            email: format!("{username}@test.com"),
            first_name: "Test".to_string(),
            last_name: username.to_string(),
            group_name: None,
            github_username: None,
            color_code: None,
            password_hash,
        })
        .await
        .expect("user creation should succeed")
}

/// Log in through the API and return the access token.
pub async fn login(app: &TestApp, username: &str) -> String {
    let body = json!({ "username": username, "password": TEST_PASSWORD });
    let data = expect_data(
        post_json(app.router(), "/api/v1/auth/login", body).await,
        StatusCode::OK,
    )
    .await;
    data["accessToken"].as_str().unwrap().to_string()
}

/// Seed a user and log them in.
pub async fn user_with_token(app: &TestApp, username: &str, role: GlobalRole) -> (User, String) {
    let user = seed_user(app, username, role).await;
    let token = login(app, username).await;
    (user, token)
}

/// Create a project through the API and return its id.
pub async fn create_project(app: &TestApp, token: &str, name: &str) -> i64 {
    let body = json!({
        "name": name,
        "description": "integration test project",
        "dueDate": "2030-01-01T00:00:00Z",
    });
    let data = expect_data(
        post_json_auth(app.router(), "/api/v1/projects", body, token).await,
        StatusCode::CREATED,
    )
    .await;
    data["id"].as_i64().unwrap()
}

/// Add a participant through the API.
pub async fn add_participant(
    app: &TestApp,
    token: &str,
    project_id: i64,
    user: &User,
    role: &str,
) -> Value {
    let body = json!({ "userId": user.id, "role": role });
    expect_data(
        post_json_auth(
            app.router(),
            &format!("/api/v1/projects/{project_id}/participants"),
            body,
            token,
        )
        .await,
        StatusCode::CREATED,
    )
    .await
}
