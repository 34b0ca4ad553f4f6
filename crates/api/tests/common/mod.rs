//! Shared helpers for HTTP-level integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use soomemo_api::auth::jwt::JwtConfig;
use soomemo_api::config::ServerConfig;
use soomemo_api::router::build_app_router;
use soomemo_api::state::AppState;

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Config pointing at nothing real; the pool comes from `sqlx::test`.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            expiry_days: 7,
        },
    }
}

/// Build the full application router, middleware included, over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the status and return the parsed body.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Register `name` through the API and return `(token, user_id)`.
pub async fn register(pool: &PgPool, name: &str) -> (String, i64) {
    let body = serde_json::json!({
        "username": name,
        "email": format!("{name}@x.com"),
        "password": "pw123456",
    });
    let json = expect_json(
        post_json(build_test_app(pool.clone()), "/api/auth/register", body).await,
        StatusCode::CREATED,
    )
    .await;
    (
        json["token"].as_str().unwrap().to_string(),
        json["user"]["id"].as_i64().unwrap(),
    )
}

/// The id of the caller's default category, read through the API.
pub async fn default_category_id(pool: &PgPool, token: &str) -> i64 {
    let json = expect_json(
        get_auth(build_test_app(pool.clone()), "/api/categories", token).await,
        StatusCode::OK,
    )
    .await;
    json.as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == "기본")
        .expect("default category")["id"]
        .as_i64()
        .unwrap()
}

/// Create a category through the API and return its id.
pub async fn create_category(pool: &PgPool, token: &str, name: &str) -> i64 {
    let json = expect_json(
        post_json_auth(
            build_test_app(pool.clone()),
            "/api/categories",
            serde_json::json!({ "name": name }),
            token,
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    json["id"].as_i64().unwrap()
}

/// Create a memo through the API and return its JSON.
pub async fn create_memo(
    pool: &PgPool,
    token: &str,
    title: &str,
    content: &str,
    category_id: i64,
) -> Value {
    expect_json(
        post_json_auth(
            build_test_app(pool.clone()),
            "/api/memos",
            serde_json::json!({ "title": title, "content": content, "categoryId": category_id }),
            token,
        )
        .await,
        StatusCode::CREATED,
    )
    .await
}
