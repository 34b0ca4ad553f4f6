//! HTTP-level integration tests for register, login, and `/auth/me`.

mod common;

use axum::http::StatusCode;
use common::{body_json, expect_json, get, get_auth, post_json, register};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use soomemo_api::auth::jwt::Claims;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Register
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_returns_token_and_user(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let body = json!({ "username": "alice", "email": "a@x.com", "password": "pw123456" });

    let json = expect_json(post_json(app, "/api/auth/register", body).await, StatusCode::CREATED).await;

    assert!(json["token"].is_string());
    assert!(json["message"].is_string());
    assert_eq!(json["user"]["username"], "alice");
    assert_eq!(json["user"]["email"], "a@x.com");
    assert!(json["user"].get("password").is_none());
    assert!(json["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_creates_default_category(pool: PgPool) {
    let (token, _) = register(&pool, "alice").await;

    let json = expect_json(
        get_auth(common::build_test_app(pool), "/api/categories", &token).await,
        StatusCode::OK,
    )
    .await;
    let categories = json.as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["name"], "기본");
    assert_eq!(categories[0]["color"], "#6c757d");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_missing_fields_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "username": "alice", "email": "  " });

    let json = expect_json(post_json(app, "/api/auth/register", body).await, StatusCode::BAD_REQUEST).await;
    let message = json["message"].as_str().unwrap();
    assert!(message.contains("email"));
    assert!(message.contains("password"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_duplicate_email_is_400(pool: PgPool) {
    register(&pool, "alice").await;

    let body = json!({ "username": "alice2", "email": "alice@x.com", "password": "pw123456" });
    let json = expect_json(
        post_json(common::build_test_app(pool), "/api/auth/register", body).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_malformed_json_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::send(
        app,
        axum::http::Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "username": 42, "email": "a@x.com", "password": "pw" })),
    )
    .await;

    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let (_, user_id) = register(&pool, "alice").await;

    let body = json!({ "email": "alice@x.com", "password": "pw123456" });
    let json = expect_json(
        post_json(common::build_test_app(pool), "/api/auth/login", body).await,
        StatusCode::OK,
    )
    .await;
    assert!(json["token"].is_string());
    assert_eq!(json["user"]["id"], user_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_failures_are_indistinguishable(pool: PgPool) {
    register(&pool, "alice").await;

    let wrong_password = post_json(
        common::build_test_app(pool.clone()),
        "/api/auth/login",
        json!({ "email": "alice@x.com", "password": "nope" }),
    )
    .await;
    let unknown_email = post_json(
        common::build_test_app(pool),
        "/api/auth/login",
        json!({ "email": "ghost@x.com", "password": "pw123456" }),
    )
    .await;

    let a = expect_json(wrong_password, StatusCode::UNAUTHORIZED).await;
    let b = expect_json(unknown_email, StatusCode::UNAUTHORIZED).await;
    assert_eq!(a["message"], b["message"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_missing_fields_is_400(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/auth/login",
        json!({ "email": "alice@x.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Me / token verification
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_returns_profile(pool: PgPool) {
    let (token, user_id) = register(&pool, "alice").await;

    let json = expect_json(
        get_auth(common::build_test_app(pool), "/api/auth/me", &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["user"]["id"], user_id);
    assert_eq!(json["user"]["username"], "alice");
    assert_eq!(json["user"]["email"], "alice@x.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_without_token_is_401(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_with_garbage_token_is_401(pool: PgPool) {
    let response = get_auth(common::build_test_app(pool), "/api/auth/me", "garbage").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_token_is_401(pool: PgPool) {
    let (_, user_id) = register(&pool, "alice").await;
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        username: "alice".to_string(),
        iat: now - 600,
        exp: now - 300,
        jti: "expired".to_string(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(common::TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap();

    let response = get_auth(common::build_test_app(pool), "/api/memos", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_token_of_deleted_user_is_401(pool: PgPool) {
    let (token, user_id) = register(&pool, "alice").await;
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();

    let response = get_auth(common::build_test_app(pool), "/api/auth/me", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}
