//! Handlers for the `/auth` resource (register, login, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use soomemo_core::error::CoreError;
use soomemo_core::validation::require_all;
use soomemo_db::models::user::{CreateUser, UserSummary};
use soomemo_db::repositories::UserRepo;

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Login failures never reveal whether the email exists.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: &'static str,
    pub token: String,
    pub user: UserSummary,
}

/// Response for `GET /auth/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserSummary,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create an account and its default category, then sign the caller in.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    require_all(&[
        ("username", input.username.as_deref()),
        ("email", input.email.as_deref()),
        ("password", input.password.as_deref()),
    ])
    .map_err(AppError::validation)?;

    // require_all guarantees presence.
    let username = input.username.unwrap_or_default().trim().to_string();
    let email = input.email.unwrap_or_default().trim().to_string();
    let password = input.password.unwrap_or_default();

    if UserRepo::exists_by_username_or_email(&state.pool, &username, &email).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "User with this email or username already exists".into(),
        )));
    }

    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // A concurrent registration that slips past the check above fails on
    // `uq_users_*` and is reported as a conflict by `AppError`.
    let user = UserRepo::create_with_default_category(
        &state.pool,
        &CreateUser {
            username,
            email,
            password_hash,
        },
    )
    .await?;

    let token = generate_token(user.id, &user.username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "Registration successful",
            token,
            user: UserSummary::from(&user),
        }),
    ))
}

/// POST /api/auth/login
///
/// Authenticate with email + password.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    require_all(&[
        ("email", input.email.as_deref()),
        ("password", input.password.as_deref()),
    ])
    .map_err(AppError::validation)?;

    let email = input.email.unwrap_or_default();
    let password = input.password.unwrap_or_default();

    // 1. Find user by email.
    let user = UserRepo::find_by_email(&state.pool, email.trim())
        .await?
        .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

    // 2. Verify password.
    let password_valid = verify_password(&password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    // 3. Issue token.
    let token = generate_token(user.id, &user.username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(AuthResponse {
        message: "Login successful",
        token,
        user: UserSummary::from(&user),
    }))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        user: auth.summary(),
    })
}
