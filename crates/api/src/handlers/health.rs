use axum::extract::State;
use axum::Json;
use serde::Serialize;
use soomemo_core::types::Timestamp;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `"OK"` when the database answers, `"DEGRADED"` otherwise.
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: Timestamp,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET /api/health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = soomemo_db::health_check(&state.pool).await.is_ok();

    let (status, message) = if db_healthy {
        ("OK", "SooMemo server is running")
    } else {
        ("DEGRADED", "Database is unreachable")
    };

    Json(HealthResponse {
        status,
        message,
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}
