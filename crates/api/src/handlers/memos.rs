//! Handlers for the `/memos` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use soomemo_core::error::CoreError;
use soomemo_core::memo::{matches_search, normalize_search, validate_memo_fields, CategoryFilter};
use soomemo_core::reorder::validate_reorder_ids;
use soomemo_core::types::DbId;
use soomemo_core::validation::require_all;
use soomemo_db::models::memo::{Memo, MemoInput};
use soomemo_db::repositories::MemoRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /memos`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoListParams {
    /// `"all"`, empty, or a category id.
    pub category_id: Option<String>,
    pub search: Option<String>,
}

/// Request body for creating or updating a memo.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<DbId>,
}

/// Request body for `PUT /memos/reorder`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderMemosRequest {
    pub memo_ids: Option<Vec<DbId>>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Memo", id })
}

fn invalid_category() -> AppError {
    AppError::validation("Invalid category")
}

/// Validate a memo body into repository input.
fn parse_request(input: MemoRequest) -> AppResult<MemoInput> {
    require_all(&[
        ("title", input.title.as_deref()),
        ("content", input.content.as_deref()),
    ])
    .map_err(AppError::validation)?;

    let title = input.title.unwrap_or_default().trim().to_string();
    let content = input.content.unwrap_or_default();
    validate_memo_fields(&title, &content).map_err(AppError::validation)?;

    let category_id = input
        .category_id
        .ok_or_else(|| AppError::validation("categoryId is required"))?;

    Ok(MemoInput {
        title,
        content,
        category_id,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/memos?categoryId=&search=
///
/// Ordered by `order` ascending, then most recently updated. The search
/// filter is a case-insensitive substring match over title or content.
pub async fn list_memos(
    auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<MemoListParams>,
) -> AppResult<Json<Vec<Memo>>> {
    let filter =
        CategoryFilter::from_query(params.category_id.as_deref()).map_err(AppError::validation)?;

    let mut memos = MemoRepo::for_user(&state.pool, auth.id)
        .list(filter.category_id())
        .await?;

    if let Some(term) = normalize_search(params.search.as_deref()) {
        memos.retain(|m| matches_search(&m.title, &m.content, &term));
    }

    Ok(Json(memos))
}

/// GET /api/memos/{id}
pub async fn get_memo(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Memo>> {
    let memo = MemoRepo::for_user(&state.pool, auth.id)
        .find(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(memo))
}

/// POST /api/memos
pub async fn create_memo(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<MemoRequest>,
) -> AppResult<impl IntoResponse> {
    let input = parse_request(input)?;

    let memo = MemoRepo::for_user(&state.pool, auth.id)
        .create(&input)
        .await?
        .ok_or_else(invalid_category)?;

    tracing::info!(
        user_id = auth.id,
        memo_id = memo.id,
        category_id = memo.category_id,
        "Memo created"
    );

    Ok((StatusCode::CREATED, Json(memo)))
}

/// PUT /api/memos/{id}
pub async fn update_memo(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<MemoRequest>,
) -> AppResult<Json<Memo>> {
    let repo = MemoRepo::for_user(&state.pool, auth.id);
    repo.find(id).await?.ok_or_else(|| not_found(id))?;

    let input = parse_request(input)?;
    let memo = repo.update(id, &input).await?.ok_or_else(invalid_category)?;

    tracing::info!(user_id = auth.id, memo_id = id, "Memo updated");

    Ok(Json(memo))
}

/// DELETE /api/memos/{id}
pub async fn delete_memo(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = MemoRepo::for_user(&state.pool, auth.id).delete(id).await?;
    if !deleted {
        return Err(not_found(id));
    }

    tracing::info!(user_id = auth.id, memo_id = id, "Memo deleted");

    Ok(Json(MessageResponse::new("Memo deleted")))
}

/// PUT /api/memos/reorder
///
/// Assigns `order = index` for each id. All ids must be distinct and owned
/// by the caller; otherwise nothing is written.
pub async fn reorder_memos(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<ReorderMemosRequest>,
) -> AppResult<Json<MessageResponse>> {
    let ids = input
        .memo_ids
        .ok_or_else(|| AppError::validation("memoIds must be an array of ids"))?;
    validate_reorder_ids(&ids).map_err(AppError::validation)?;

    let applied = MemoRepo::for_user(&state.pool, auth.id).reorder(&ids).await?;
    if !applied {
        return Err(AppError::validation("Reorder list contains unknown memos"));
    }

    tracing::info!(user_id = auth.id, count = ids.len(), "Memos reordered");

    Ok(Json(MessageResponse::new("Memos reordered")))
}
