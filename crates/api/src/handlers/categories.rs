//! Handlers for the `/categories` resource.
//!
//! Every handler works through [`CategoryRepo::for_user`], so a category of
//! another user is indistinguishable from a missing one.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use soomemo_core::category::{
    validate_category_color, validate_category_name, validate_deletable, validate_rename,
};
use soomemo_core::error::CoreError;
use soomemo_core::reorder::validate_reorder_ids;
use soomemo_core::types::DbId;
use soomemo_db::models::category::{Category, CreateCategory, UpdateCategory};
use soomemo_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for creating or updating a category.
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: Option<String>,
    pub color: Option<String>,
}

/// Request body for `PUT /categories/reorder`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderCategoriesRequest {
    pub category_ids: Option<Vec<DbId>>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Category",
        id,
    })
}

fn duplicate_name() -> AppError {
    AppError::Core(CoreError::Conflict("Category name already exists".into()))
}

/// Trim and validate the `name`/`color` pair of a request body.
fn parse_request(input: CategoryRequest) -> AppResult<(String, Option<String>)> {
    let name = input.name.unwrap_or_default().trim().to_string();
    validate_category_name(&name).map_err(AppError::validation)?;
    let color = input.color.map(|c| c.trim().to_string());
    validate_category_color(color.as_deref()).map_err(AppError::validation)?;
    Ok((name, color))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/categories
///
/// Ordered by `order`, then creation time. Recreates the default category
/// first if it has gone missing.
pub async fn list_categories(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Category>>> {
    let categories = CategoryRepo::for_user(&state.pool, auth.id).list().await?;
    Ok(Json(categories))
}

/// POST /api/categories
pub async fn create_category(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CategoryRequest>,
) -> AppResult<impl IntoResponse> {
    let (name, color) = parse_request(input)?;
    let repo = CategoryRepo::for_user(&state.pool, auth.id);

    if repo.find_by_name(&name).await?.is_some() {
        return Err(duplicate_name());
    }

    let category = repo.create(&CreateCategory { name, color }).await?;

    tracing::info!(user_id = auth.id, category_id = category.id, "Category created");

    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/categories/{id}
///
/// Omitting `color` keeps the current one. The default category may be
/// recolored but not renamed.
pub async fn update_category(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<CategoryRequest>,
) -> AppResult<Json<Category>> {
    let repo = CategoryRepo::for_user(&state.pool, auth.id);
    let existing = repo.find(id).await?.ok_or_else(|| not_found(id))?;

    let (name, color) = parse_request(input)?;
    validate_rename(&existing.name, &name).map_err(AppError::validation)?;

    if name != existing.name {
        if let Some(other) = repo.find_by_name(&name).await? {
            if other.id != id {
                return Err(duplicate_name());
            }
        }
    }

    let category = repo
        .update(id, &UpdateCategory { name, color })
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(user_id = auth.id, category_id = id, "Category updated");

    Ok(Json(category))
}

/// PUT /api/categories/reorder
///
/// Assigns `order = index` for each id. All ids must be distinct and owned
/// by the caller; otherwise nothing is written.
pub async fn reorder_categories(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<ReorderCategoriesRequest>,
) -> AppResult<Json<MessageResponse>> {
    let ids = input
        .category_ids
        .ok_or_else(|| AppError::validation("categoryIds must be an array of ids"))?;
    validate_reorder_ids(&ids).map_err(AppError::validation)?;

    let applied = CategoryRepo::for_user(&state.pool, auth.id)
        .reorder(&ids)
        .await?;
    if !applied {
        return Err(AppError::validation("Reorder list contains unknown categories"));
    }

    tracing::info!(user_id = auth.id, count = ids.len(), "Categories reordered");

    Ok(Json(MessageResponse::new("Categories reordered")))
}

/// DELETE /api/categories/{id}
///
/// Moves the category's memos to the default category, then deletes it.
pub async fn delete_category(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let repo = CategoryRepo::for_user(&state.pool, auth.id);
    let existing = repo.find(id).await?.ok_or_else(|| not_found(id))?;
    validate_deletable(&existing.name).map_err(AppError::validation)?;

    let moved = repo
        .delete_reassigning_memos(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        user_id = auth.id,
        category_id = id,
        moved_memos = moved,
        "Category deleted"
    );

    Ok(Json(MessageResponse::new("Category deleted")))
}
