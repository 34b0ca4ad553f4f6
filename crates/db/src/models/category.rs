//! Category model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use soomemo_core::types::{DbId, Timestamp};

/// A row from the `categories` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub color: String,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a category. `color` falls back to the neutral default.
#[derive(Debug)]
pub struct CreateCategory {
    pub name: String,
    pub color: Option<String>,
}

/// DTO for updating a category. `color` keeps the existing value when `None`.
#[derive(Debug)]
pub struct UpdateCategory {
    pub name: String,
    pub color: Option<String>,
}
