//! Memo model and DTOs.
//!
//! Memos are always read joined with their category so responses can embed
//! the `{id, name, color}` summary.

use serde::Serialize;
use sqlx::FromRow;
use soomemo_core::types::{DbId, Timestamp};

/// A memo row joined with its category's name and color.
#[derive(Debug, Clone, FromRow)]
pub struct MemoRow {
    pub id: DbId,
    pub user_id: DbId,
    pub category_id: DbId,
    pub title: String,
    pub content: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub category_name: String,
    pub category_color: String,
}

/// Category attributes embedded in memo responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub id: DbId,
    pub name: String,
    pub color: String,
}

/// A memo with its embedded category summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub category_id: DbId,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub category: CategorySummary,
}

impl From<MemoRow> for Memo {
    fn from(row: MemoRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            category_id: row.category_id,
            sort_order: row.sort_order,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            category: CategorySummary {
                id: row.category_id,
                name: row.category_name,
                color: row.category_color,
            },
        }
    }
}

/// DTO for creating or replacing a memo's editable fields.
#[derive(Debug)]
pub struct MemoInput {
    pub title: String,
    pub content: String,
    pub category_id: DbId,
}
