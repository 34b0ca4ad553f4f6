//! Repository for the `memos` table, scoped to one owner.

use sqlx::PgPool;
use soomemo_core::reorder::positions_for;
use soomemo_core::types::DbId;

use crate::models::memo::{Memo, MemoInput, MemoRow};

/// Select list for a memo joined (as `m`) with its category (as `c`).
const SELECT: &str = "m.id, m.user_id, m.category_id, m.title, m.content, m.sort_order, \
                      m.created_at, m.updated_at, c.name AS category_name, c.color AS category_color";

/// Memo operations for a single user. Rows of other users are invisible.
pub struct MemoRepo<'a> {
    pool: &'a PgPool,
    user_id: DbId,
}

impl<'a> MemoRepo<'a> {
    pub fn for_user(pool: &'a PgPool, user_id: DbId) -> Self {
        Self { pool, user_id }
    }

    /// List the user's memos, optionally restricted to one category.
    ///
    /// Ordered by `sort_order` ascending, then most recently updated first.
    pub async fn list(&self, category_id: Option<DbId>) -> Result<Vec<Memo>, sqlx::Error> {
        let query = format!(
            "SELECT {SELECT} FROM memos m
             JOIN categories c ON c.id = m.category_id
             WHERE m.user_id = $1 AND ($2::bigint IS NULL OR m.category_id = $2)
             ORDER BY m.sort_order ASC, m.updated_at DESC"
        );
        let rows = sqlx::query_as::<_, MemoRow>(&query)
            .bind(self.user_id)
            .bind(category_id)
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().map(Memo::from).collect())
    }

    /// Find one of the user's memos by id.
    pub async fn find(&self, id: DbId) -> Result<Option<Memo>, sqlx::Error> {
        let query = format!(
            "SELECT {SELECT} FROM memos m
             JOIN categories c ON c.id = m.category_id
             WHERE m.id = $1 AND m.user_id = $2"
        );
        let row = sqlx::query_as::<_, MemoRow>(&query)
            .bind(id)
            .bind(self.user_id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row.map(Memo::from))
    }

    /// Create a memo in one of the user's categories.
    ///
    /// Returns `None` if `input.category_id` is not a category of this user.
    pub async fn create(&self, input: &MemoInput) -> Result<Option<Memo>, sqlx::Error> {
        let query = format!(
            "WITH m AS (
                INSERT INTO memos (user_id, category_id, title, content)
                SELECT $1, id, $3, $4 FROM categories WHERE id = $2 AND user_id = $1
                RETURNING *
             )
             SELECT {SELECT} FROM m JOIN categories c ON c.id = m.category_id"
        );
        let row = sqlx::query_as::<_, MemoRow>(&query)
            .bind(self.user_id)
            .bind(input.category_id)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_optional(self.pool)
            .await?;
        Ok(row.map(Memo::from))
    }

    /// Replace a memo's title, content, and category.
    ///
    /// Returns `None` if the memo or the target category is not this user's.
    pub async fn update(&self, id: DbId, input: &MemoInput) -> Result<Option<Memo>, sqlx::Error> {
        let query = format!(
            "WITH m AS (
                UPDATE memos SET title = $3, content = $4, category_id = cat.id
                FROM categories cat
                WHERE memos.id = $1 AND memos.user_id = $2
                  AND cat.id = $5 AND cat.user_id = $2
                RETURNING memos.*
             )
             SELECT {SELECT} FROM m JOIN categories c ON c.id = m.category_id"
        );
        let row = sqlx::query_as::<_, MemoRow>(&query)
            .bind(id)
            .bind(self.user_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.category_id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row.map(Memo::from))
    }

    /// Delete a memo. Returns `true` if a row was deleted.
    pub async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM memos WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(self.user_id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Assign `sort_order = index` to each id, atomically.
    ///
    /// Returns `false` and writes nothing unless every id names one of the
    /// user's memos.
    pub async fn reorder(&self, ids: &[DbId]) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "UPDATE memos m SET sort_order = v.position
             FROM UNNEST($2::bigint[], $3::int[]) AS v(id, position)
             WHERE m.id = v.id AND m.user_id = $1",
        )
        .bind(self.user_id)
        .bind(ids)
        .bind(positions_for(ids))
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() != ids.len() as u64 {
            tx.rollback().await?;
            return Ok(false);
        }
        tx.commit().await?;
        Ok(true)
    }

    /// Number of the user's memos in a category.
    pub async fn count_in_category(&self, category_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM memos WHERE user_id = $1 AND category_id = $2")
                .bind(self.user_id)
                .bind(category_id)
                .fetch_one(self.pool)
                .await?;
        Ok(count)
    }
}
