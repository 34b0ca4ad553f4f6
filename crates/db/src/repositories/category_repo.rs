//! Repository for the `categories` table, scoped to one owner.

use sqlx::{PgConnection, PgPool};
use soomemo_core::category::{is_default_category, DEFAULT_CATEGORY_COLOR, DEFAULT_CATEGORY_NAME};
use soomemo_core::reorder::positions_for;
use soomemo_core::types::DbId;

use crate::models::category::{Category, CreateCategory, UpdateCategory};

/// Column list for categories queries.
const COLUMNS: &str = "id, name, color, sort_order, user_id, created_at, updated_at";

/// Category operations for a single user. Rows of other users are invisible.
pub struct CategoryRepo<'a> {
    pool: &'a PgPool,
    user_id: DbId,
}

impl<'a> CategoryRepo<'a> {
    pub fn for_user(pool: &'a PgPool, user_id: DbId) -> Self {
        Self { pool, user_id }
    }

    /// List the user's categories ordered by `sort_order`, then creation time.
    ///
    /// If the default category is missing it is created and placed first.
    pub async fn list(&self) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories
             WHERE user_id = $1
             ORDER BY sort_order ASC, created_at ASC"
        );
        let mut categories = sqlx::query_as::<_, Category>(&query)
            .bind(self.user_id)
            .fetch_all(self.pool)
            .await?;

        if !categories.iter().any(|c| is_default_category(&c.name)) {
            let mut conn = self.pool.acquire().await?;
            let default = ensure_default(&mut conn, self.user_id).await?;
            tracing::info!(
                user_id = self.user_id,
                category_id = default.id,
                "Backfilled default category"
            );
            categories.insert(0, default);
        }

        Ok(categories)
    }

    /// Find one of the user's categories by id.
    pub async fn find(&self, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(self.user_id)
            .fetch_optional(self.pool)
            .await
    }

    /// Find one of the user's categories by exact name.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE user_id = $1 AND name = $2");
        sqlx::query_as::<_, Category>(&query)
            .bind(self.user_id)
            .bind(name)
            .fetch_optional(self.pool)
            .await
    }

    /// Create a category, returning the created row.
    pub async fn create(&self, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (user_id, name, color)
             VALUES ($1, $2, COALESCE($3, $4))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(self.user_id)
            .bind(&input.name)
            .bind(&input.color)
            .bind(DEFAULT_CATEGORY_COLOR)
            .fetch_one(self.pool)
            .await
    }

    /// Rename and optionally recolor a category.
    ///
    /// Returns `None` if the category does not exist for this user.
    pub async fn update(
        &self,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET
                name = $3,
                color = COALESCE($4, color)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(self.user_id)
            .bind(&input.name)
            .bind(&input.color)
            .fetch_optional(self.pool)
            .await
    }

    /// Assign `sort_order = index` to each id, atomically.
    ///
    /// Returns `false` and writes nothing unless every id names one of the
    /// user's categories.
    pub async fn reorder(&self, ids: &[DbId]) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "UPDATE categories c SET sort_order = v.position
             FROM UNNEST($2::bigint[], $3::int[]) AS v(id, position)
             WHERE c.id = v.id AND c.user_id = $1",
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

    /// Delete a non-default category after moving its memos to the default one.
    ///
    /// Runs in one transaction. Returns the number of memos moved, or `None`
    /// if nothing was deleted (missing, not owned, or the default itself).
    pub async fn delete_reassigning_memos(&self, id: DbId) -> Result<Option<u64>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let default = ensure_default(&mut tx, self.user_id).await?;
        if default.id == id {
            tx.rollback().await?;
            return Ok(None);
        }

        let moved = sqlx::query(
            "UPDATE memos SET category_id = $3
             WHERE category_id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(self.user_id)
        .bind(default.id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let deleted = sqlx::query("DELETE FROM categories WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(self.user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Ok(None);
        }
        tx.commit().await?;
        Ok(Some(moved))
    }
}

/// Fetch the user's default category, creating it if absent.
async fn ensure_default(conn: &mut PgConnection, user_id: DbId) -> Result<Category, sqlx::Error> {
    let insert = format!(
        "INSERT INTO categories (user_id, name, color, sort_order)
         VALUES ($1, $2, $3, 0)
         ON CONFLICT ON CONSTRAINT uq_categories_user_name DO NOTHING
         RETURNING {COLUMNS}"
    );
    let created = sqlx::query_as::<_, Category>(&insert)
        .bind(user_id)
        .bind(DEFAULT_CATEGORY_NAME)
        .bind(DEFAULT_CATEGORY_COLOR)
        .fetch_optional(&mut *conn)
        .await?;
    if let Some(category) = created {
        return Ok(category);
    }

    let select = format!("SELECT {COLUMNS} FROM categories WHERE user_id = $1 AND name = $2");
    sqlx::query_as::<_, Category>(&select)
        .bind(user_id)
        .bind(DEFAULT_CATEGORY_NAME)
        .fetch_one(&mut *conn)
        .await
}
