//! Repository for the `items` table.
//!
//! All queries are scoped by the owning `user_id`. A row belonging to a
//! different user is indistinguishable from a missing row: the scoped
//! predicate simply matches nothing.

use ducki_core::types::DbId;
use sqlx::PgPool;

use crate::models::item::{CreateItem, Item, UpdateItem};

/// Column list for `items` queries.
const ITEM_COLUMNS: &str = "id, user_id, name, category, brand, image_url, created_at";

/// Provides CRUD operations for wardrobe items.
pub struct ItemRepo;

impl ItemRepo {
    /// List all items owned by `user_id`, newest-created first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM items \
             WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a single owned item by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new item for `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateItem,
    ) -> Result<Item, sqlx::Error> {
        let query = format!(
            "INSERT INTO items (user_id, name, category, brand, image_url) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(input.brand.as_deref())
            .bind(input.image_url.as_deref())
            .fetch_one(pool)
            .await
    }

    /// Full-field update of an owned item. An `image_url` of `None` keeps the
    /// stored image; name, category, and brand are overwritten as submitted.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateItem,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!(
            "UPDATE items SET \
                name = $3, \
                category = $4, \
                brand = $5, \
                image_url = COALESCE($6, image_url) \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(input.brand.as_deref())
            .bind(input.image_url.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// Patch only `image_url` on an owned item.
    pub async fn update_image(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        image_url: &str,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!(
            "UPDATE items SET image_url = $3 \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(user_id)
            .bind(image_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete an owned item. Membership rows referencing it are removed in
    /// the same transaction. Returns true if the item row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "DELETE FROM outfit_items oi USING items i \
             WHERE oi.item_id = i.id AND i.id = $1 AND i.user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
