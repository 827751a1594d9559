//! Repository for outfits, outfit membership, and outfit media.
//!
//! Membership and media writes verify outfit ownership inside the query
//! itself, so a caller can never attach rows to another user's outfit.

use ducki_core::types::DbId;
use sqlx::PgPool;

use crate::models::outfit::{CreateOutfitMedia, Outfit, OutfitMedia};

/// Column list for `outfits` queries.
const OUTFIT_COLUMNS: &str = "id, user_id, name, cover_image_url, created_at";

/// Column list for `outfit_media` queries.
const MEDIA_COLUMNS: &str = "id, outfit_id, user_id, media_url, media_type, position, created_at";

/// Provides CRUD operations for outfits and their dependents.
pub struct OutfitRepo;

impl OutfitRepo {
    // -----------------------------------------------------------------------
    // Outfit CRUD
    // -----------------------------------------------------------------------

    /// List all outfits owned by `user_id`, newest-created first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Outfit>, sqlx::Error> {
        let query = format!(
            "SELECT {OUTFIT_COLUMNS} FROM outfits \
             WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Outfit>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a single owned outfit by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Outfit>, sqlx::Error> {
        let query = format!("SELECT {OUTFIT_COLUMNS} FROM outfits WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Outfit>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new outfit for `user_id`.
    pub async fn create(pool: &PgPool, user_id: DbId, name: &str) -> Result<Outfit, sqlx::Error> {
        let query = format!(
            "INSERT INTO outfits (user_id, name) VALUES ($1, $2) \
             RETURNING {OUTFIT_COLUMNS}"
        );
        sqlx::query_as::<_, Outfit>(&query)
            .bind(user_id)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Delete an owned outfit together with its membership and media rows.
    ///
    /// All three deletes run in one transaction, so a failure leaves no
    /// partially-deleted outfit behind. Returns true if the outfit row was
    /// deleted.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "DELETE FROM outfit_items oi USING outfits o \
             WHERE oi.outfit_id = o.id AND o.id = $1 AND o.user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "DELETE FROM outfit_media om USING outfits o \
             WHERE om.outfit_id = o.id AND o.id = $1 AND o.user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM outfits WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Membership
    // -----------------------------------------------------------------------

    /// Item ids attached to an owned outfit.
    pub async fn list_item_ids(
        pool: &PgPool,
        outfit_id: DbId,
        user_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT oi.item_id FROM outfit_items oi \
             JOIN outfits o ON o.id = oi.outfit_id \
             WHERE oi.outfit_id = $1 AND o.user_id = $2",
        )
        .bind(outfit_id)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Attach an item to an outfit. Both rows must be owned by `user_id`;
    /// otherwise no row is inserted and false is returned. A duplicate pair
    /// violates the membership constraint and surfaces as a database error.
    pub async fn add_item(
        pool: &PgPool,
        outfit_id: DbId,
        item_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO outfit_items (outfit_id, item_id) \
             SELECT o.id, i.id FROM outfits o \
             JOIN items i ON i.id = $2 AND i.user_id = $3 \
             WHERE o.id = $1 AND o.user_id = $3",
        )
        .bind(outfit_id)
        .bind(item_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Detach an item from an owned outfit. Returns true if a row was deleted.
    pub async fn remove_item(
        pool: &PgPool,
        outfit_id: DbId,
        item_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM outfit_items oi USING outfits o \
             WHERE oi.outfit_id = o.id \
               AND o.id = $1 AND o.user_id = $3 \
               AND oi.item_id = $2",
        )
        .bind(outfit_id)
        .bind(item_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Media
    // -----------------------------------------------------------------------

    /// Media for one owned outfit, ordered by position then creation time.
    pub async fn list_media(
        pool: &PgPool,
        outfit_id: DbId,
        user_id: DbId,
    ) -> Result<Vec<OutfitMedia>, sqlx::Error> {
        let query = format!(
            "SELECT {MEDIA_COLUMNS} FROM outfit_media \
             WHERE outfit_id = $1 AND user_id = $2 \
             ORDER BY position ASC, created_at ASC"
        );
        sqlx::query_as::<_, OutfitMedia>(&query)
            .bind(outfit_id)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// All media rows across the user's outfits, ordered by position then
    /// creation time. The list view folds this into "first media per outfit".
    pub async fn list_media_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<OutfitMedia>, sqlx::Error> {
        let query = format!(
            "SELECT {MEDIA_COLUMNS} FROM outfit_media \
             WHERE user_id = $1 \
             ORDER BY position ASC, created_at ASC"
        );
        sqlx::query_as::<_, OutfitMedia>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Number of media rows attached to an owned outfit. The next append
    /// position equals this count.
    pub async fn count_media(
        pool: &PgPool,
        outfit_id: DbId,
        user_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM outfit_media WHERE outfit_id = $1 AND user_id = $2",
        )
        .bind(outfit_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(count.0)
    }

    /// Append a media row to an owned outfit. The caller must have verified
    /// ownership of the outfit (the handler fetches it first).
    pub async fn create_media(
        pool: &PgPool,
        outfit_id: DbId,
        user_id: DbId,
        input: &CreateOutfitMedia,
    ) -> Result<OutfitMedia, sqlx::Error> {
        let query = format!(
            "INSERT INTO outfit_media (outfit_id, user_id, media_url, media_type, position) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {MEDIA_COLUMNS}"
        );
        sqlx::query_as::<_, OutfitMedia>(&query)
            .bind(outfit_id)
            .bind(user_id)
            .bind(&input.media_url)
            .bind(&input.media_type)
            .bind(input.position)
            .fetch_one(pool)
            .await
    }
}
