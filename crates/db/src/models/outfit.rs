//! Outfit, membership, and media models.

use ducki_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `outfits` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Outfit {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    /// Legacy cover image. Newer outfits derive their thumbnail from the
    /// first media item instead.
    pub cover_image_url: Option<String>,
    pub created_at: Timestamp,
}

/// A row from the `outfit_media` table. Ordered by `position`, then
/// `created_at`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OutfitMedia {
    pub id: DbId,
    pub outfit_id: DbId,
    pub user_id: DbId,
    pub media_url: String,
    /// `image` or `video`, as classified at upload time.
    pub media_type: String,
    pub position: i32,
    pub created_at: Timestamp,
}

/// DTO for appending a media item to an outfit's gallery.
#[derive(Debug, Clone)]
pub struct CreateOutfitMedia {
    pub media_url: String,
    pub media_type: String,
    /// Append-only: the current media count of the outfit.
    pub position: i32,
}
