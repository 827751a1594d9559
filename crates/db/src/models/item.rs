//! Wardrobe item models and DTOs.

use ducki_core::closet::ClosetEntry;
use ducki_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub category: String,
    pub brand: Option<String>,
    /// Set only after a successful upload; NULL for imageless items.
    pub image_url: Option<String>,
    pub created_at: Timestamp,
}

impl ClosetEntry for Item {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    fn created_at(&self) -> Option<Timestamp> {
        Some(self.created_at)
    }
}

/// DTO for inserting a new item. The category is already resolved (a custom
/// `Other` value arrives here as the custom text).
#[derive(Debug, Clone)]
pub struct CreateItem {
    pub name: String,
    pub category: String,
    pub brand: Option<String>,
    pub image_url: Option<String>,
}

/// DTO for the full-field edit path. `image_url` of `None` keeps the stored
/// image; the brand is overwritten as submitted.
#[derive(Debug, Clone)]
pub struct UpdateItem {
    pub name: String,
    pub category: String,
    pub brand: Option<String>,
    pub image_url: Option<String>,
}
