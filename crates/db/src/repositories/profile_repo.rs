//! Repository for the `profiles` table.

use ducki_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{Profile, UpdateProfile};

/// Column list for `profiles` queries.
const PROFILE_COLUMNS: &str = "user_id, full_name, avatar_url, created_at, updated_at";

/// Provides access to the one-per-user profile row.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Fetch the caller's profile.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Save the caller's profile. `avatar_url` of `None` keeps the stored
    /// avatar; the display name is overwritten as submitted.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET \
                full_name = $2, \
                avatar_url = COALESCE($3, avatar_url), \
                updated_at = now() \
             WHERE user_id = $1 \
             RETURNING {PROFILE_COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(input.full_name.as_deref())
            .bind(input.avatar_url.as_deref())
            .fetch_optional(pool)
            .await
    }
}
