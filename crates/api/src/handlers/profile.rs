//! User profile handlers.
//!
//! The profile row is created by signup, so a missing row for an
//! authenticated caller is a genuine 404, not an implicit-create case.

use axum::extract::{Multipart, State};
use axum::Json;
use ducki_core::error::CoreError;
use ducki_db::models::profile::{Profile, UpdateProfile};
use ducki_db::repositories::ProfileRepo;

use crate::error::AppResult;
use crate::forms::FormData;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// `GET /api/v1/profile` -- the caller's profile.
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Profile>> {
    let profile = ProfileRepo::find_by_user(&state.pool, user.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "profile",
            id: user.user_id,
        })?;

    Ok(Json(profile))
}

/// `PUT /api/v1/profile` -- save display name and optionally a new avatar.
///
/// Multipart fields: optional `full_name` text, optional avatar file part.
/// The display name is overwritten as submitted (a blank clears it); without
/// a file part the stored avatar is kept. The avatar upload happens before
/// the database write, so a failed upload leaves the profile untouched.
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<Json<Profile>> {
    let form = FormData::read(multipart).await?;

    let full_name = form
        .field("full_name")
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    let avatar_url = match &form.file {
        Some(file) => {
            let uploaded = state
                .media
                .upload(
                    &file.filename,
                    file.content_type.as_deref(),
                    file.bytes.to_vec(),
                )
                .await?;
            Some(uploaded.secure_url)
        }
        None => None,
    };

    let profile = ProfileRepo::update(
        &state.pool,
        user.user_id,
        &UpdateProfile {
            full_name,
            avatar_url,
        },
    )
    .await?
    .ok_or(CoreError::NotFound {
        entity: "profile",
        id: user.user_id,
    })?;

    Ok(Json(profile))
}
