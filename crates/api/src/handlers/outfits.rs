//! Outfit handlers: CRUD, the media gallery, and item membership.
//!
//! The list view derives a display thumbnail per outfit: the legacy cover
//! image wins when present, otherwise the outfit's first media item is used,
//! with videos rewritten to a still-image URL.

use std::collections::{HashMap, HashSet};

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use ducki_core::error::CoreError;
use ducki_core::media::{self, MediaKind};
use ducki_core::types::DbId;
use ducki_db::models::outfit::{CreateOutfitMedia, Outfit, OutfitMedia};
use ducki_db::repositories::{ItemRepo, OutfitRepo};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::forms::FormData;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateOutfitRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub item_id: DbId,
}

/// The display thumbnail for one outfit, as a JSON fragment.
fn thumbnail_json(outfit: &Outfit, first_media: Option<&OutfitMedia>) -> Value {
    let first = first_media.map(|m| (m.media_url.as_str(), MediaKind::from_stored(&m.media_type)));
    let (thumb_url, thumb_type) = media::derive_thumbnail(outfit.cover_image_url.as_deref(), first);

    json!({
        "thumb_url": thumb_url,
        "thumb_type": thumb_type,
    })
}

/// `GET /api/v1/outfits` -- all owned outfits, newest first, each with its
/// derived thumbnail.
pub async fn list_outfits(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Value>> {
    let outfits = OutfitRepo::list_for_user(&state.pool, user.user_id).await?;
    let all_media = OutfitRepo::list_media_for_user(&state.pool, user.user_id).await?;

    // One query for all media, folded to the first entry per outfit. The
    // rows arrive ordered by position then creation time, so the first
    // occurrence of each outfit id is its gallery's first item.
    let mut first_media: HashMap<DbId, &OutfitMedia> = HashMap::new();
    for m in &all_media {
        first_media.entry(m.outfit_id).or_insert(m);
    }

    let entries: Vec<Value> = outfits
        .iter()
        .map(|outfit| {
            let mut entry = serde_json::to_value(outfit).unwrap_or_default();
            if let (Value::Object(map), Value::Object(thumb)) = (
                &mut entry,
                thumbnail_json(outfit, first_media.get(&outfit.id).copied()),
            ) {
                map.extend(thumb);
            }
            entry
        })
        .collect();

    Ok(Json(json!({ "outfits": entries })))
}

/// `POST /api/v1/outfits` -- create an empty outfit.
pub async fn create_outfit(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateOutfitRequest>,
) -> AppResult<(StatusCode, Json<Outfit>)> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("Outfit name is required".into()).into());
    }

    let outfit = OutfitRepo::create(&state.pool, user.user_id, name).await?;

    tracing::info!(user_id = user.user_id, outfit_id = outfit.id, "Outfit created");

    Ok((StatusCode::CREATED, Json(outfit)))
}

/// `GET /api/v1/outfits/{id}` -- one outfit with its full gallery and its
/// member items.
pub async fn get_outfit(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Value>> {
    let outfit = OutfitRepo::find_by_id(&state.pool, id, user.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "outfit",
            id,
        })?;

    let gallery = OutfitRepo::list_media(&state.pool, id, user.user_id).await?;
    let item_ids = OutfitRepo::list_item_ids(&state.pool, id, user.user_id).await?;

    let id_set: HashSet<DbId> = item_ids.iter().copied().collect();
    let items: Vec<_> = ItemRepo::list_for_user(&state.pool, user.user_id)
        .await?
        .into_iter()
        .filter(|i| id_set.contains(&i.id))
        .collect();

    let thumbnail = thumbnail_json(&outfit, gallery.first());

    Ok(Json(json!({
        "outfit": outfit,
        "media": gallery,
        "items": items,
        "thumbnail": thumbnail,
    })))
}

/// `DELETE /api/v1/outfits/{id}` -- remove an outfit, its gallery, and its
/// membership rows in one transaction. Member items survive.
pub async fn delete_outfit(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = OutfitRepo::delete(&state.pool, id, user.user_id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "outfit",
            id,
        }
        .into());
    }

    tracing::info!(user_id = user.user_id, outfit_id = id, "Outfit deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/v1/outfits/{id}/media` -- append a photo or video to the
/// gallery.
///
/// The file is uploaded first; a failed upload leaves the gallery untouched.
/// The new entry's position is the current gallery size, so positions stay
/// dense under append-only writes.
pub async fn attach_media(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<OutfitMedia>)> {
    // Verify ownership before paying for an upload.
    OutfitRepo::find_by_id(&state.pool, id, user.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "outfit",
            id,
        })?;

    let form = FormData::read(multipart).await?;
    let file = form
        .file
        .as_ref()
        .ok_or_else(|| CoreError::Validation("A media file is required".to_string()))?;

    let uploaded = state
        .media
        .upload(
            &file.filename,
            file.content_type.as_deref(),
            file.bytes.to_vec(),
        )
        .await?;

    let kind = media::classify(
        file.content_type.as_deref(),
        uploaded.resource_type.as_deref(),
    );

    let position = OutfitRepo::count_media(&state.pool, id, user.user_id).await? as i32;

    let row = OutfitRepo::create_media(
        &state.pool,
        id,
        user.user_id,
        &CreateOutfitMedia {
            media_url: uploaded.secure_url,
            media_type: kind.as_str().to_string(),
            position,
        },
    )
    .await?;

    tracing::info!(
        user_id = user.user_id,
        outfit_id = id,
        media_id = row.id,
        media_type = kind.as_str(),
        "Media attached to outfit"
    );

    Ok((StatusCode::CREATED, Json(row)))
}

/// `POST /api/v1/outfits/{id}/items` -- attach a closet item.
///
/// Both the outfit and the item must belong to the caller; a duplicate pair
/// surfaces as 409 via the membership constraint.
pub async fn add_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(req): Json<AddItemRequest>,
) -> AppResult<StatusCode> {
    OutfitRepo::find_by_id(&state.pool, id, user.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "outfit",
            id,
        })?;

    let added = OutfitRepo::add_item(&state.pool, id, req.item_id, user.user_id).await?;
    if !added {
        return Err(CoreError::NotFound {
            entity: "item",
            id: req.item_id,
        }
        .into());
    }

    Ok(StatusCode::CREATED)
}

/// `DELETE /api/v1/outfits/{id}/items/{item_id}` -- detach a closet item.
pub async fn remove_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, item_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let removed = OutfitRepo::remove_item(&state.pool, id, item_id, user.user_id).await?;
    if !removed {
        return Err(CoreError::NotFound {
            entity: "outfit item",
            id: item_id,
        }
        .into());
    }

    Ok(StatusCode::NO_CONTENT)
}
