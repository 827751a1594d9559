//! Clothing item handlers.
//!
//! The list endpoint runs the closet filter engine server-side: the full
//! owned list is fetched, filtered, and sorted, and the distinct
//! category/brand option lists are derived from the unfiltered set so the
//! dropdowns never lose entries while a filter is active.
//!
//! Create and update accept `multipart/form-data`. When a file part is
//! present it is uploaded to the media host *before* any database write; a
//! failed upload aborts the request and leaves the item untouched.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use ducki_core::closet::{self, ClosetQuery, SortOrder};
use ducki_core::error::CoreError;
use ducki_core::{category, types::DbId};
use ducki_db::models::item::{CreateItem, Item, UpdateItem};
use ducki_db::repositories::ItemRepo;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::forms::{FormData, UploadedFile};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for the closet list view. Omitted parameters fall back
/// to the unfiltered defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ListItemsParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub sort: Option<SortOrder>,
}

impl ListItemsParams {
    fn into_query(self) -> ClosetQuery {
        let defaults = ClosetQuery::default();
        ClosetQuery {
            search: self.search.unwrap_or(defaults.search),
            category: self.category.unwrap_or(defaults.category),
            brand: self.brand.unwrap_or(defaults.brand),
            sort: self.sort.unwrap_or(defaults.sort),
        }
    }
}

/// `GET /api/v1/items` -- the filtered, sorted closet view.
pub async fn list_items(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ListItemsParams>,
) -> AppResult<Json<Value>> {
    let all = ItemRepo::list_for_user(&state.pool, user.user_id).await?;

    // Option lists come from the full set, not the filtered one.
    let categories = closet::category_options(&all);
    let brands = closet::brand_options(&all);

    let query = params.into_query();
    let items: Vec<&Item> = closet::visible(&all, &query);

    Ok(Json(json!({
        "items": items,
        "categories": categories,
        "brands": brands,
    })))
}

/// `GET /api/v1/items/{id}` -- one owned item, with the dropdown selection
/// to pre-fill on the edit form. A stored custom category maps to no
/// selection.
pub async fn get_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Value>> {
    let item = ItemRepo::find_by_id(&state.pool, id, user.user_id)
        .await?
        .ok_or(CoreError::NotFound { entity: "item", id })?;

    let category_selection = category::edit_selection(&item.category);

    Ok(Json(json!({
        "item": item,
        "category_selection": category_selection,
    })))
}

/// Upload the form's file part, if any, returning the public URL.
async fn upload_image(state: &AppState, file: &UploadedFile) -> AppResult<String> {
    let uploaded = state
        .media
        .upload(
            &file.filename,
            file.content_type.as_deref(),
            file.bytes.to_vec(),
        )
        .await?;
    Ok(uploaded.secure_url)
}

/// Resolve the submitted category fields into the value to persist.
fn resolve_category(form: &FormData) -> AppResult<String> {
    let selection = form.required("category")?;
    let custom = form.field("custom_category");
    Ok(category::resolve(selection, custom)?)
}

/// Normalize a submitted brand: trimmed, empty mapped to none.
fn submitted_brand(form: &FormData) -> Option<String> {
    form.field("brand")
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(str::to_string)
}

/// `POST /api/v1/items` -- add an item to the closet.
///
/// Multipart fields: `name`, `category`, optional `custom_category`,
/// optional `brand`, optional image file part.
pub async fn create_item(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Item>)> {
    let form = FormData::read(multipart).await?;

    let name = form.required("name")?.to_string();
    let category = resolve_category(&form)?;
    let brand = submitted_brand(&form);

    // Upload before insert: a failed upload must leave no item behind.
    let image_url = match &form.file {
        Some(file) => Some(upload_image(&state, file).await?),
        None => None,
    };

    let item = ItemRepo::create(
        &state.pool,
        user.user_id,
        &CreateItem {
            name,
            category,
            brand,
            image_url,
        },
    )
    .await?;

    tracing::info!(user_id = user.user_id, item_id = item.id, "Item created");

    Ok((StatusCode::CREATED, Json(item)))
}

/// `PUT /api/v1/items/{id}` -- full-field edit.
///
/// Same fields as create. Without a file part the stored image is kept;
/// the brand is overwritten as submitted, so a blank brand clears it.
pub async fn update_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<Item>> {
    let form = FormData::read(multipart).await?;

    let name = form.required("name")?.to_string();
    let category = resolve_category(&form)?;
    let brand = submitted_brand(&form);

    let image_url = match &form.file {
        Some(file) => Some(upload_image(&state, file).await?),
        None => None,
    };

    let item = ItemRepo::update(
        &state.pool,
        id,
        user.user_id,
        &UpdateItem {
            name,
            category,
            brand,
            image_url,
        },
    )
    .await?
    .ok_or(CoreError::NotFound { entity: "item", id })?;

    Ok(Json(item))
}

/// `PUT /api/v1/items/{id}/image` -- replace only the photo.
///
/// Requires a file part; every other field of the item is left untouched.
pub async fn replace_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<Item>> {
    let form = FormData::read(multipart).await?;

    let file = form
        .file
        .as_ref()
        .ok_or_else(|| CoreError::Validation("An image file is required".to_string()))?;

    let image_url = upload_image(&state, file).await?;

    let item = ItemRepo::update_image(&state.pool, id, user.user_id, &image_url)
        .await?
        .ok_or(CoreError::NotFound { entity: "item", id })?;

    Ok(Json(item))
}

/// `DELETE /api/v1/items/{id}` -- remove an item and its outfit memberships.
pub async fn delete_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ItemRepo::delete(&state.pool, id, user.user_id).await?;
    if !deleted {
        return Err(CoreError::NotFound { entity: "item", id }.into());
    }

    tracing::info!(user_id = user.user_id, item_id = id, "Item deleted");

    Ok(StatusCode::NO_CONTENT)
}
