//! Outfit routes.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Routes under `/api/v1/outfits`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/outfits",
            get(handlers::outfits::list_outfits).post(handlers::outfits::create_outfit),
        )
        .route(
            "/outfits/{id}",
            get(handlers::outfits::get_outfit).delete(handlers::outfits::delete_outfit),
        )
        .route("/outfits/{id}/media", post(handlers::outfits::attach_media))
        .route("/outfits/{id}/items", post(handlers::outfits::add_item))
        .route(
            "/outfits/{id}/items/{item_id}",
            delete(handlers::outfits::remove_item),
        )
}
