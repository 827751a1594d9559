//! Route definitions.
//!
//! Each resource gets its own small router; [`api_routes`] merges them under
//! the `/api/v1` prefix applied in `router.rs`.

use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod health;
pub mod items;
pub mod outfits;
pub mod profile;

/// All `/api/v1` routes merged into one router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(items::router())
        .merge(outfits::router())
        .merge(profile::router())
}
