//! Health check route.

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// `GET /health` -- liveness and database connectivity check.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
