use std::sync::Arc;

use ducki_media::MediaClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// The media client is injected here rather than reached through a global so
/// tests can point it at a local mock host.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: ducki_db::DbPool,
    /// Server configuration (JWT secrets, timeouts, CORS).
    pub config: Arc<ServerConfig>,
    /// Client for the external media host.
    pub media: MediaClient,
}
