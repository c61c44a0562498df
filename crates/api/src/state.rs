use std::sync::Arc;

use hudur_dispatch::{Dispatcher, SessionHub};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: hudur_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Realtime session hub (WebSocket clients).
    pub hub: Arc<SessionHub>,
    /// The notification dispatch engine.
    pub dispatcher: Arc<Dispatcher>,
}
