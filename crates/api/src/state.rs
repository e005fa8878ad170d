use std::sync::Arc;

use inventory_db::EntryStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Entry storage (PostgreSQL or in-process).
    pub store: Arc<dyn EntryStore>,
    pub config: Arc<ServerConfig>,
}
