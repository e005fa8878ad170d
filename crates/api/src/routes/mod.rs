pub mod auth;
pub mod entry;
pub mod health;

use axum::routing::get;
use axum::Router;
use inventory_core::entry::{Equipment, Hauling, Materials, Property};

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /property/...                 entry routes (see routes::entry)
/// /equipment/...                entry routes
/// /materials/...                entry routes
/// /hauling/...                  entry routes
///
/// /entries/{slug}               resolve a slug across all kinds (GET)
///
/// /auth/me                      current session and edit rights (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/property", entry::router::<Property>())
        .nest("/equipment", entry::router::<Equipment>())
        .nest("/materials", entry::router::<Materials>())
        .nest("/hauling", entry::router::<Hauling>())
        .route("/entries/{slug}", get(handlers::resolve::by_slug))
        .nest("/auth", auth::router())
}
