use axum::routing::get;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// GET    /me                -> me (requires session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(auth::me))
}
