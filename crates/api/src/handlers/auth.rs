//! Handlers for the `/auth` resource.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub email: String,
    /// Whether the email is on the editor allow-list.
    pub can_edit: bool,
}

/// GET /api/v1/auth/me
pub async fn me(State(state): State<AppState>, user: AuthUser) -> Json<DataResponse<SessionInfo>> {
    let can_edit = state.config.editors.permits(&user.email);
    Json(DataResponse {
        data: SessionInfo {
            email: user.email,
            can_edit,
        },
    })
}
