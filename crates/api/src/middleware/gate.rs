//! Editor gate extractor.
//!
//! Wraps [`AuthUser`] and rejects identities that are not on the
//! `EDITOR_EMAILS` allow-list. Every mutating handler takes one.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires a signed-in editor. 401 without a valid session, 403 when the
/// session's email is not allow-listed.
///
/// ```ignore
/// async fn edit(RequireEditor(user): RequireEditor) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireEditor(pub AuthUser);

impl FromRequestParts<AppState> for RequireEditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if let Err(err) = state.config.editors.check(&user.email) {
            tracing::warn!(email = %user.email, "Rejected edit from non-editor");
            return Err(err.into());
        }
        Ok(RequireEditor(user))
    }
}
