//! Session extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use inventory_core::error::CoreError;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Identity taken from a Bearer session token.
///
/// Extraction fails with 401 when the header is missing or malformed, the
/// token does not verify, or it carries a blank email. Whether that email
/// may edit is a separate question answered by
/// [`RequireEditor`](super::gate::RequireEditor).
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The account email from `claims.email`, trimmed.
    pub email: String,
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}

/// The raw token from `Authorization: Bearer <token>`.
fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?
        .to_str()
        .map_err(|_| unauthorized("Authorization header is not valid text"))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = validate_token(token, &state.config.session).map_err(|err| {
            tracing::debug!(error = %err, "Rejected session token");
            unauthorized("Invalid or expired token")
        })?;

        let email = claims.email.trim();
        if email.is_empty() {
            return Err(unauthorized("Session token has no email"));
        }

        Ok(AuthUser {
            email: email.to_string(),
        })
    }
}
