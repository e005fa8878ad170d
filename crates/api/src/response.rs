//! Shared response envelope types for API handlers.
//!
//! Entry, listing, form and session responses use a `{ "data": ... }`
//! envelope. Errors and `/health` do not.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: entries }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
