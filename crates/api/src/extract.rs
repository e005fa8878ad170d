//! Request extractors that reject with [`AppError`].
//!
//! axum's stock `Json`, `Form`, `Path` and `Query` answer malformed input
//! with plain-text bodies (and 422 for well-formed JSON of the wrong
//! shape). These wrappers delegate to them and convert the rejection, so
//! every error leaves the API as `{ "error", "code" }`.
//!
//! ```ignore
//! async fn handler(ApiPath(id): ApiPath<DbId>, ApiJson(body): ApiJson<Input>) { ... }
//! ```

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `application/x-www-form-urlencoded` request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Form), rejection(AppError))]
pub struct ApiForm<T>(pub T);

/// Path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// Query string.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
