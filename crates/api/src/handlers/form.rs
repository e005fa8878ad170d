//! Handlers for the `/{kind}/form` resources.
//!
//! Forms are described as JSON field lists and submitted back as
//! `application/x-www-form-urlencoded`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use inventory_core::entry::Entry;
use inventory_core::form::{blank_form, parse_form, render_form, EntryForm, FormValues};
use inventory_core::types::DbId;
use inventory_db::repositories::EntryRepo;

use super::entry::{find, upsert_status};
use super::Listing;
use crate::error::AppResult;
use crate::extract::{ApiForm, ApiPath};
use crate::middleware::gate::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/{kind}/form
pub async fn blank<R: Listing>() -> Json<DataResponse<EntryForm>> {
    Json(DataResponse {
        data: blank_form::<R>(),
    })
}

/// GET /api/v1/{kind}/{id}/form
pub async fn edit<R: Listing>(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<DataResponse<EntryForm>>> {
    let entry = find::<R>(&state, id).await?;
    Ok(Json(DataResponse {
        data: render_form(&entry.record, &entry.slug),
    }))
}

/// POST /api/v1/{kind}/form
pub async fn create<R: Listing>(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    ApiForm(values): ApiForm<FormValues>,
) -> AppResult<(StatusCode, Json<DataResponse<Entry<R>>>)> {
    let input = parse_form::<R>(&values)?;
    let entry = EntryRepo::create(state.store.as_ref(), &input).await?;
    tracing::info!(
        kind = %R::KIND,
        id = entry.id,
        slug = %entry.slug,
        editor = %editor.email,
        "Entry created from form"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// PUT /api/v1/{kind}/{id}/form
///
/// Replaces every field with the submission; unchecked boxes become
/// `false`. Inserts under `id` when absent.
pub async fn replace<R: Listing>(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    ApiPath(id): ApiPath<DbId>,
    ApiForm(values): ApiForm<FormValues>,
) -> AppResult<(StatusCode, Json<DataResponse<Entry<R>>>)> {
    let input = parse_form::<R>(&values)?;
    let (entry, outcome) = EntryRepo::replace(state.store.as_ref(), id, &input).await?;
    tracing::info!(
        kind = %R::KIND,
        id,
        slug = %entry.slug,
        editor = %editor.email,
        ?outcome,
        "Entry saved from form"
    );
    Ok((upsert_status(outcome), Json(DataResponse { data: entry })))
}
