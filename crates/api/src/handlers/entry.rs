//! Handlers for the `/{kind}` entry resources.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use inventory_core::entry::{Entry, EntryUpdate, NewEntry};
use inventory_core::error::CoreError;
use inventory_core::presenter::{detail_view, present, DetailView};
use inventory_core::types::DbId;
use inventory_db::models::stored_entry::UpsertOutcome;
use inventory_db::repositories::EntryRepo;

use super::Listing;
use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::gate::RequireEditor;
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/{kind}
pub async fn list<R: Listing>(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> AppResult<Json<DataResponse<Vec<Entry<R>>>>> {
    let query = params.into_query()?;
    let entries = EntryRepo::list::<R>(state.store.as_ref()).await?;
    Ok(Json(DataResponse {
        data: present(entries, &query),
    }))
}

/// GET /api/v1/{kind}/{id}
pub async fn get_by_id<R: Listing>(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<DataResponse<Entry<R>>>> {
    let entry = find::<R>(&state, id).await?;
    Ok(Json(DataResponse { data: entry }))
}

/// GET /api/v1/{kind}/slug/{slug}
pub async fn get_by_slug<R: Listing>(
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
) -> AppResult<Json<DataResponse<Entry<R>>>> {
    let found = EntryRepo::find_by_slug::<R>(state.store.as_ref(), &slug).await?;
    let entry = found.ok_or(AppError::Core(CoreError::SlugNotFound {
        entity: R::KIND.entity_name(),
        slug,
    }))?;
    Ok(Json(DataResponse { data: entry }))
}

/// GET /api/v1/{kind}/{id}/detail
pub async fn detail<R: Listing>(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<DataResponse<DetailView>>> {
    let entry = find::<R>(&state, id).await?;
    Ok(Json(DataResponse {
        data: detail_view(&entry),
    }))
}

/// POST /api/v1/{kind}
pub async fn create<R: Listing>(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    ApiJson(input): ApiJson<NewEntry<R>>,
) -> AppResult<(StatusCode, Json<DataResponse<Entry<R>>>)> {
    let entry = EntryRepo::create(state.store.as_ref(), &input).await?;
    tracing::info!(
        kind = %R::KIND,
        id = entry.id,
        slug = %entry.slug,
        editor = %editor.email,
        "Entry created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// PUT /api/v1/{kind}/{id}
///
/// Partial update. An absent id is inserted under that id and answered
/// with 201.
pub async fn update<R: Listing>(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<EntryUpdate<R::Patch>>,
) -> AppResult<(StatusCode, Json<DataResponse<Entry<R>>>)> {
    let (entry, outcome) = EntryRepo::update::<R>(state.store.as_ref(), id, &input).await?;
    tracing::info!(
        kind = %R::KIND,
        id,
        slug = %entry.slug,
        editor = %editor.email,
        ?outcome,
        "Entry saved"
    );
    Ok((upsert_status(outcome), Json(DataResponse { data: entry })))
}

/// DELETE /api/v1/{kind}/{id}
pub async fn delete<R: Listing>(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    let deleted = EntryRepo::delete::<R>(state.store.as_ref(), id).await?;
    if deleted {
        tracing::info!(kind = %R::KIND, id, editor = %editor.email, "Entry deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: R::KIND.entity_name(),
            id,
        }))
    }
}

pub(crate) async fn find<R: Listing>(state: &AppState, id: DbId) -> AppResult<Entry<R>> {
    EntryRepo::find_by_id::<R>(state.store.as_ref(), id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: R::KIND.entity_name(),
            id,
        }))
}

pub(crate) fn upsert_status(outcome: UpsertOutcome) -> StatusCode {
    match outcome {
        UpsertOutcome::Updated => StatusCode::OK,
        UpsertOutcome::Created => StatusCode::CREATED,
    }
}
