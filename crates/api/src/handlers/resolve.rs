//! Cross-kind slug lookup for `/entries/{slug}`.

use axum::extract::State;
use axum::Json;
use inventory_core::entry::{Entry, EntryKind, Equipment, Hauling, Materials, Property};
use inventory_core::error::CoreError;
use inventory_db::repositories::EntryRepo;
use inventory_db::EntryStore;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::ApiPath;
use crate::response::DataResponse;
use crate::state::AppState;

/// An entry of any kind, serialized as `{ "kind": ..., "entry": {...} }`.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", content = "entry", rename_all = "lowercase")]
pub enum ResolvedEntry {
    Property(Entry<Property>),
    Equipment(Entry<Equipment>),
    Materials(Entry<Materials>),
    Hauling(Entry<Hauling>),
}

/// GET /api/v1/entries/{slug}
pub async fn by_slug(
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
) -> AppResult<Json<DataResponse<ResolvedEntry>>> {
    let found = resolve(state.store.as_ref(), &slug).await?;
    let resolved = found.ok_or(AppError::Core(CoreError::SlugNotFound {
        entity: "Entry",
        slug,
    }))?;
    Ok(Json(DataResponse { data: resolved }))
}

/// Try each kind in [`EntryKind::RESOLVE_ORDER`] and return the first hit.
pub async fn resolve(store: &dyn EntryStore, slug: &str) -> AppResult<Option<ResolvedEntry>> {
    for kind in EntryKind::RESOLVE_ORDER {
        let found = match kind {
            EntryKind::Materials => EntryRepo::find_by_slug::<Materials>(store, slug)
                .await?
                .map(ResolvedEntry::Materials),
            EntryKind::Equipment => EntryRepo::find_by_slug::<Equipment>(store, slug)
                .await?
                .map(ResolvedEntry::Equipment),
            EntryKind::Property => EntryRepo::find_by_slug::<Property>(store, slug)
                .await?
                .map(ResolvedEntry::Property),
            EntryKind::Hauling => EntryRepo::find_by_slug::<Hauling>(store, slug)
                .await?
                .map(ResolvedEntry::Hauling),
        };
        if found.is_some() {
            return Ok(found);
        }
    }
    Ok(None)
}
