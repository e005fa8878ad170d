//! Typed repository over an [`EntryStore`].

use inventory_core::entry::{merge_document, Entry, EntryRecord, EntryUpdate, NewEntry};
use inventory_core::error::CoreError;
use inventory_core::slug::normalize_slug;
use inventory_core::types::DbId;
use serde_json::Value;

use crate::error::DbError;
use crate::models::stored_entry::{StoredEntry, UpsertOutcome};
use crate::slug_allocator::allocate_slug;
use crate::store::EntryStore;

/// Provides CRUD operations for every entry kind. The kind is chosen by the
/// record type parameter.
pub struct EntryRepo;

impl EntryRepo {
    /// All entries of kind `R`, newest first.
    pub async fn list<R: EntryRecord>(store: &dyn EntryStore) -> Result<Vec<Entry<R>>, DbError> {
        store
            .list(R::KIND)
            .await?
            .into_iter()
            .map(decode::<R>)
            .collect()
    }

    pub async fn find_by_id<R: EntryRecord>(
        store: &dyn EntryStore,
        id: DbId,
    ) -> Result<Option<Entry<R>>, DbError> {
        store
            .find_by_id(R::KIND, id)
            .await?
            .map(decode::<R>)
            .transpose()
    }

    pub async fn find_by_slug<R: EntryRecord>(
        store: &dyn EntryStore,
        slug: &str,
    ) -> Result<Option<Entry<R>>, DbError> {
        store
            .find_by_slug(R::KIND, slug)
            .await?
            .map(decode::<R>)
            .transpose()
    }

    /// Insert a new entry.
    ///
    /// The slug comes from the input when given and not blank, otherwise
    /// from the name. Either way it is normalised and made unique across
    /// all collections.
    pub async fn create<R: EntryRecord>(
        store: &dyn EntryStore,
        input: &NewEntry<R>,
    ) -> Result<Entry<R>, DbError> {
        input.record.validate()?;

        let base = normalize_slug(
            requested(input.slug.as_deref()).unwrap_or(&input.record.common().name),
        )?;
        let slug = allocate_slug(store, &base, None).await?;

        let document = serde_json::to_value(&input.record)?;
        let row = store.insert(R::KIND, &slug, &document).await?;
        decode(row)
    }

    /// Apply a partial update by id, inserting the entry under that id when
    /// it does not exist.
    pub async fn update<R: EntryRecord>(
        store: &dyn EntryStore,
        id: DbId,
        input: &EntryUpdate<R::Patch>,
    ) -> Result<(Entry<R>, UpsertOutcome), DbError> {
        let patch = serde_json::to_value(&input.patch)?;
        Self::upsert_document::<R>(store, id, input.slug.as_deref(), patch).await
    }

    /// Overwrite every record field by id (form edits), inserting when
    /// absent. Keeps the current slug unless `input.slug` is set.
    pub async fn replace<R: EntryRecord>(
        store: &dyn EntryStore,
        id: DbId,
        input: &NewEntry<R>,
    ) -> Result<(Entry<R>, UpsertOutcome), DbError> {
        let patch = serde_json::to_value(&input.record)?;
        Self::upsert_document::<R>(store, id, input.slug.as_deref(), patch).await
    }

    /// Remove an entry. Returns `true` if a row was removed.
    pub async fn delete<R: EntryRecord>(store: &dyn EntryStore, id: DbId) -> Result<bool, DbError> {
        store.delete(R::KIND, id).await
    }

    async fn upsert_document<R: EntryRecord>(
        store: &dyn EntryStore,
        id: DbId,
        requested_slug: Option<&str>,
        patch: Value,
    ) -> Result<(Entry<R>, UpsertOutcome), DbError> {
        if id <= 0 {
            return Err(CoreError::Validation(format!("id must be positive, got {id}")).into());
        }
        let kind = R::KIND;

        match store.find_by_id(kind, id).await? {
            Some(current) => {
                let mut merged = current.document.clone();
                merge_document(&mut merged, &patch);
                let record: R = serde_json::from_value(merged)?;
                record.validate()?;

                let slug = match requested(requested_slug) {
                    Some(requested) => {
                        let base = normalize_slug(requested)?;
                        if base == current.slug {
                            None
                        } else {
                            Some(allocate_slug(store, &base, Some((kind, id))).await?)
                        }
                    }
                    None => None,
                };

                let row = store
                    .update(kind, id, slug.as_deref(), &patch)
                    .await?
                    .ok_or(CoreError::NotFound {
                        entity: kind.entity_name(),
                        id,
                    })?;
                Ok((decode(row)?, UpsertOutcome::Updated))
            }
            None => {
                let mut document = serde_json::to_value(R::default())?;
                merge_document(&mut document, &patch);
                let record: R = serde_json::from_value(document)?;
                record.validate()?;

                let base =
                    normalize_slug(requested(requested_slug).unwrap_or(&record.common().name))?;
                let slug = allocate_slug(store, &base, None).await?;

                let document = serde_json::to_value(&record)?;
                let row = store.insert_with_id(kind, id, &slug, &document).await?;
                Ok((decode(row)?, UpsertOutcome::Created))
            }
        }
    }
}

/// A blank requested slug counts as no slug at all.
fn requested(slug: Option<&str>) -> Option<&str> {
    slug.filter(|s| !s.trim().is_empty())
}

fn decode<R: EntryRecord>(row: StoredEntry) -> Result<Entry<R>, DbError> {
    Ok(row.into_entry()?)
}
