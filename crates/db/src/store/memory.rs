//! In-process entry store for development and tests.
//!
//! Mirrors the PostgreSQL store's semantics: per-collection id sequences,
//! per-collection unique slugs, shallow document merge on update, and
//! newest-first listing.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use inventory_core::entry::{merge_document, EntryKind};
use inventory_core::error::CoreError;
use inventory_core::types::DbId;
use serde_json::Value;
use tokio::sync::RwLock;

use super::EntryStore;
use crate::error::DbError;
use crate::models::stored_entry::StoredEntry;

#[derive(Debug, Default)]
struct Collection {
    /// Highest id handed out or inserted so far.
    last_id: DbId,
    rows: BTreeMap<DbId, StoredEntry>,
}

impl Collection {
    fn slug_owner(&self, slug: &str) -> Option<DbId> {
        self.rows
            .values()
            .find(|row| row.slug == slug)
            .map(|row| row.id)
    }
}

#[derive(Debug, Default)]
pub struct MemoryEntryStore {
    collections: RwLock<HashMap<EntryKind, Collection>>,
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate(kind: EntryKind, slug: &str) -> DbError {
    DbError::DuplicateSlug {
        collection: kind.collection(),
        slug: slug.to_string(),
    }
}

#[async_trait]
impl EntryStore for MemoryEntryStore {
    async fn list(&self, kind: EntryKind) -> Result<Vec<StoredEntry>, DbError> {
        let collections = self.collections.read().await;
        let mut rows: Vec<StoredEntry> = collections
            .get(&kind)
            .map(|c| c.rows.values().cloned().collect())
            .unwrap_or_default();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn find_by_id(&self, kind: EntryKind, id: DbId) -> Result<Option<StoredEntry>, DbError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&kind)
            .and_then(|c| c.rows.get(&id))
            .cloned())
    }

    async fn find_by_slug(
        &self,
        kind: EntryKind,
        slug: &str,
    ) -> Result<Option<StoredEntry>, DbError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&kind)
            .and_then(|c| c.rows.values().find(|row| row.slug == slug))
            .cloned())
    }

    async fn insert(
        &self,
        kind: EntryKind,
        slug: &str,
        document: &Value,
    ) -> Result<StoredEntry, DbError> {
        let mut collections = self.collections.write().await;
        let collection = collections.entry(kind).or_default();
        if collection.slug_owner(slug).is_some() {
            return Err(duplicate(kind, slug));
        }

        let id = collection.last_id.checked_add(1).ok_or_else(|| {
            DbError::Core(CoreError::Conflict(format!(
                "No ids left in {}",
                kind.collection()
            )))
        })?;
        collection.last_id = id;
        let now = Utc::now();
        let row = StoredEntry {
            id,
            slug: slug.to_string(),
            document: document.clone(),
            created_at: now,
            updated_at: now,
        };
        collection.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn insert_with_id(
        &self,
        kind: EntryKind,
        id: DbId,
        slug: &str,
        document: &Value,
    ) -> Result<StoredEntry, DbError> {
        let mut collections = self.collections.write().await;
        let collection = collections.entry(kind).or_default();
        if collection.slug_owner(slug).is_some() {
            return Err(duplicate(kind, slug));
        }
        if collection.rows.contains_key(&id) {
            return Err(DbError::Core(CoreError::Conflict(format!(
                "{} with id {id} already exists",
                kind.entity_name()
            ))));
        }

        collection.last_id = collection.last_id.max(id);
        let now = Utc::now();
        let row = StoredEntry {
            id,
            slug: slug.to_string(),
            document: document.clone(),
            created_at: now,
            updated_at: now,
        };
        collection.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        kind: EntryKind,
        id: DbId,
        slug: Option<&str>,
        patch: &Value,
    ) -> Result<Option<StoredEntry>, DbError> {
        let mut collections = self.collections.write().await;
        let Some(collection) = collections.get_mut(&kind) else {
            return Ok(None);
        };
        if let Some(slug) = slug {
            if collection.slug_owner(slug).is_some_and(|owner| owner != id) {
                return Err(duplicate(kind, slug));
            }
        }
        let Some(row) = collection.rows.get_mut(&id) else {
            return Ok(None);
        };

        merge_document(&mut row.document, patch);
        if let Some(slug) = slug {
            row.slug = slug.to_string();
        }
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, kind: EntryKind, id: DbId) -> Result<bool, DbError> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(&kind)
            .is_some_and(|c| c.rows.remove(&id).is_some()))
    }

    async fn health_check(&self) -> Result<(), DbError> {
        Ok(())
    }
}
