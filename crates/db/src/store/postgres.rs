//! PostgreSQL document store: one table per collection, JSONB documents.

use async_trait::async_trait;
use inventory_core::entry::EntryKind;
use inventory_core::types::DbId;
use serde_json::Value;

use super::EntryStore;
use crate::error::DbError;
use crate::models::stored_entry::StoredEntry;
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, slug, document, created_at, updated_at";

/// Entry store backed by the `properties`, `equipment`, `materials` and
/// `hauling` tables.
///
/// Table names come from [`EntryKind::collection`], never from input, so
/// they are safe to splice into query text.
#[derive(Debug, Clone)]
pub struct PgEntryStore {
    pool: DbPool,
}

impl PgEntryStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryStore for PgEntryStore {
    async fn list(&self, kind: EntryKind) -> Result<Vec<StoredEntry>, DbError> {
        let query = format!(
            "SELECT {COLUMNS} FROM {} ORDER BY created_at DESC, id DESC",
            kind.collection()
        );
        let rows = sqlx::query_as::<_, StoredEntry>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, kind: EntryKind, id: DbId) -> Result<Option<StoredEntry>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM {} WHERE id = $1", kind.collection());
        let row = sqlx::query_as::<_, StoredEntry>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_slug(
        &self,
        kind: EntryKind,
        slug: &str,
    ) -> Result<Option<StoredEntry>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM {} WHERE slug = $1", kind.collection());
        let row = sqlx::query_as::<_, StoredEntry>(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(
        &self,
        kind: EntryKind,
        slug: &str,
        document: &Value,
    ) -> Result<StoredEntry, DbError> {
        let query = format!(
            "INSERT INTO {} (slug, document) VALUES ($1, $2) RETURNING {COLUMNS}",
            kind.collection()
        );
        let row = sqlx::query_as::<_, StoredEntry>(&query)
            .bind(slug)
            .bind(document)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_with_id(
        &self,
        kind: EntryKind,
        id: DbId,
        slug: &str,
        document: &Value,
    ) -> Result<StoredEntry, DbError> {
        let table = kind.collection();
        let query = format!(
            "INSERT INTO {table} (id, slug, document) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, StoredEntry>(&query)
            .bind(id)
            .bind(slug)
            .bind(document)
            .fetch_one(&self.pool)
            .await?;

        // Explicit ids bypass the sequence; move it past them so later
        // generated ids do not collide.
        let advance = format!(
            "SELECT setval(pg_get_serial_sequence('{table}', 'id'), \
             GREATEST((SELECT MAX(id) FROM {table}), 1))"
        );
        sqlx::query(&advance).execute(&self.pool).await?;

        Ok(row)
    }

    async fn update(
        &self,
        kind: EntryKind,
        id: DbId,
        slug: Option<&str>,
        patch: &Value,
    ) -> Result<Option<StoredEntry>, DbError> {
        let query = format!(
            "UPDATE {} SET
                document = document || $2,
                slug = COALESCE($3, slug),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}",
            kind.collection()
        );
        let row = sqlx::query_as::<_, StoredEntry>(&query)
            .bind(id)
            .bind(patch)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, kind: EntryKind, id: DbId) -> Result<bool, DbError> {
        let query = format!("DELETE FROM {} WHERE id = $1", kind.collection());
        let result = sqlx::query(&query).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), DbError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
