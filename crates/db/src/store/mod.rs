//! The entry store seam.
//!
//! An [`EntryStore`] holds four document collections, one per
//! [`EntryKind`]. It speaks untyped JSON documents; typing and slug policy
//! live in [`crate::repositories::EntryRepo`] and
//! [`crate::slug_allocator`].

mod memory;
mod postgres;

use async_trait::async_trait;
use inventory_core::entry::EntryKind;
use inventory_core::types::DbId;
use serde_json::Value;

use crate::error::DbError;
use crate::models::stored_entry::StoredEntry;

pub use memory::MemoryEntryStore;
pub use postgres::PgEntryStore;

#[async_trait]
pub trait EntryStore: Send + Sync {
    /// All entries of a kind, newest first.
    async fn list(&self, kind: EntryKind) -> Result<Vec<StoredEntry>, DbError>;

    async fn find_by_id(&self, kind: EntryKind, id: DbId) -> Result<Option<StoredEntry>, DbError>;

    async fn find_by_slug(&self, kind: EntryKind, slug: &str)
        -> Result<Option<StoredEntry>, DbError>;

    /// Insert with a store-generated id.
    async fn insert(
        &self,
        kind: EntryKind,
        slug: &str,
        document: &Value,
    ) -> Result<StoredEntry, DbError>;

    /// Insert under a caller-chosen id (upsert of an absent entry).
    async fn insert_with_id(
        &self,
        kind: EntryKind,
        id: DbId,
        slug: &str,
        document: &Value,
    ) -> Result<StoredEntry, DbError>;

    /// Merge `patch` into the stored document (top-level keys replace) and
    /// optionally change the slug. `None` when no such entry exists.
    async fn update(
        &self,
        kind: EntryKind,
        id: DbId,
        slug: Option<&str>,
        patch: &Value,
    ) -> Result<Option<StoredEntry>, DbError>;

    /// Returns `true` if an entry was removed.
    async fn delete(&self, kind: EntryKind, id: DbId) -> Result<bool, DbError>;

    async fn health_check(&self) -> Result<(), DbError>;
}
