//! Untyped entry row as held by a store.

use inventory_core::entry::{Entry, EntryRecord};
use inventory_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from one of the entry collections. `document` is the record's
/// serialized fields; id and slug are kept beside it.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct StoredEntry {
    pub id: DbId,
    pub slug: String,
    pub document: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StoredEntry {
    /// Decode the document into its typed record.
    pub fn into_entry<R: EntryRecord>(self) -> Result<Entry<R>, serde_json::Error> {
        Ok(Entry {
            id: self.id,
            slug: self.slug,
            record: serde_json::from_value(self.document)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Whether an upsert touched an existing entry or inserted a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Updated,
    Created,
}
