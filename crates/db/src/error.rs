use inventory_core::error::CoreError;

/// Errors raised by entry stores and the entry repository.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Domain rule violated while preparing a write (bad slug, blank name).
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A stored document no longer matches its record type, or a record
    /// could not be encoded.
    #[error("Document encoding error: {0}")]
    Document(#[from] serde_json::Error),

    /// Slug already present in the collection (in-process store only; the
    /// PostgreSQL store reports this as a unique-constraint violation).
    #[error("Slug '{slug}' already exists in {collection}")]
    DuplicateSlug {
        collection: &'static str,
        slug: String,
    },
}
