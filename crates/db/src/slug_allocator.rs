//! Cross-collection slug allocation.
//!
//! A slug must be unique across all four collections combined, not just
//! within one. Allocation checks every collection for the candidate and
//! appends `-1`, `-2`, ... until nothing matches.
//!
//! The check and the following insert are separate calls, so two concurrent
//! writers can pick the same slug. The per-table unique constraint turns
//! the loser into a conflict error; nothing retries it.

use inventory_core::entry::EntryKind;
use inventory_core::slug::suffixed;
use inventory_core::types::DbId;

use crate::error::DbError;
use crate::store::EntryStore;

/// Return `base` or the first free `base-N`.
///
/// `exclude` names an entry whose own slug does not count as taken; used
/// when an existing entry is renamed.
pub async fn allocate_slug(
    store: &dyn EntryStore,
    base: &str,
    exclude: Option<(EntryKind, DbId)>,
) -> Result<String, DbError> {
    let mut candidate = base.to_string();
    let mut attempt = 0;

    while is_taken(store, &candidate, exclude).await? {
        attempt += 1;
        candidate = suffixed(base, attempt);
    }

    if attempt > 0 {
        tracing::debug!(base, slug = %candidate, attempt, "Slug taken, allocated suffixed slug");
    }
    Ok(candidate)
}

/// Whether any collection already holds `slug` for an entry other than
/// `exclude`.
pub async fn is_taken(
    store: &dyn EntryStore,
    slug: &str,
    exclude: Option<(EntryKind, DbId)>,
) -> Result<bool, DbError> {
    for kind in EntryKind::ALL {
        if let Some(existing) = store.find_by_slug(kind, slug).await? {
            if exclude != Some((kind, existing.id)) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}
