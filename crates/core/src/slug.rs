//! Slug normalisation.
//!
//! Slugs are the public path segment of an entry (`/gravel-3-4`). They are
//! unique across all four collections; uniqueness itself is enforced by the
//! allocator in the storage crate, this module only shapes the text.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// Lowercase `text` and collapse every run of non-alphanumeric characters
/// into a single `-`, trimming dashes from both ends.
///
/// ```
/// use inventory_core::slug::normalize_slug;
///
/// assert_eq!(normalize_slug("  Gravel 3/4\" Crushed ").unwrap(), "gravel-3-4-crushed");
/// ```
pub fn normalize_slug(text: &str) -> Result<String, CoreError> {
    let lowered = text.to_lowercase();
    let slug = SEPARATOR_RE.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        return Err(CoreError::Validation(format!(
            "'{text}' does not contain any characters usable in a slug"
        )));
    }
    Ok(slug.to_string())
}

/// The `n`th fallback for a taken slug: `base-1`, `base-2`, ...
pub fn suffixed(base: &str, n: u32) -> String {
    format!("{base}-{n}")
}
