//! Query parameter types for listing endpoints.

use inventory_core::error::CoreError;
use inventory_core::presenter::{ListQuery, SortField, SortOrder};
use serde::Deserialize;

/// `?active=&sort=&order=&q=` on `GET /{kind}`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// When `true`, only entries with `isActive` set are returned.
    #[serde(default)]
    pub active: bool,
    /// `name`, `price`, `createdAt` or `updatedAt` (default `createdAt`).
    pub sort: Option<String>,
    /// `asc` or `desc`; defaults depend on the sort field.
    pub order: Option<String>,
    /// Case-insensitive search over name and description.
    pub q: Option<String>,
}

impl ListParams {
    pub fn into_query(self) -> Result<ListQuery, CoreError> {
        let sort = match self.sort.as_deref() {
            Some(s) => s.parse::<SortField>()?,
            None => SortField::default(),
        };
        let order = self.order.as_deref().map(str::parse::<SortOrder>).transpose()?;
        Ok(ListQuery {
            active_only: self.active,
            sort,
            order,
            search: self.q,
        })
    }
}
