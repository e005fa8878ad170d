//! List and detail presentation.
//!
//! Listing is filter-then-sort over whatever the store returned; detail views
//! turn a record into display-ready label/value lines. Prices stay free text
//! in storage and are only interpreted numerically here.

use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::entry::{Entry, EntryKind, EntryRecord, Equipment, Hauling, Materials, Property};
use crate::error::CoreError;
use crate::types::DbId;

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s,]+").expect("valid regex"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Name,
    Price,
}

impl SortField {
    /// Timestamps default to newest first, everything else to ascending.
    pub fn default_order(self) -> SortOrder {
        match self {
            SortField::CreatedAt | SortField::UpdatedAt => SortOrder::Desc,
            SortField::Name | SortField::Price => SortOrder::Asc,
        }
    }
}

impl FromStr for SortField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(SortField::CreatedAt),
            "updatedAt" => Ok(SortField::UpdatedAt),
            "name" => Ok(SortField::Name),
            "price" => Ok(SortField::Price),
            other => Err(CoreError::Validation(format!(
                "Unknown sort field '{other}' (expected name, price, createdAt or updatedAt)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(CoreError::Validation(format!(
                "Unknown sort order '{other}' (expected asc or desc)"
            ))),
        }
    }
}

/// Filtering and ordering applied to a listing.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Keep only entries with `isActive = true`.
    pub active_only: bool,
    pub sort: SortField,
    /// Falls back to [`SortField::default_order`].
    pub order: Option<SortOrder>,
    /// Case-insensitive substring match on name and description.
    pub search: Option<String>,
}

/// One labelled line of a detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailLine {
    pub label: String,
    pub value: String,
}

impl DetailLine {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Kind-specific presentation.
pub trait Presentable: EntryRecord {
    /// Numeric price used for sorting; `None` when the price text does not
    /// parse (e.g. "Call for quote").
    fn price_value(&self) -> Option<f64>;

    /// Display lines for the detail page, after the common header.
    fn detail_lines(&self) -> Vec<DetailLine>;
}

impl Presentable for Property {
    fn price_value(&self) -> Option<f64> {
        parse_number(&self.price)
    }

    fn detail_lines(&self) -> Vec<DetailLine> {
        let price = if self.is_rental {
            format!("{} /month", money(&self.price))
        } else {
            money(&self.price)
        };
        vec![
            DetailLine::new("Address", self.address.clone()),
            DetailLine::new("Price", price),
            DetailLine::new("Square Footage", format_number(&self.square_footage)),
            DetailLine::new(
                "Rental Status",
                if self.is_rental { "For Rent" } else { "For Sale" },
            ),
        ]
    }
}

impl Presentable for Equipment {
    fn price_value(&self) -> Option<f64> {
        parse_number(&self.price)
    }

    fn detail_lines(&self) -> Vec<DetailLine> {
        vec![DetailLine::new("Price", money(&self.price))]
    }
}

impl Presentable for Materials {
    /// The cheapest delivered price across tiers.
    fn price_value(&self) -> Option<f64> {
        self.types_and_prices
            .iter()
            .filter_map(|tier| parse_number(&tier.delivery_price))
            .min_by(f64::total_cmp)
    }

    fn detail_lines(&self) -> Vec<DetailLine> {
        self.types_and_prices
            .iter()
            .map(|tier| {
                DetailLine::new(
                    tier.tier_type.clone(),
                    format!(
                        "Delivery {} / Pickup {}",
                        money(&tier.delivery_price),
                        money(&tier.pickup_price)
                    ),
                )
            })
            .collect()
    }
}

impl Presentable for Hauling {
    fn price_value(&self) -> Option<f64> {
        parse_number(&self.price)
    }

    fn detail_lines(&self) -> Vec<DetailLine> {
        vec![DetailLine::new("Price", money(&self.price))]
    }
}

/// Display-ready detail page for one entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailView {
    pub kind: EntryKind,
    pub id: DbId,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub is_active: bool,
    pub listing_websites: String,
    /// URLs found in `listing_websites`, in order of appearance.
    pub listing_links: Vec<String>,
    pub lines: Vec<DetailLine>,
}

pub fn detail_view<R: Presentable>(entry: &Entry<R>) -> DetailView {
    let common = entry.record.common();
    DetailView {
        kind: R::KIND,
        id: entry.id,
        slug: entry.slug.clone(),
        name: common.name.clone(),
        description: common.description.clone(),
        image_url: common.image_url.clone(),
        is_active: common.is_active,
        listing_websites: common.listing_websites.clone(),
        listing_links: LINK_RE
            .find_iter(&common.listing_websites)
            .map(|m| m.as_str().to_string())
            .collect(),
        lines: entry.record.detail_lines(),
    }
}

/// Apply the active filter and search, then sort. The sort is stable.
///
/// Entries whose price does not parse always sort after priced ones,
/// whichever direction is requested.
pub fn present<R: Presentable>(entries: Vec<Entry<R>>, query: &ListQuery) -> Vec<Entry<R>> {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut entries: Vec<Entry<R>> = entries
        .into_iter()
        .filter(|entry| !query.active_only || entry.record.common().is_active)
        .filter(|entry| match &needle {
            Some(needle) => {
                let common = entry.record.common();
                common.name.to_lowercase().contains(needle)
                    || common.description.to_lowercase().contains(needle)
            }
            None => true,
        })
        .collect();

    let order = query.order.unwrap_or(query.sort.default_order());
    entries.sort_by(|a, b| compare(a, b, query.sort, order));
    entries
}

fn compare<R: Presentable>(a: &Entry<R>, b: &Entry<R>, sort: SortField, order: SortOrder) -> Ordering {
    let directed = |ordering: Ordering| match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    };

    match sort {
        SortField::CreatedAt => directed(a.created_at.cmp(&b.created_at)),
        SortField::UpdatedAt => directed(a.updated_at.cmp(&b.updated_at)),
        SortField::Name => directed(
            a.record
                .common()
                .name
                .to_lowercase()
                .cmp(&b.record.common().name.to_lowercase()),
        ),
        SortField::Price => match (a.record.price_value(), b.record.price_value()) {
            (Some(x), Some(y)) => directed(x.total_cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

/// Parse price-like text: surrounding whitespace, a leading `$`, and
/// thousands separators are ignored.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Render numeric text with thousands separators and at most three fraction
/// digits. Text that is not a number comes back unchanged.
///
/// ```
/// use inventory_core::presenter::format_number;
///
/// assert_eq!(format_number("1234567.5"), "1,234,567.5");
/// assert_eq!(format_number("Call for quote"), "Call for quote");
/// ```
pub fn format_number(text: &str) -> String {
    let Some(value) = parse_number(text) else {
        return text.to_string();
    };

    let rounded = (value * 1000.0).round() / 1000.0;
    let fixed = format!("{:.3}", rounded.abs());
    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut out = String::new();
    if rounded < 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(whole));
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// `$`-prefixed display for numeric prices; free text is shown as is.
fn money(text: &str) -> String {
    match parse_number(text) {
        Some(_) => format!("${}", format_number(text)),
        None => text.to_string(),
    }
}
