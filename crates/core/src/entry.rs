//! Entry kinds, their typed records, and the request/response shapes built
//! around them.
//!
//! Each kind is a flat document sharing [`EntryCommon`] plus a few
//! kind-specific fields. Prices are free text ("Call for quote" is a valid
//! price); numeric interpretation is left to the presenter.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// The four listing collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Property,
    Equipment,
    Materials,
    Hauling,
}

impl EntryKind {
    pub const ALL: [EntryKind; 4] = [
        EntryKind::Property,
        EntryKind::Equipment,
        EntryKind::Materials,
        EntryKind::Hauling,
    ];

    /// Lookup order used when a slug is resolved without a known kind.
    pub const RESOLVE_ORDER: [EntryKind; 4] = [
        EntryKind::Materials,
        EntryKind::Equipment,
        EntryKind::Property,
        EntryKind::Hauling,
    ];

    /// Path segment and wire name (`property`, `equipment`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Property => "property",
            EntryKind::Equipment => "equipment",
            EntryKind::Materials => "materials",
            EntryKind::Hauling => "hauling",
        }
    }

    /// Backing collection (table) name.
    pub fn collection(self) -> &'static str {
        match self {
            EntryKind::Property => "properties",
            EntryKind::Equipment => "equipment",
            EntryKind::Materials => "materials",
            EntryKind::Hauling => "hauling",
        }
    }

    /// Human-readable entity name used in error messages.
    pub fn entity_name(self) -> &'static str {
        match self {
            EntryKind::Property => "Property",
            EntryKind::Equipment => "Equipment",
            EntryKind::Materials => "Materials",
            EntryKind::Hauling => "Hauling",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntryKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown entry kind '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Lenient text fields
// ---------------------------------------------------------------------------

/// Price-like fields accept either a JSON string or a JSON number.
#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl From<TextOrNumber> for String {
    fn from(value: TextOrNumber) -> Self {
        match value {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Number(number) => number.to_string(),
        }
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    TextOrNumber::deserialize(deserializer).map(String::from)
}

fn optional_text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<TextOrNumber>::deserialize(deserializer).map(|value| value.map(String::from))
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Fields shared by every entry kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EntryCommon {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub is_active: bool,
    /// Free text, usually a comma-separated list of external listing URLs.
    pub listing_websites: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Property {
    #[serde(flatten)]
    pub common: EntryCommon,
    pub address: String,
    #[serde(deserialize_with = "text_or_number")]
    pub square_footage: String,
    #[serde(deserialize_with = "text_or_number")]
    pub price: String,
    /// `true` for rentals (price is monthly), `false` for sales.
    pub is_rental: bool,
}

impl Default for Property {
    fn default() -> Self {
        Self {
            common: EntryCommon::default(),
            address: String::new(),
            square_footage: "0".to_string(),
            price: "0".to_string(),
            is_rental: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Equipment {
    #[serde(flatten)]
    pub common: EntryCommon,
    #[serde(deserialize_with = "text_or_number")]
    pub price: String,
}

/// One material grade with its delivered and picked-up prices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PriceTier {
    #[serde(rename = "type")]
    pub tier_type: String,
    #[serde(deserialize_with = "text_or_number")]
    pub delivery_price: String,
    #[serde(deserialize_with = "text_or_number")]
    pub pickup_price: String,
}

impl PriceTier {
    pub fn is_blank(&self) -> bool {
        self.tier_type.trim().is_empty()
            && self.delivery_price.trim().is_empty()
            && self.pickup_price.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Materials {
    #[serde(flatten)]
    pub common: EntryCommon,
    pub types_and_prices: Vec<PriceTier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Hauling {
    #[serde(flatten)]
    pub common: EntryCommon,
    #[serde(deserialize_with = "text_or_number")]
    pub price: String,
}

impl Default for Hauling {
    fn default() -> Self {
        Self {
            common: EntryCommon::default(),
            price: "0".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Patches
// ---------------------------------------------------------------------------

/// Partial update of the shared fields. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommonPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_websites: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PropertyPatch {
    #[serde(flatten)]
    pub common: CommonPatch,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_text_or_number"
    )]
    pub square_footage: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_text_or_number"
    )]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_rental: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EquipmentPatch {
    #[serde(flatten)]
    pub common: CommonPatch,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_text_or_number"
    )]
    pub price: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MaterialsPatch {
    #[serde(flatten)]
    pub common: CommonPatch,
    /// Replaces the whole tier list when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types_and_prices: Option<Vec<PriceTier>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HaulingPatch {
    #[serde(flatten)]
    pub common: CommonPatch,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_text_or_number"
    )]
    pub price: Option<String>,
}

// ---------------------------------------------------------------------------
// Record trait
// ---------------------------------------------------------------------------

/// A typed entry document belonging to exactly one [`EntryKind`].
///
/// The serialized form of a record is the document persisted in the kind's
/// collection; the id and slug live beside it, not inside it.
pub trait EntryRecord:
    Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static
{
    const KIND: EntryKind;

    /// Partial-update shape; serializes only the fields that are present.
    type Patch: Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static;

    fn common(&self) -> &EntryCommon;

    /// Field-presence checks applied before every write.
    fn validate(&self) -> Result<(), CoreError> {
        validate_common(self.common())
    }
}

impl EntryRecord for Property {
    const KIND: EntryKind = EntryKind::Property;
    type Patch = PropertyPatch;

    fn common(&self) -> &EntryCommon {
        &self.common
    }
}

impl EntryRecord for Equipment {
    const KIND: EntryKind = EntryKind::Equipment;
    type Patch = EquipmentPatch;

    fn common(&self) -> &EntryCommon {
        &self.common
    }
}

impl EntryRecord for Materials {
    const KIND: EntryKind = EntryKind::Materials;
    type Patch = MaterialsPatch;

    fn common(&self) -> &EntryCommon {
        &self.common
    }

    fn validate(&self) -> Result<(), CoreError> {
        validate_common(&self.common)?;
        if let Some(index) = self
            .types_and_prices
            .iter()
            .position(|tier| tier.tier_type.trim().is_empty())
        {
            return Err(CoreError::Validation(format!(
                "typesAndPrices[{index}].type must not be empty"
            )));
        }
        Ok(())
    }
}

impl EntryRecord for Hauling {
    const KIND: EntryKind = EntryKind::Hauling;
    type Patch = HaulingPatch;

    fn common(&self) -> &EntryCommon {
        &self.common
    }
}

fn validate_common(common: &EntryCommon) -> Result<(), CoreError> {
    if common.name.trim().is_empty() {
        return Err(CoreError::Validation("name must not be empty".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

/// A stored entry as returned by the API: identity, slug, the record's
/// fields inlined, and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry<R> {
    pub id: DbId,
    pub slug: String,
    #[serde(flatten)]
    pub record: R,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Create input. Without a slug one is derived from the record's name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry<R> {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(flatten)]
    pub record: R,
}

/// Update input: an optional slug change plus a kind-specific patch.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryUpdate<P> {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(flatten)]
    pub patch: P,
}

/// Shallow merge of JSON documents: every top-level key of `patch`
/// replaces the same key in `base`. Non-object inputs are left untouched.
pub fn merge_document(base: &mut Value, patch: &Value) {
    if let (Value::Object(base), Value::Object(patch)) = (base, patch) {
        for (key, value) in patch {
            base.insert(key.clone(), value.clone());
        }
    }
}
