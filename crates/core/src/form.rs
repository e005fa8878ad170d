//! Form mapping for entry records.
//!
//! Every kind renders to an ordered list of [`FormField`]s and parses back
//! from a flat `name -> value` map, which is what an HTML form posts as
//! `application/x-www-form-urlencoded`. Checkboxes follow HTML semantics:
//! an unchecked box is simply absent from the submission.
//!
//! Material price tiers are posted as indexed keys:
//!
//! ```text
//! typesAndPrices[0].type=3/4 inch
//! typesAndPrices[0].deliveryPrice=45
//! typesAndPrices[0].pickupPrice=30
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::entry::{
    EntryCommon, EntryKind, EntryRecord, Equipment, Hauling, Materials, NewEntry, PriceTier,
    Property,
};
use crate::error::CoreError;

/// A submitted form, one value per field name.
pub type FormValues = HashMap<String, String>;

const TIERS_FIELD: &str = "typesAndPrices";

static TIER_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^typesAndPrices\[(\d+)\]\.(type|deliveryPrice|pickupPrice)$").expect("valid regex")
});

/// Widget used to edit a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldInput {
    Text,
    TextArea,
    Checkbox,
    PriceTiers,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Tiers(Vec<PriceTier>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub input: FieldInput,
    pub value: FieldValue,
}

impl FormField {
    pub fn text(name: &'static str, label: &'static str, value: &str) -> Self {
        Self {
            name,
            label,
            input: FieldInput::Text,
            value: FieldValue::Text(value.to_string()),
        }
    }

    pub fn textarea(name: &'static str, label: &'static str, value: &str) -> Self {
        Self {
            name,
            label,
            input: FieldInput::TextArea,
            value: FieldValue::Text(value.to_string()),
        }
    }

    pub fn checkbox(name: &'static str, label: &'static str, checked: bool) -> Self {
        Self {
            name,
            label,
            input: FieldInput::Checkbox,
            value: FieldValue::Flag(checked),
        }
    }
}

/// A rendered form for one entry kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryForm {
    pub kind: EntryKind,
    pub fields: Vec<FormField>,
}

/// Two-way mapping between a record and its form fields.
pub trait FormMapping: EntryRecord {
    /// Kind fields in display order. The slug field is appended by
    /// [`render_form`].
    fn form_fields(&self) -> Vec<FormField>;

    /// Build a record from a submission. Missing text fields fall back to
    /// the kind's defaults; missing checkboxes are `false`.
    fn from_form(values: &FormValues) -> Result<Self, CoreError>;
}

/// Render `record` as an edit form with its current `slug`.
pub fn render_form<R: FormMapping>(record: &R, slug: &str) -> EntryForm {
    let mut fields = record.form_fields();
    fields.push(FormField::text("slug", "URL End", slug));
    EntryForm {
        kind: R::KIND,
        fields,
    }
}

/// The empty create form for a kind, pre-filled with its defaults.
pub fn blank_form<R: FormMapping>() -> EntryForm {
    render_form(&R::default(), "")
}

/// Parse and validate a submission into create input.
pub fn parse_form<R: FormMapping>(values: &FormValues) -> Result<NewEntry<R>, CoreError> {
    let record = R::from_form(values)?;
    record.validate()?;
    let slug = values
        .get("slug")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    Ok(NewEntry { slug, record })
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn leading_fields(common: &EntryCommon) -> Vec<FormField> {
    vec![
        FormField::text("name", "Name", &common.name),
        FormField::text("imageUrl", "Image URL", &common.image_url),
        FormField::textarea("description", "Description", &common.description),
    ]
}

fn trailing_fields(common: &EntryCommon) -> Vec<FormField> {
    vec![
        FormField::checkbox("isActive", "Is Active", common.is_active),
        FormField::text("listingWebsites", "Listing Websites", &common.listing_websites),
    ]
}

fn text_or(values: &FormValues, name: &str, default: &str) -> String {
    values
        .get(name)
        .cloned()
        .unwrap_or_else(|| default.to_string())
}

fn checked(values: &FormValues, name: &str) -> bool {
    values.get(name).is_some_and(|value| {
        matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "on" | "true" | "1" | "yes"
        )
    })
}

fn common_from_form(values: &FormValues) -> EntryCommon {
    EntryCommon {
        name: text_or(values, "name", ""),
        description: text_or(values, "description", ""),
        image_url: text_or(values, "imageUrl", ""),
        is_active: checked(values, "isActive"),
        listing_websites: text_or(values, "listingWebsites", ""),
    }
}

fn tiers_from_form(values: &FormValues) -> Result<Vec<PriceTier>, CoreError> {
    let mut rows: BTreeMap<usize, PriceTier> = BTreeMap::new();

    for (key, value) in values {
        if !key.starts_with(TIERS_FIELD) {
            continue;
        }
        let captures = TIER_KEY_RE
            .captures(key)
            .ok_or_else(|| CoreError::Validation(format!("Malformed price tier field '{key}'")))?;
        let index: usize = captures[1]
            .parse()
            .map_err(|_| CoreError::Validation(format!("Malformed price tier field '{key}'")))?;

        let row = rows.entry(index).or_default();
        match &captures[2] {
            "type" => row.tier_type = value.clone(),
            "deliveryPrice" => row.delivery_price = value.clone(),
            _ => row.pickup_price = value.clone(),
        }
    }

    Ok(rows
        .into_values()
        .filter(|tier| !tier.is_blank())
        .collect())
}

// ---------------------------------------------------------------------------
// Per-kind mappings
// ---------------------------------------------------------------------------

impl FormMapping for Property {
    fn form_fields(&self) -> Vec<FormField> {
        let mut fields = leading_fields(&self.common);
        fields.extend([
            FormField::text("address", "Address", &self.address),
            FormField::text("squareFootage", "Square Footage", &self.square_footage),
            FormField::text("price", "Price", &self.price),
            FormField::checkbox("isRental", "Is Rental", self.is_rental),
        ]);
        fields.extend(trailing_fields(&self.common));
        fields
    }

    fn from_form(values: &FormValues) -> Result<Self, CoreError> {
        let defaults = Property::default();
        Ok(Property {
            common: common_from_form(values),
            address: text_or(values, "address", &defaults.address),
            square_footage: text_or(values, "squareFootage", &defaults.square_footage),
            price: text_or(values, "price", &defaults.price),
            is_rental: checked(values, "isRental"),
        })
    }
}

impl FormMapping for Equipment {
    fn form_fields(&self) -> Vec<FormField> {
        let mut fields = leading_fields(&self.common);
        fields.push(FormField::text("price", "Price", &self.price));
        fields.extend(trailing_fields(&self.common));
        fields
    }

    fn from_form(values: &FormValues) -> Result<Self, CoreError> {
        Ok(Equipment {
            common: common_from_form(values),
            price: text_or(values, "price", ""),
        })
    }
}

impl FormMapping for Materials {
    fn form_fields(&self) -> Vec<FormField> {
        let mut fields = leading_fields(&self.common);
        fields.push(FormField {
            name: TIERS_FIELD,
            label: "Types and Prices",
            input: FieldInput::PriceTiers,
            value: FieldValue::Tiers(self.types_and_prices.clone()),
        });
        fields.extend(trailing_fields(&self.common));
        fields
    }

    fn from_form(values: &FormValues) -> Result<Self, CoreError> {
        Ok(Materials {
            common: common_from_form(values),
            types_and_prices: tiers_from_form(values)?,
        })
    }
}

impl FormMapping for Hauling {
    fn form_fields(&self) -> Vec<FormField> {
        let mut fields = leading_fields(&self.common);
        fields.push(FormField::text("price", "Price", &self.price));
        fields.extend(trailing_fields(&self.common));
        fields
    }

    fn from_form(values: &FormValues) -> Result<Self, CoreError> {
        let defaults = Hauling::default();
        Ok(Hauling {
            common: common_from_form(values),
            price: text_or(values, "price", &defaults.price),
        })
    }
}
