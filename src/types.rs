use crate::core::{compute_totals, QuotationStore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

//==============================================================================
// Measurement units
//==============================================================================

/// Linear unit a dimension was entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Unit {
    /// Feet (the canonical unit)
    #[default]
    LengthFeet,
    /// Millimeters (1 ft = 304.8 mm)
    LengthMillimeter,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::LengthFeet => "feet",
            Unit::LengthMillimeter => "mm",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "feet" | "foot" | "ft" => Ok(Unit::LengthFeet),
            "mm" | "millimeter" | "millimeters" | "millimetre" | "millimetres" => {
                Ok(Unit::LengthMillimeter)
            }
            other => Err(format!("unknown unit '{}' (expected feet or mm)", other)),
        }
    }
}

impl TryFrom<String> for Unit {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.as_str().to_string()
    }
}

//==============================================================================
// Quotation entities
//==============================================================================

/// Customer block of a quotation. Plain text, no format is enforced here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerDetails {
    pub project_name: String,
    pub name: String,
    pub gst_number: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

/// An item as submitted by the caller, before numbering and pricing.
///
/// Fields are trusted: presence and numeric shape are checked before the
/// draft reaches [`QuotationStore::add_item`].
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub name: String,
    pub description: String,
    pub height: f64,
    pub width: f64,
    pub quantity: u32,
    pub price_per_area: f64,
    pub unit: Unit,
    pub note: Option<String>,
}

impl ItemDraft {
    /// Draft with quantity 1, no description and no note
    pub fn new(name: impl Into<String>, height: f64, width: f64, price_per_area: f64, unit: Unit) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            height,
            width,
            quantity: 1,
            price_per_area,
            unit,
            note: None,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// A numbered, priced line of the quotation.
///
/// `area` is in square feet whatever unit `height`/`width` were entered in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub sequence_number: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub height: f64,
    pub width: f64,
    pub quantity: u32,
    pub price_per_area: f64,
    pub area: f64,
    pub total_cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Aggregates derived from the line items. Never stored, always recomputed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QuotationTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub transportation_cost: f64,
    pub grand_total: f64,
}

/// A complete quotation: who it is for, what is on it, and what it costs to ship.
#[derive(Debug, Clone, Default)]
pub struct Quotation {
    pub customer: CustomerDetails,
    pub store: QuotationStore,
    pub transportation_cost: f64,
}

impl Quotation {
    pub fn new(customer: CustomerDetails) -> Self {
        Self {
            customer,
            store: QuotationStore::new(),
            transportation_cost: 0.0,
        }
    }

    pub fn items(&self) -> &[LineItem] {
        self.store.items()
    }

    /// Totals over the current items
    pub fn totals(&self) -> QuotationTotals {
        compute_totals(self.store.items(), self.transportation_cost)
    }
}
