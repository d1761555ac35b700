//! Quotation draft files (YAML)
//!
//! ```yaml
//! customer:
//!   project_name: Villa Windows
//!   name: Asha Rao
//! unit: feet
//! price_per_sqft: 500
//! transportation_cost: 1500
//! items:
//!   - name: Sliding Window
//!     height: 4
//!     width: 3
//!     quantity: 2
//! ```
//!
//! This is the one place item input is validated; the store trusts what it
//! is handed.

use crate::error::{QuoteError, QuoteResult};
use crate::types::{CustomerDetails, ItemDraft, Quotation, Unit};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Top level of a draft file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuotationFile {
    #[serde(default)]
    pub customer: CustomerDetails,
    /// Unit for items that don't name their own
    #[serde(default)]
    pub unit: Unit,
    /// Price for items that don't carry their own
    pub price_per_sqft: Option<f64>,
    #[serde(default)]
    pub transportation_cost: f64,
    #[serde(default)]
    pub items: Vec<ItemEntry>,
}

/// One item as written in a draft file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub height: f64,
    pub width: f64,
    pub quantity: Option<i64>,
    pub price_per_sqft: Option<f64>,
    pub unit: Option<Unit>,
    pub note: Option<String>,
}

impl QuotationFile {
    /// Validate every entry and build the numbered quotation
    pub fn into_quotation(self) -> QuoteResult<Quotation> {
        if !self.transportation_cost.is_finite() || self.transportation_cost < 0.0 {
            return Err(QuoteError::Validation(format!(
                "transportation_cost must be a non-negative number, got {}",
                self.transportation_cost
            )));
        }

        let mut quotation = Quotation::new(self.customer);
        quotation.transportation_cost = self.transportation_cost;

        for (index, entry) in self.items.into_iter().enumerate() {
            let draft = entry.into_draft(index, self.unit, self.price_per_sqft)?;
            quotation.store.add_item(draft);
        }

        debug!(items = quotation.store.len(), "built quotation from draft file");
        Ok(quotation)
    }
}

impl ItemEntry {
    fn into_draft(
        self,
        index: usize,
        default_unit: Unit,
        default_price: Option<f64>,
    ) -> QuoteResult<ItemDraft> {
        let invalid = |message: String| {
            QuoteError::Validation(format!("items[{}] '{}': {}", index, self.name, message))
        };

        if self.name.trim().is_empty() {
            return Err(QuoteError::Validation(format!(
                "items[{}]: name is required",
                index
            )));
        }
        for (field, value) in [("height", self.height), ("width", self.width)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!("{} must be a positive number", field)));
            }
        }

        let quantity = self.quantity.unwrap_or(1);
        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|q| *q >= 1)
            .ok_or_else(|| invalid(format!("quantity must be at least 1, got {}", quantity)))?;

        let price = self
            .price_per_sqft
            .or(default_price)
            .ok_or_else(|| invalid("no price_per_sqft on the item or the file".to_string()))?;
        if !price.is_finite() || price < 0.0 {
            return Err(invalid(format!(
                "price_per_sqft must be a non-negative number, got {}",
                price
            )));
        }

        Ok(ItemDraft {
            name: self.name,
            description: self.description,
            height: self.height,
            width: self.width,
            quantity,
            price_per_area: price,
            unit: self.unit.unwrap_or(default_unit),
            note: self.note.filter(|n| !n.trim().is_empty()),
        })
    }
}

/// Parse draft YAML text
pub fn parse_quotation_str(content: &str) -> QuoteResult<Quotation> {
    let file: QuotationFile = serde_yaml::from_str(content)?;
    file.into_quotation()
}

/// Parse a draft YAML file
pub fn parse_quotation_file(path: &Path) -> QuoteResult<Quotation> {
    let content = std::fs::read_to_string(path)?;
    parse_quotation_str(&content)
}
