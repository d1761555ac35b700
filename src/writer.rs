//! Quotation snapshots (YAML / JSON)
//!
//! A snapshot is the priced, numbered view of a quotation: what an import
//! recovered, or what an export is about to write.

use crate::error::QuoteResult;
use crate::types::{CustomerDetails, LineItem, Quotation, QuotationTotals};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationSnapshot {
    pub customer: CustomerDetails,
    pub items: Vec<LineItem>,
    pub totals: QuotationTotals,
}

impl From<&Quotation> for QuotationSnapshot {
    fn from(quotation: &Quotation) -> Self {
        Self {
            customer: quotation.customer.clone(),
            items: quotation.items().to_vec(),
            totals: quotation.totals(),
        }
    }
}

impl QuotationSnapshot {
    pub fn to_yaml(&self) -> QuoteResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn to_json(&self) -> QuoteResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Write a snapshot of `quotation`; `.json` paths get JSON, anything else YAML
pub fn write_snapshot(path: &Path, quotation: &Quotation) -> QuoteResult<()> {
    let snapshot = QuotationSnapshot::from(quotation);
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let content = if is_json {
        snapshot.to_json()?
    } else {
        snapshot.to_yaml()?
    };
    fs::write(path, content)?;
    Ok(())
}
