//! Area, cost and totals
//!
//! All arithmetic is plain `f64` without rounding. Display formatting is left
//! to the presentation layer so the workbook round-trip keeps full precision.

use super::units::to_canonical;
use crate::types::{LineItem, QuotationTotals, Unit};

/// GST rate applied to the subtotal (18%)
pub const TAX_RATE: f64 = 0.18;

/// Area in square feet of a `height` x `width` opening entered in `unit`
pub fn compute_area(height: f64, width: f64, unit: Unit) -> f64 {
    to_canonical(height, unit) * to_canonical(width, unit)
}

/// Cost of `quantity` pieces of `area` square feet each
pub fn compute_item_cost(area: f64, price_per_area: f64, quantity: u32) -> f64 {
    area * price_per_area * f64::from(quantity)
}

/// Totals over `items`, recomputed from scratch on every call
pub fn compute_totals(items: &[LineItem], transportation_cost: f64) -> QuotationTotals {
    let subtotal: f64 = items.iter().map(|item| item.total_cost).sum();
    let tax = subtotal * TAX_RATE;

    QuotationTotals {
        subtotal,
        tax,
        transportation_cost,
        grand_total: subtotal + tax + transportation_cost,
    }
}
