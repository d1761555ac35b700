//! Quotation arithmetic and item bookkeeping

pub mod pricing;
pub mod store;
pub mod units;

pub use pricing::{compute_area, compute_item_cost, compute_totals, TAX_RATE};
pub use store::QuotationStore;
pub use units::{to_canonical, MM_PER_FOOT};
