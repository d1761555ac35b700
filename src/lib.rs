//! Quotation engine - itemized price quotations with Excel round-trip
//!
//! Builds quotations for made-to-measure items (windows, doors, panels):
//! dimensions are converted to feet, areas and costs are priced per square
//! foot, GST and transportation are added on top, and the whole quotation
//! is written to and read back from a two-sheet .xlsx workbook.
//!
//! # Example
//!
//! ```no_run
//! use quotation_engine::excel::{decode, QuotationExporter};
//! use quotation_engine::types::{CustomerDetails, ItemDraft, Quotation, Unit};
//!
//! let mut quotation = Quotation::new(CustomerDetails::default());
//! quotation
//!     .store
//!     .add_item(ItemDraft::new("Sliding Window", 4.0, 3.0, 500.0, Unit::LengthFeet).with_quantity(2));
//!
//! let bytes = QuotationExporter::new(&quotation).to_buffer()?;
//! let decoded = decode(&bytes)?;
//! assert_eq!(decoded.items[0].total_cost, 12000.0);
//! # Ok::<(), quotation_engine::error::QuoteError>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;
pub mod excel;
pub mod naming;
pub mod parser;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use error::{QuoteError, QuoteResult};
pub use types::{CustomerDetails, ItemDraft, LineItem, Quotation, QuotationTotals, Unit};
