//! Two-sheet quotation workbook codec
//!
//! - Export: Quotation → Excel (.xlsx), sheets "Customer Details" and "Quotation"
//! - Import: Excel (.xlsx) → Quotation, items renumbered by row position

mod exporter;
mod importer;
pub mod schema;

pub use exporter::{encode, encode_at, QuotationExporter};
pub use importer::{decode, read_workbook, DecodedQuotation, QuotationImporter};
pub use schema::SchemaVersion;
