//! Workbook layout shared by the exporter and the importer
//!
//! Every cell the codec touches is addressed through this module, so a
//! layout change is a schema change and not a scattered index edit.
//! Rows and columns are 0-based (A1 = (0, 0)).

use crate::error::{QuoteError, QuoteResult};
use crate::types::CustomerDetails;

pub const CUSTOMER_SHEET: &str = "Customer Details";
pub const QUOTATION_SHEET: &str = "Quotation";

pub const CUSTOMER_TITLE: &str = "Customer Details";
pub const GENERATED_ON_LABEL: &str = "Generated On";
pub const SCHEMA_VERSION_LABEL: &str = "Schema Version";

/// Customer Details: label in column A, value in column B
pub const LABEL_COL: u16 = 0;
pub const VALUE_COL: u16 = 1;

/// Quotation header row
pub const HEADER_ROW: u32 = 0;

pub const SUBTOTAL_LABEL: &str = "Subtotal:";
pub const TAX_LABEL: &str = "GST (18%):";
pub const TRANSPORTATION_LABEL: &str = "Transportation:";
pub const TOTAL_LABEL: &str = "Total Amount:";

/// Customer Details layouts seen in the wild
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    /// No Project Name row, no Note column
    V1,
    /// Project Name row, Note column, version marker
    V2,
}

impl SchemaVersion {
    pub const CURRENT: SchemaVersion = SchemaVersion::V2;

    pub fn number(self) -> u32 {
        match self {
            SchemaVersion::V1 => 1,
            SchemaVersion::V2 => 2,
        }
    }

    pub fn from_number(n: f64) -> QuoteResult<Self> {
        match n {
            n if n == 1.0 => Ok(SchemaVersion::V1),
            n if n == 2.0 => Ok(SchemaVersion::V2),
            other => Err(QuoteError::Decode(format!(
                "Unsupported workbook schema version {}",
                other
            ))),
        }
    }

    /// (label, row) pairs of the customer fields
    pub fn customer_rows(self) -> &'static [CustomerRow] {
        match self {
            SchemaVersion::V1 => &CUSTOMER_ROWS_V1,
            SchemaVersion::V2 => &CUSTOMER_ROWS_V2,
        }
    }

    pub fn generated_on_row(self) -> u32 {
        match self {
            SchemaVersion::V1 => 7,
            SchemaVersion::V2 => 8,
        }
    }

    /// Row of the version marker (written for V2 only)
    pub fn marker_row(self) -> Option<u32> {
        match self {
            SchemaVersion::V1 => None,
            SchemaVersion::V2 => Some(9),
        }
    }

    /// Number of Quotation columns, and thereby where the summary block sits
    pub fn column_count(self) -> u16 {
        match self {
            SchemaVersion::V1 => 9,
            SchemaVersion::V2 => 10,
        }
    }

    /// Summary label column; the value sits one to the right
    pub fn summary_label_col(self) -> u16 {
        self.column_count() - 2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerField {
    ProjectName,
    Name,
    GstNumber,
    Address,
    Phone,
    Email,
}

impl CustomerField {
    pub fn get(self, customer: &CustomerDetails) -> &str {
        match self {
            CustomerField::ProjectName => &customer.project_name,
            CustomerField::Name => &customer.name,
            CustomerField::GstNumber => &customer.gst_number,
            CustomerField::Address => &customer.address,
            CustomerField::Phone => &customer.phone,
            CustomerField::Email => &customer.email,
        }
    }

    pub fn set(self, customer: &mut CustomerDetails, value: String) {
        let slot = match self {
            CustomerField::ProjectName => &mut customer.project_name,
            CustomerField::Name => &mut customer.name,
            CustomerField::GstNumber => &mut customer.gst_number,
            CustomerField::Address => &mut customer.address,
            CustomerField::Phone => &mut customer.phone,
            CustomerField::Email => &mut customer.email,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CustomerRow {
    pub label: &'static str,
    pub row: u32,
    pub field: CustomerField,
}

const fn customer_row(label: &'static str, row: u32, field: CustomerField) -> CustomerRow {
    CustomerRow { label, row, field }
}

const CUSTOMER_ROWS_V2: [CustomerRow; 6] = [
    customer_row("Project Name", 1, CustomerField::ProjectName),
    customer_row("Name", 2, CustomerField::Name),
    customer_row("GST Number", 3, CustomerField::GstNumber),
    customer_row("Address", 4, CustomerField::Address),
    customer_row("Phone", 5, CustomerField::Phone),
    customer_row("Email", 6, CustomerField::Email),
];

const CUSTOMER_ROWS_V1: [CustomerRow; 5] = [
    customer_row("Name", 1, CustomerField::Name),
    customer_row("GST Number", 2, CustomerField::GstNumber),
    customer_row("Address", 3, CustomerField::Address),
    customer_row("Phone", 4, CustomerField::Phone),
    customer_row("Email", 5, CustomerField::Email),
];

/// Quotation sheet columns
pub mod col {
    pub const SL_NO: u16 = 0;
    pub const NAME: u16 = 1;
    pub const DESCRIPTION: u16 = 2;
    pub const HEIGHT: u16 = 3;
    pub const WIDTH: u16 = 4;
    pub const AREA: u16 = 5;
    pub const QUANTITY: u16 = 6;
    pub const PRICE: u16 = 7;
    pub const TOTAL_COST: u16 = 8;
    pub const NOTE: u16 = 9;
}

/// Header labels, indexed by column. Decoding matches by prefix so
/// decorated headers such as `Price/Sq.ft (₹)` are accepted.
pub const QUOTATION_HEADER: [&str; 10] = [
    "SL No.",
    "Name",
    "Description",
    "Height",
    "Width",
    "Area (Sq.ft)",
    "Quantity",
    "Price/Sq.ft",
    "Total Cost",
    "Note",
];

/// Case-insensitive label comparison, ignoring surrounding whitespace
pub fn label_matches(found: &str, expected: &str) -> bool {
    found.trim().eq_ignore_ascii_case(expected)
}

/// Case-insensitive prefix comparison for header cells
pub fn header_matches(found: &str, expected: &str) -> bool {
    found
        .trim()
        .to_lowercase()
        .starts_with(&expected.to_lowercase())
}

/// Excel-style A1 reference for error messages
pub fn cell_ref(row: u32, col: u16) -> String {
    let mut letters = String::new();
    let mut n = col as u32;
    loop {
        letters.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    format!("{}{}", letters, row + 1)
}
