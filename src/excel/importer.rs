//! Excel (.xlsx) → Quotation

use super::schema::{
    cell_ref, col, header_matches, label_matches, SchemaVersion, CUSTOMER_SHEET, HEADER_ROW,
    LABEL_COL, QUOTATION_HEADER, QUOTATION_SHEET, SCHEMA_VERSION_LABEL, TRANSPORTATION_LABEL,
    VALUE_COL,
};
use crate::core::QuotationStore;
use crate::error::{QuoteError, QuoteResult};
use crate::types::{CustomerDetails, LineItem, Quotation};
use calamine::{Data, Range, Reader, Xlsx};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Everything recovered from a quotation workbook
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedQuotation {
    pub customer: CustomerDetails,
    /// Data rows in sheet order, numbered 1..N by position
    pub items: Vec<LineItem>,
    /// Value of the `Transportation:` summary row, 0 when absent
    pub transportation_cost: f64,
    pub schema_version: SchemaVersion,
}

impl DecodedQuotation {
    pub fn into_quotation(self) -> Quotation {
        Quotation {
            customer: self.customer,
            store: QuotationStore::from(self.items),
            transportation_cost: self.transportation_cost,
        }
    }
}

/// Decode an in-memory .xlsx workbook.
///
/// Only Quotation rows whose first cell is a number are items; their stored
/// SL No. is discarded and replaced by their position. Malformed numeric
/// cells read as 0 and missing text as an empty string. A missing sheet or a
/// header/label that contradicts the schema is a `Decode` error.
pub fn decode(bytes: &[u8]) -> QuoteResult<DecodedQuotation> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| QuoteError::Decode(format!("Failed to open workbook: {}", e)))?;

    let sheet_names = workbook.sheet_names();
    for required in [CUSTOMER_SHEET, QUOTATION_SHEET] {
        if !sheet_names.iter().any(|name| name == required) {
            return Err(QuoteError::Decode(format!(
                "Workbook has no '{}' sheet",
                required
            )));
        }
    }

    let customer_range = workbook
        .worksheet_range(CUSTOMER_SHEET)
        .map_err(|e| QuoteError::Decode(format!("Failed to read '{}': {}", CUSTOMER_SHEET, e)))?;
    let quotation_range = workbook
        .worksheet_range(QUOTATION_SHEET)
        .map_err(|e| QuoteError::Decode(format!("Failed to read '{}': {}", QUOTATION_SHEET, e)))?;

    let schema_version = detect_schema_version(&customer_range)?;
    let customer = read_customer(&customer_range, schema_version)?;
    let has_note = check_header(&quotation_range)?;
    let (items, transportation_cost) = read_items(&quotation_range, has_note);

    debug!(
        ?schema_version,
        items = items.len(),
        transportation_cost,
        "decoded quotation workbook"
    );

    Ok(DecodedQuotation {
        customer,
        items,
        transportation_cost,
        schema_version,
    })
}

/// Read `path` in one shot, then decode it
pub async fn read_workbook(path: impl AsRef<Path>) -> QuoteResult<DecodedQuotation> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    info!(path = %path.display(), bytes = bytes.len(), "read workbook");
    decode(&bytes)
}

/// Imports a quotation workbook from disk
pub struct QuotationImporter {
    path: PathBuf,
}

impl QuotationImporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub async fn import(&self) -> QuoteResult<Quotation> {
        Ok(read_workbook(&self.path).await?.into_quotation())
    }
}

//==============================================================================
// Cell access
//==============================================================================

fn cell(range: &Range<Data>, row: u32, col: u16) -> Option<&Data> {
    range
        .get_value((row, col as u32))
        .filter(|data| !matches!(data, Data::Empty))
}

fn cell_text(range: &Range<Data>, row: u32, col: u16) -> String {
    match cell(range, row, col) {
        Some(Data::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn cell_number(range: &Range<Data>, row: u32, col: u16) -> f64 {
    let value = match cell(range, row, col) {
        Some(Data::Float(f)) => *f,
        Some(Data::Int(i)) => *i as f64,
        Some(Data::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn is_number(range: &Range<Data>, row: u32, col: u16) -> bool {
    matches!(cell(range, row, col), Some(Data::Float(_) | Data::Int(_)))
}

fn last_row(range: &Range<Data>) -> Option<u32> {
    range.end().map(|(row, _)| row)
}

//==============================================================================
// Customer Details
//==============================================================================

/// Use the explicit marker when present, else tell the layouts apart by
/// the label in A2.
fn detect_schema_version(range: &Range<Data>) -> QuoteResult<SchemaVersion> {
    let Some(end) = last_row(range) else {
        return Ok(SchemaVersion::CURRENT);
    };

    for row in 0..=end {
        if label_matches(&cell_text(range, row, LABEL_COL), SCHEMA_VERSION_LABEL) {
            return SchemaVersion::from_number(cell_number(range, row, VALUE_COL));
        }
    }

    let project_label = SchemaVersion::V2.customer_rows()[0].label;
    if label_matches(&cell_text(range, 1, LABEL_COL), project_label) {
        Ok(SchemaVersion::V2)
    } else {
        Ok(SchemaVersion::V1)
    }
}

fn read_customer(range: &Range<Data>, version: SchemaVersion) -> QuoteResult<CustomerDetails> {
    let mut customer = CustomerDetails::default();

    for row in version.customer_rows() {
        let label = cell_text(range, row.row, LABEL_COL);
        if !label.trim().is_empty() && !label_matches(&label, row.label) {
            return Err(QuoteError::Decode(format!(
                "{}!{}: expected '{}', found '{}'",
                CUSTOMER_SHEET,
                cell_ref(row.row, LABEL_COL),
                row.label,
                label
            )));
        }
        row.field.set(&mut customer, cell_text(range, row.row, VALUE_COL));
    }

    Ok(customer)
}

//==============================================================================
// Quotation
//==============================================================================

/// Validate the header row; returns whether the Note column is present
fn check_header(range: &Range<Data>) -> QuoteResult<bool> {
    for (idx, expected) in QUOTATION_HEADER.iter().enumerate().take(col::NOTE as usize) {
        let found = cell_text(range, HEADER_ROW, idx as u16);
        if !header_matches(&found, expected) {
            return Err(QuoteError::Decode(format!(
                "{}!{}: expected header '{}', found '{}'",
                QUOTATION_SHEET,
                cell_ref(HEADER_ROW, idx as u16),
                expected,
                found
            )));
        }
    }

    let note = cell_text(range, HEADER_ROW, col::NOTE);
    Ok(header_matches(&note, QUOTATION_HEADER[col::NOTE as usize]))
}

fn read_items(range: &Range<Data>, has_note: bool) -> (Vec<LineItem>, f64) {
    let mut items = Vec::new();
    let mut transportation_cost = 0.0;

    let Some(end) = last_row(range) else {
        return (items, transportation_cost);
    };
    let width = range.end().map(|(_, c)| c as u16).unwrap_or(0);

    for row in HEADER_ROW + 1..=end {
        // Any number counts, SL No. 0 included
        if is_number(range, row, col::SL_NO) {
            items.push(read_item(range, row, items.len() as u32 + 1, has_note));
            continue;
        }

        for label_col in 0..width {
            if label_matches(&cell_text(range, row, label_col), TRANSPORTATION_LABEL) {
                transportation_cost = cell_number(range, row, label_col + 1);
            }
        }
    }

    (items, transportation_cost)
}

fn read_item(range: &Range<Data>, row: u32, sequence_number: u32, has_note: bool) -> LineItem {
    let mut quantity = cell_number(range, row, col::QUANTITY);
    if quantity.fract() != 0.0 {
        warn!(
            "fractional quantity {} at {}, rounded",
            quantity,
            cell_ref(row, col::QUANTITY)
        );
        quantity = quantity.round();
    }
    let note = if has_note {
        Some(cell_text(range, row, col::NOTE)).filter(|n| !n.is_empty())
    } else {
        None
    };

    LineItem {
        sequence_number,
        name: cell_text(range, row, col::NAME),
        description: cell_text(range, row, col::DESCRIPTION),
        height: cell_number(range, row, col::HEIGHT),
        width: cell_number(range, row, col::WIDTH),
        area: cell_number(range, row, col::AREA),
        // `as` saturates: negatives land on 0
        quantity: quantity as u32,
        price_per_area: cell_number(range, row, col::PRICE),
        total_cost: cell_number(range, row, col::TOTAL_COST),
        note,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range_from(rows: Vec<Vec<Data>>) -> Range<Data> {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(1) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in rows.into_iter().enumerate() {
            for (c, value) in row.into_iter().enumerate() {
                range.set_value((r as u32, c as u32), value);
            }
        }
        range
    }

    fn s(text: &str) -> Data {
        Data::String(text.to_string())
    }

    #[test]
    fn test_cell_number_degrades_to_zero() {
        let range = range_from(vec![vec![
            s("abc"),
            s(" 12.5 "),
            Data::Int(3),
            Data::Bool(true),
            Data::Empty,
        ]]);

        assert_eq!(cell_number(&range, 0, 0), 0.0);
        assert_eq!(cell_number(&range, 0, 1), 12.5);
        assert_eq!(cell_number(&range, 0, 2), 3.0);
        assert_eq!(cell_number(&range, 0, 3), 0.0);
        assert_eq!(cell_number(&range, 0, 4), 0.0);
        assert_eq!(cell_number(&range, 5, 5), 0.0);
    }

    #[test]
    fn test_cell_text_of_numbers() {
        let range = range_from(vec![vec![Data::Float(9876543210.0), Data::Empty]]);
        assert_eq!(cell_text(&range, 0, 0), "9876543210");
        assert_eq!(cell_text(&range, 0, 1), "");
    }

    #[test]
    fn test_detect_legacy_layout_by_label() {
        let v1 = range_from(vec![vec![s("Customer Details")], vec![s("Name"), s("Asha")]]);
        assert_eq!(detect_schema_version(&v1).unwrap(), SchemaVersion::V1);

        let v2 = range_from(vec![
            vec![s("Customer Details")],
            vec![s("Project Name"), s("Villa")],
        ]);
        assert_eq!(detect_schema_version(&v2).unwrap(), SchemaVersion::V2);
    }

    #[test]
    fn test_read_customer_rejects_shifted_labels() {
        let range = range_from(vec![
            vec![s("Customer Details")],
            vec![s("Project Name"), s("Villa")],
            vec![s("GST Number"), s("29ABC")],
        ]);
        let err = read_customer(&range, SchemaVersion::V2).unwrap_err();
        assert!(err.to_string().contains("A3"));
    }

    #[test]
    fn test_read_items_filters_and_renumbers() {
        let header: Vec<Data> = QUOTATION_HEADER.iter().map(|h| s(h)).collect();
        let data_row = |sl: f64, name: &str| {
            vec![
                Data::Float(sl),
                s(name),
                Data::Empty,
                Data::Float(4.0),
                Data::Float(3.0),
                Data::Float(12.0),
                Data::Float(2.0),
                Data::Float(500.0),
                Data::Float(12000.0),
                Data::Empty,
            ]
        };
        let range = range_from(vec![
            header,
            data_row(7.0, "first"),
            vec![Data::Empty, s("stray")],
            data_row(3.0, "second"),
            vec![],
            vec![
                Data::Empty, Data::Empty, Data::Empty, Data::Empty, Data::Empty,
                Data::Empty, Data::Empty, Data::Empty, s("Transportation:"), Data::Float(750.0),
            ],
        ]);

        let has_note = check_header(&range).unwrap();
        let (items, transport) = read_items(&range, has_note);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].sequence_number, 1);
        assert_eq!(items[0].name, "first");
        assert_eq!(items[1].sequence_number, 2);
        assert_eq!(items[1].name, "second");
        assert_eq!(items[1].note, None);
        assert_eq!(transport, 750.0);
    }

    #[test]
    fn test_read_item_rounds_fractional_quantity() {
        let range = range_from(vec![vec![
            Data::Float(1.0),
            s("Door"),
            Data::Empty,
            Data::Float(7.0),
            Data::Float(3.0),
            Data::Float(21.0),
            Data::Float(2.7),
            Data::Float(100.0),
            Data::Float(6300.0),
        ]]);

        let item = read_item(&range, 0, 1, false);
        assert_eq!(item.quantity, 3);
        assert_eq!(item.total_cost, item.area * item.price_per_area * item.quantity as f64);
    }

    #[test]
    fn test_check_header_mismatch() {
        let range = range_from(vec![vec![s("SL No."), s("Width")]]);
        let err = check_header(&range).unwrap_err();
        assert!(matches!(err, QuoteError::Decode(_)));
        assert!(err.to_string().contains("B1"));
    }

    #[test]
    fn test_decode_garbage_bytes() {
        let result = decode(b"not a spreadsheet");
        assert!(matches!(result, Err(QuoteError::Decode(_))));
    }
}
