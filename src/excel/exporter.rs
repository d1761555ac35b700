//! Quotation → Excel (.xlsx)

use super::schema::{
    col, SchemaVersion, CUSTOMER_SHEET, CUSTOMER_TITLE, GENERATED_ON_LABEL, HEADER_ROW, LABEL_COL,
    QUOTATION_HEADER, QUOTATION_SHEET, SCHEMA_VERSION_LABEL, SUBTOTAL_LABEL, TAX_LABEL,
    TOTAL_LABEL, TRANSPORTATION_LABEL, VALUE_COL,
};
use crate::error::{QuoteError, QuoteResult};
use crate::types::{CustomerDetails, LineItem, Quotation, QuotationTotals};
use chrono::{Local, NaiveDate};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::Path;
use tracing::{debug, info};

fn export_err(what: &str) -> impl Fn(XlsxError) -> QuoteError + '_ {
    move |e| QuoteError::Export(format!("Failed to write {}: {}", what, e))
}

/// Build the two-sheet workbook, stamped with today's date
pub fn encode(
    customer: &CustomerDetails,
    items: &[LineItem],
    totals: &QuotationTotals,
) -> QuoteResult<Workbook> {
    encode_at(customer, items, totals, Local::now().date_naive())
}

/// Build the two-sheet workbook with an explicit Generated-On date.
///
/// Numeric columns are native number cells so a re-import reads back the
/// exact `f64` values.
pub fn encode_at(
    customer: &CustomerDetails,
    items: &[LineItem],
    totals: &QuotationTotals,
    generated_on: NaiveDate,
) -> QuoteResult<Workbook> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    write_customer_sheet(workbook.add_worksheet(), customer, generated_on, &bold)?;
    write_quotation_sheet(workbook.add_worksheet(), items, totals, &bold)?;

    debug!(
        items = items.len(),
        subtotal = totals.subtotal,
        "encoded quotation workbook"
    );
    Ok(workbook)
}

fn write_customer_sheet(
    worksheet: &mut Worksheet,
    customer: &CustomerDetails,
    generated_on: NaiveDate,
    bold: &Format,
) -> QuoteResult<()> {
    let version = SchemaVersion::CURRENT;

    worksheet
        .set_name(CUSTOMER_SHEET)
        .map_err(export_err("worksheet name"))?;
    worksheet
        .set_column_width(LABEL_COL, 18)
        .map_err(export_err("column width"))?;
    worksheet
        .set_column_width(VALUE_COL, 40)
        .map_err(export_err("column width"))?;

    worksheet
        .write_string_with_format(0, LABEL_COL, CUSTOMER_TITLE, bold)
        .map_err(export_err("customer title"))?;

    for row in version.customer_rows() {
        worksheet
            .write_string(row.row, LABEL_COL, row.label)
            .map_err(export_err("customer label"))?;
        worksheet
            .write_string(row.row, VALUE_COL, row.field.get(customer))
            .map_err(export_err("customer value"))?;
    }

    let generated_row = version.generated_on_row();
    worksheet
        .write_string(generated_row, LABEL_COL, GENERATED_ON_LABEL)
        .map_err(export_err("generated-on label"))?;
    worksheet
        .write_string(
            generated_row,
            VALUE_COL,
            generated_on.format("%Y-%m-%d").to_string(),
        )
        .map_err(export_err("generated-on date"))?;

    if let Some(marker_row) = version.marker_row() {
        worksheet
            .write_string(marker_row, LABEL_COL, SCHEMA_VERSION_LABEL)
            .map_err(export_err("schema version label"))?;
        worksheet
            .write_number(marker_row, VALUE_COL, version.number())
            .map_err(export_err("schema version"))?;
    }

    Ok(())
}

fn write_quotation_sheet(
    worksheet: &mut Worksheet,
    items: &[LineItem],
    totals: &QuotationTotals,
    bold: &Format,
) -> QuoteResult<()> {
    worksheet
        .set_name(QUOTATION_SHEET)
        .map_err(export_err("worksheet name"))?;

    for (col_idx, label) in QUOTATION_HEADER.iter().enumerate() {
        worksheet
            .write_string_with_format(HEADER_ROW, col_idx as u16, *label, bold)
            .map_err(export_err("header"))?;
    }

    for (idx, item) in items.iter().enumerate() {
        let row = HEADER_ROW + 1 + idx as u32;
        write_item_row(worksheet, row, item)?;
    }

    // One blank separator row, then the summary block. Column A stays empty
    // on every summary row so the importer's data-row filter skips them.
    let mut row = HEADER_ROW + 1 + items.len() as u32 + 1;
    let label_col = SchemaVersion::CURRENT.summary_label_col();

    let mut summary = vec![(SUBTOTAL_LABEL, totals.subtotal), (TAX_LABEL, totals.tax)];
    if totals.transportation_cost > 0.0 {
        summary.push((TRANSPORTATION_LABEL, totals.transportation_cost));
    }
    summary.push((TOTAL_LABEL, totals.grand_total));

    for (label, value) in summary {
        worksheet
            .write_string_with_format(row, label_col, label, bold)
            .map_err(export_err("summary label"))?;
        worksheet
            .write_number(row, label_col + 1, value)
            .map_err(export_err("summary value"))?;
        row += 1;
    }

    Ok(())
}

fn write_item_row(worksheet: &mut Worksheet, row: u32, item: &LineItem) -> QuoteResult<()> {
    worksheet
        .write_number(row, col::SL_NO, item.sequence_number)
        .map_err(export_err("SL No."))?;
    worksheet
        .write_string(row, col::NAME, &item.name)
        .map_err(export_err("item name"))?;
    worksheet
        .write_string(row, col::DESCRIPTION, &item.description)
        .map_err(export_err("item description"))?;

    let numbers = [
        (col::HEIGHT, item.height),
        (col::WIDTH, item.width),
        (col::AREA, item.area),
        (col::QUANTITY, f64::from(item.quantity)),
        (col::PRICE, item.price_per_area),
        (col::TOTAL_COST, item.total_cost),
    ];
    for (column, value) in numbers {
        worksheet
            .write_number(row, column, value)
            .map_err(export_err("item number"))?;
    }

    worksheet
        .write_string(row, col::NOTE, item.note.as_deref().unwrap_or(""))
        .map_err(export_err("item note"))?;
    Ok(())
}

/// Writes a [`Quotation`] to an .xlsx file
pub struct QuotationExporter<'a> {
    quotation: &'a Quotation,
    generated_on: NaiveDate,
}

impl<'a> QuotationExporter<'a> {
    pub fn new(quotation: &'a Quotation) -> Self {
        Self {
            quotation,
            generated_on: Local::now().date_naive(),
        }
    }

    /// Override the Generated-On date (defaults to today)
    pub fn with_generated_on(mut self, generated_on: NaiveDate) -> Self {
        self.generated_on = generated_on;
        self
    }

    pub fn to_workbook(&self) -> QuoteResult<Workbook> {
        encode_at(
            &self.quotation.customer,
            self.quotation.items(),
            &self.quotation.totals(),
            self.generated_on,
        )
    }

    /// Serialized .xlsx bytes
    pub fn to_buffer(&self) -> QuoteResult<Vec<u8>> {
        self.to_workbook()?
            .save_to_buffer()
            .map_err(export_err("workbook buffer"))
    }

    /// Save the workbook to `output_path`
    pub fn export(&self, output_path: &Path) -> QuoteResult<()> {
        let mut workbook = self.to_workbook()?;
        workbook
            .save(output_path)
            .map_err(|e| QuoteError::Export(format!("Failed to save Excel file: {}", e)))?;

        info!(path = %output_path.display(), "quotation exported");
        Ok(())
    }
}
