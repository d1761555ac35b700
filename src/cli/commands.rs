use crate::error::{QuoteError, QuoteResult};
use crate::excel::{read_workbook, QuotationExporter};
use crate::naming::output_filename;
use crate::parser;
use crate::types::{LineItem, Quotation, QuotationTotals};
use crate::writer::{self, QuotationSnapshot};
use chrono::Local;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Format an amount for display with two decimals
fn format_amount(n: f64) -> String {
    format!("{:.2}", n)
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"))
}

/// Load a quotation from a draft YAML file or an exported workbook
pub async fn load_quotation(path: &Path) -> QuoteResult<Quotation> {
    if is_workbook(path) {
        Ok(read_workbook(path).await?.into_quotation())
    } else {
        parser::parse_quotation_file(path)
    }
}

/// Execute the export command
pub fn export(
    input: PathBuf,
    output: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    verbose: bool,
) -> QuoteResult<PathBuf> {
    println!("{}", "🧾 Quotation - Excel Export".bold().green());
    println!("   Input:  {}", input.display());

    let quotation = parser::parse_quotation_file(&input)?;

    if verbose {
        println!("   Found {} items\n", quotation.store.len());
    }

    let output = output.unwrap_or_else(|| {
        let name = output_filename(&quotation.customer, Local::now().date_naive(), "xlsx");
        output_dir.unwrap_or_default().join(name)
    });

    QuotationExporter::new(&quotation).export(&output)?;
    info!(items = quotation.store.len(), "export finished");

    print_totals(&quotation.totals());
    println!("{}", "✅ Export Complete!".bold().green());
    println!("   Excel file: {}\n", output.display());

    Ok(output)
}

/// Execute the import command
pub async fn import(input: PathBuf, output: Option<PathBuf>, verbose: bool) -> QuoteResult<()> {
    println!("{}", "🧾 Quotation - Excel Import".bold().green());
    println!("   Input:  {}", input.display());

    if !is_workbook(&input) {
        return Err(QuoteError::Validation(format!(
            "{} is not an .xlsx workbook",
            input.display()
        )));
    }

    let quotation = load_quotation(&input).await?;

    if verbose {
        print_items(quotation.items());
    }
    print_totals(&quotation.totals());

    if let Some(output) = output {
        writer::write_snapshot(&output, &quotation)?;
        println!("   Snapshot: {}", output.display());
    }

    println!("{}", "✅ Import Complete!".bold().green());
    println!("   {} items imported\n", quotation.store.len());
    Ok(())
}

/// Execute the summary command
pub async fn summary(input: PathBuf, json: bool) -> QuoteResult<()> {
    let quotation = load_quotation(&input).await?;

    if json {
        println!("{}", QuotationSnapshot::from(&quotation).to_json()?);
        return Ok(());
    }

    let customer = &quotation.customer;
    println!("{}", "🧾 Quotation Summary".bold().green());
    if !customer.project_name.is_empty() {
        println!("   Project:  {}", customer.project_name.bright_blue());
    }
    if !customer.name.is_empty() {
        println!("   Customer: {}", customer.name);
    }
    if !customer.gst_number.is_empty() {
        println!("   GSTIN:    {}", customer.gst_number);
    }
    println!();

    print_items(quotation.items());
    print_totals(&quotation.totals());
    Ok(())
}

fn print_items(items: &[LineItem]) {
    if items.is_empty() {
        println!("   {}", "(no items)".dimmed());
        return;
    }

    println!(
        "   {:>4}  {:<24} {:>10} {:>10} {:>12} {:>5} {:>12} {:>14}",
        "SL", "Name", "Height", "Width", "Area (Sq.ft)", "Qty", "Price/Sq.ft", "Total Cost"
    );
    for item in items {
        println!(
            "   {:>4}  {:<24} {:>10} {:>10} {:>12} {:>5} {:>12} {:>14}",
            item.sequence_number,
            item.name,
            format_amount(item.height),
            format_amount(item.width),
            format_amount(item.area),
            item.quantity,
            format_amount(item.price_per_area),
            format_amount(item.total_cost)
        );
        if let Some(note) = &item.note {
            println!("         {}", note.dimmed());
        }
    }
    println!();
}

fn print_totals(totals: &QuotationTotals) {
    println!("   Subtotal:       {:>14}", format_amount(totals.subtotal));
    println!("   GST (18%):      {:>14}", format_amount(totals.tax));
    if totals.transportation_cost > 0.0 {
        println!(
            "   Transportation: {:>14}",
            format_amount(totals.transportation_cost)
        );
    }
    println!(
        "   {} {:>14}\n",
        "Total Amount:  ".bold(),
        format_amount(totals.grand_total).bold()
    );
}
