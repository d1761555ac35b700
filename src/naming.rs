//! Output filenames: `Quotation_<Project_Or_Customer>_<YYYY-MM-DD>.<ext>`

use crate::types::CustomerDetails;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

fn whitespace_runs() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("static pattern"))
}

/// Filename for an exported quotation.
///
/// Uses the project name, falling back to the customer name; each run of
/// whitespace becomes a single underscore.
pub fn output_filename(customer: &CustomerDetails, date: NaiveDate, extension: &str) -> String {
    let subject = [&customer.project_name, &customer.name]
        .into_iter()
        .find(|s| !s.trim().is_empty());

    let date = date.format("%Y-%m-%d");
    match subject {
        Some(subject) => format!(
            "Quotation_{}_{}.{}",
            whitespace_runs().replace_all(subject.trim(), "_"),
            date,
            extension
        ),
        None => format!("Quotation_{}.{}", date, extension),
    }
}
