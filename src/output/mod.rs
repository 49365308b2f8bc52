//! Output formatting for report rows.
//!
//! This module handles writing rows to stdout:
//! - [`csv`] - CSV output formatting
//! - [`terminal`] - Terminal output with colors
//! - JSON through `serde_json`

mod csv;
mod terminal;

pub use csv::{address_csv_row, comparison_csv_row, format_field};
pub use terminal::{classification_label, format_address_row, format_comparison};

use crate::config::OutputFormat;
use crate::processing::{AddressRow, ComparisonRow};
use std::error::Error;

pub fn write_rows(rows: &[AddressRow], format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Csv => csv::print_address_csv(rows),
        OutputFormat::Terminal => terminal::print_address_rows(rows),
        OutputFormat::Json => println!("{}", to_json(rows)?),
    }
    Ok(())
}

pub fn write_comparison(row: &ComparisonRow, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Csv => csv::print_comparison_csv(row),
        OutputFormat::Terminal => terminal::print_comparison(row),
        OutputFormat::Json => println!("{}", to_json(row)?),
    }
    Ok(())
}

/// Pretty JSON for any serializable report value.
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, Box<dyn Error>> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Error serializing JSON: {e}").into())
}
