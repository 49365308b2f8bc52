//! Address report processing.
//!
//! This module turns inputs into report rows:
//! - [`report`] - analysis of single addresses with optional netmask
//! - [`records`] - JSON address record files
//! - [`compare`] - comparison under conversion modes

mod compare;
mod records;
mod report;

// Re-export public functions
pub use compare::{compare, find_equivalent_rows, ComparisonRow};
pub use records::{parse_address_records, read_address_file, AddressRecord};
pub use report::{process_input, process_record, AddressRow};
