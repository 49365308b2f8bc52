//! Address record files.
//!
//! A record file is a JSON array of `{ "name", "address", "prefix"? }` objects.

use crate::models::Address;
use serde::Deserialize;
use std::error::Error;
use std::path::Path;

/// A named address read from a record file.
#[derive(Deserialize, Debug, Clone)]
pub struct AddressRecord {
    pub name: String,
    pub address: Address,
    /// Prefix length, validated against the address protocol when processed.
    #[serde(default)]
    pub prefix: Option<i32>,
}

/// Read address records from a JSON file.
///
/// # Returns
/// * `Ok(Vec<AddressRecord>)` - The records in file order
/// * `Err` - If the file is missing or a record fails to parse (the error names its JSON path)
pub fn read_address_file(file: &str) -> Result<Vec<AddressRecord>, Box<dyn Error>> {
    if !Path::new(file).exists() {
        return Err(format!("Address file does not exist: {file}").into());
    }
    log::info!("Reading address file: {file}");

    let json = std::fs::read_to_string(file)
        .map_err(|e| format!("Error reading address file {file}: {e}"))?;
    parse_address_records(&json).map_err(|e| format!("{file}: {e}").into())
}

/// Parse address records from JSON text.
pub fn parse_address_records(json: &str) -> Result<Vec<AddressRecord>, Box<dyn Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let records: Vec<AddressRecord> = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("Error parsing address records: path={} error={}", e.path(), e))?;
    log::debug!("Parsed {} address records", records.len());
    Ok(records)
}
