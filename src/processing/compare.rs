//! Address comparison under conversion modes.

use super::report::AddressRow;
use crate::config::describe_conversion;
use crate::models::{Address, Conversion};
use serde::Serialize;

/// Outcome of comparing two addresses.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub left: Address,
    pub right: Address,
    /// Strict `==`: same protocol and same bits.
    pub strict: bool,
    /// Name of the configured mode.
    pub mode: String,
    /// `is_equal` under the configured mode.
    pub equal: bool,
    pub v4_mapped: bool,
    pub v4_compat: bool,
    pub unspecified: bool,
    pub local_host: bool,
}

/// Compare two textual addresses; malformed text compares as the null address.
pub fn compare(left: &str, right: &str, mode: Conversion) -> ComparisonRow {
    let mut a = Address::new();
    let mut b = Address::new();
    if !a.set_address_str(left) {
        log::warn!("Invalid address {left:?}");
    }
    if !b.set_address_str(right) {
        log::warn!("Invalid address {right:?}");
    }

    ComparisonRow {
        strict: a == b,
        mode: describe_conversion(mode),
        equal: a.is_equal(&b, mode),
        v4_mapped: a.is_equal(&b, Conversion::CONVERT_V4_MAPPED_TO_IPV4),
        v4_compat: a.is_equal(&b, Conversion::CONVERT_V4_COMPAT_TO_IPV4),
        unspecified: a.is_equal(&b, Conversion::CONVERT_UNSPECIFIED_ADDRESS),
        local_host: a.is_equal(&b, Conversion::CONVERT_LOCAL_HOST),
        left: a,
        right: b,
    }
}

/// Index pairs of rows whose addresses are equal under `mode`.
///
/// Null addresses are skipped.
pub fn find_equivalent_rows(rows: &[AddressRow], mode: Conversion) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, a) in rows.iter().enumerate() {
        if a.address.is_null() {
            continue;
        }
        for (j, b) in rows.iter().enumerate().skip(i + 1) {
            if a.address.is_equal(&b.address, mode) {
                log::debug!("{} and {} refer to the same address", a.name, b.name);
                pairs.push((i, j));
            }
        }
    }
    pairs
}
