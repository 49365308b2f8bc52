//! CSV output formatting for report rows.

use crate::processing::{AddressRow, ComparisonRow};

/// Quote a CSV field, doubling embedded quotes.
fn escape_csv_field(input: &str) -> String {
    format!("\"{}\"", input.replace('"', "\"\""))
}

/// Quote a field and right-align it to `width` (excel accepts the padding before the quote).
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let quoted = escape_csv_field(&value.to_string());
    format!("{quoted:>width$}")
}

pub const ADDRESS_HEADER: &str = r#""name","input","address","protocol","class","ipv4","prefix","netmask""#;

pub const COMPARISON_HEADER: &str = r#""left","right","strict","mode","equal","v4mapped","v4compat","unspecified","localhost""#;

/// One CSV line for an [`AddressRow`].
pub fn address_csv_row(row: &AddressRow) -> String {
    [
        format_field(&row.name, 12),
        format_field(&row.input, 24),
        format_field(&row.address, 24),
        format_field(row.protocol, 8),
        format_field(row.classification, 14),
        format_field(row.ipv4.as_deref().unwrap_or("None"), 17),
        format_field(row.prefix_length, 6),
        format_field(&row.netmask, 24),
    ]
    .join(",")
}

/// One CSV line for a [`ComparisonRow`].
pub fn comparison_csv_row(row: &ComparisonRow) -> String {
    [
        format_field(&row.left, 0),
        format_field(&row.right, 0),
        format_field(row.strict, 0),
        format_field(&row.mode, 0),
        format_field(row.equal, 0),
        format_field(row.v4_mapped, 0),
        format_field(row.v4_compat, 0),
        format_field(row.unspecified, 0),
        format_field(row.local_host, 0),
    ]
    .join(",")
}

/// Print address rows as CSV to stdout.
pub fn print_address_csv(rows: &[AddressRow]) {
    log::info!("# CSV output, {} rows", rows.len());
    println!("{ADDRESS_HEADER}");
    for row in rows {
        println!("{}", address_csv_row(row));
    }
}

pub fn print_comparison_csv(row: &ComparisonRow) {
    println!("{COMPARISON_HEADER}");
    println!("{}", comparison_csv_row(row));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Conversion;
    use crate::processing::{compare, process_input};

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 10), "    \"test\"");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "\"long_value\"");
    }

    #[test]
    fn test_format_field_escapes_quotes() {
        assert_eq!(format_field("a\"b", 0), "\"a\"\"b\"");
    }

    #[test]
    fn test_address_csv_row() {
        let row = process_input(0, "10.0.0.1/8");
        let line = address_csv_row(&row);
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        assert_eq!(
            fields,
            vec![
                "\"arg1\"",
                "\"10.0.0.1/8\"",
                "\"10.0.0.1\"",
                "\"ipv4\"",
                "\"private\"",
                "\"10.0.0.1\"",
                "\"8\"",
                "\"255.0.0.0\""
            ]
        );
    }

    #[test]
    fn test_address_csv_row_null() {
        let row = process_input(0, "garbage");
        let line = address_csv_row(&row);
        assert!(line.contains("\"unknown\""));
        assert!(line.contains("\"None\""));
        assert!(line.contains("\"-1\""));
    }

    #[test]
    fn test_comparison_csv_row() {
        let row = compare("0.0.0.0", "::", Conversion::CONVERT_UNSPECIFIED_ADDRESS);
        assert_eq!(
            comparison_csv_row(&row),
            r#""0.0.0.0","::","false","unspecified","true","false","false","true","false""#
        );
    }
}
