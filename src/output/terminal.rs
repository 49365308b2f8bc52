//! Terminal output with colors.

use crate::models::AddressClassification;
use crate::processing::{AddressRow, ComparisonRow};
use colored::{ColoredString, Colorize};

/// Left-align `value` to `width` columns.
fn pad(value: &str, width: usize) -> String {
    format!("{value:<width$}")
}

/// Color a classification label by scope.
pub fn classification_label(class: AddressClassification) -> ColoredString {
    let label = pad(&class.to_string(), 14);
    match class {
        AddressClassification::Unknown => label.red(),
        AddressClassification::Global => label.green(),
        AddressClassification::Broadcast | AddressClassification::Multicast => label.magenta(),
        AddressClassification::PrivateNetwork | AddressClassification::UniqueLocal => label.cyan(),
        _ => label.yellow(),
    }
}

/// One terminal line for an [`AddressRow`].
pub fn format_address_row(row: &AddressRow, colorize: bool) -> String {
    let class = if colorize {
        classification_label(row.classification).to_string()
    } else {
        pad(&row.classification.to_string(), 14)
    };
    let netmask = if row.prefix_length >= 0 {
        format!("/{} ({})", row.prefix_length, row.netmask)
    } else {
        String::new()
    };
    format!(
        "{name} {address} {protocol} {class} {ipv4}{netmask}",
        name = pad(&row.name, 16),
        address = pad(&row.address.to_string(), 40),
        protocol = pad(&row.protocol.to_string(), 8),
        ipv4 = pad(row.ipv4.as_deref().unwrap_or("-"), 16),
    )
    .trim_end()
    .to_string()
}

fn yes_no(value: bool, colorize: bool) -> String {
    match (value, colorize) {
        (true, true) => "yes".green().to_string(),
        (false, true) => "no".red().to_string(),
        (true, false) => "yes".to_string(),
        (false, false) => "no".to_string(),
    }
}

/// Terminal lines for a [`ComparisonRow`].
pub fn format_comparison(row: &ComparisonRow, colorize: bool) -> Vec<String> {
    vec![
        format!("compare {} <-> {}", row.left, row.right),
        format!("  strict ==         {}", yes_no(row.strict, colorize)),
        format!("  equal ({})  {}", row.mode, yes_no(row.equal, colorize)),
        format!("  v4mapped          {}", yes_no(row.v4_mapped, colorize)),
        format!("  v4compat          {}", yes_no(row.v4_compat, colorize)),
        format!("  unspecified       {}", yes_no(row.unspecified, colorize)),
        format!("  localhost         {}", yes_no(row.local_host, colorize)),
    ]
}

pub fn print_address_rows(rows: &[AddressRow]) {
    for row in rows {
        println!("{}", format_address_row(row, true));
    }
}

pub fn print_comparison(row: &ComparisonRow) {
    for line in format_comparison(row, true) {
        println!("{line}");
    }
}
