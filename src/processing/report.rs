//! Address report rows.
//!
//! Turns textual input (`addr`, `addr/len`, `addr/mask`) or file records into
//! [`AddressRow`]s for output.

use super::records::AddressRecord;
use crate::models::{Address, AddressClassification, LayerProtocol, Netmask};
use regex::Regex;
use serde::Serialize;
use std::net::Ipv4Addr;
use std::sync::OnceLock;

/// Regex splitting `address[/suffix]`, the suffix being a length or a mask.
static INPUT_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_input_regex() -> &'static Regex {
    INPUT_REGEX.get_or_init(|| {
        Regex::new(r"^\s*([^/\s]+)\s*(?:/\s*([^/\s]+))?\s*$").expect("Invalid Regex")
    })
}

/// Represents one analysed address for output.
#[derive(Debug, Clone, Serialize)]
pub struct AddressRow {
    /// Record name, or the position of a command-line input.
    pub name: String,
    /// Text as given.
    pub input: String,
    pub address: Address,
    pub protocol: LayerProtocol,
    pub classification: AddressClassification,
    /// Dotted-quad IPv4 form when one exists (IPv4, mapped or compatible).
    pub ipv4: Option<String>,
    /// Prefix length, -1 when none was given or it was invalid.
    pub prefix_length: i32,
    /// Netmask address derived from the prefix length.
    pub netmask: Address,
}

impl AddressRow {
    fn new(name: String, input: &str, address: Address, netmask: Netmask) -> AddressRow {
        AddressRow {
            name,
            input: input.to_string(),
            protocol: address.protocol(),
            classification: address.classification(),
            ipv4: address.to_ipv4_address().map(|v4| Ipv4Addr::from(v4).to_string()),
            prefix_length: netmask.prefix_length(),
            netmask: netmask.address(address.protocol()),
            address,
        }
    }
}

/// Split `input` into address text and optional suffix.
fn split_input(input: &str) -> Option<(&str, Option<&str>)> {
    let caps = get_input_regex().captures(input)?;
    let addr = caps.get(1)?.as_str();
    Some((addr, caps.get(2).map(|m| m.as_str())))
}

/// Netmask from a `/suffix`: a prefix length, or a contiguous mask address.
fn parse_netmask(suffix: &str, protocol: LayerProtocol) -> Netmask {
    let mut netmask = Netmask::new();
    if suffix.bytes().all(|b| b.is_ascii_digit()) {
        let len = suffix.parse::<i32>().unwrap_or(-1);
        netmask.set_prefix_length(protocol, len);
        if !netmask.is_set() {
            log::warn!("Prefix length /{suffix} is invalid for {protocol}");
        }
    } else {
        let mut mask = Address::new();
        if !mask.set_address_str(suffix) || !netmask.set_address(&mask) {
            log::warn!("Netmask {suffix} is not a contiguous prefix");
        }
    }
    netmask
}

/// Analyse one textual input; malformed text gives a null-address row.
pub fn process_input(index: usize, input: &str) -> AddressRow {
    let (addr_text, suffix) = split_input(input).unwrap_or((input, None));

    let mut address = Address::new();
    if !address.set_address_str(addr_text) {
        log::warn!("Invalid address {input:?}");
    }
    log::debug!("process_input({input}) -> {address:?}");

    let netmask = suffix
        .map(|s| parse_netmask(s, address.protocol()))
        .unwrap_or_default();

    AddressRow::new(format!("arg{}", index + 1), input, address, netmask)
}

/// Analyse a record read from an address file.
pub fn process_record(record: &AddressRecord) -> AddressRow {
    let protocol = record.address.protocol();
    let netmask = record
        .prefix
        .map(|len| Netmask::with_prefix_length(protocol, len))
        .unwrap_or_default();
    if record.prefix.is_some() && !netmask.is_set() {
        log::warn!(
            "Record {}: prefix {:?} is invalid for {protocol}",
            record.name,
            record.prefix
        );
    }

    AddressRow::new(
        record.name.clone(),
        &record.address.to_string(),
        record.address.clone(),
        netmask,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_input() {
        assert_eq!(split_input("10.0.0.1"), Some(("10.0.0.1", None)));
        assert_eq!(split_input(" 10.0.0.1/24 "), Some(("10.0.0.1", Some("24"))));
        assert_eq!(
            split_input("10.0.0.1 / 255.255.0.0"),
            Some(("10.0.0.1", Some("255.255.0.0")))
        );
        assert_eq!(split_input("fe80::1/64"), Some(("fe80::1", Some("64"))));
        assert_eq!(split_input("1/2/3"), None);
        assert_eq!(split_input(""), None);
    }

    #[test]
    fn test_process_input_ipv4_prefix() {
        let row = process_input(0, "192.168.1.10/24");
        assert_eq!(row.name, "arg1");
        assert_eq!(row.address.to_string(), "192.168.1.10");
        assert_eq!(row.protocol, LayerProtocol::Ipv4);
        assert_eq!(row.classification, AddressClassification::PrivateNetwork);
        assert_eq!(row.ipv4.as_deref(), Some("192.168.1.10"));
        assert_eq!(row.prefix_length, 24);
        assert_eq!(row.netmask.to_string(), "255.255.255.0");
    }

    #[test]
    fn test_process_input_mask_suffix() {
        let row = process_input(1, "10.1.2.3/255.255.240.0");
        assert_eq!(row.prefix_length, 20);
        assert_eq!(row.netmask.to_string(), "255.255.240.0");

        let bad = process_input(2, "10.1.2.3/255.0.255.0");
        assert_eq!(bad.prefix_length, -1);
        assert!(bad.netmask.is_null());
    }

    #[test]
    fn test_process_input_ipv6() {
        let row = process_input(0, "fe80::1/64");
        assert_eq!(row.protocol, LayerProtocol::Ipv6);
        assert_eq!(row.classification, AddressClassification::LinkLocal);
        assert_eq!(row.ipv4, None);
        assert_eq!(row.netmask.to_string(), "ffff:ffff:ffff:ffff::");

        let mapped = process_input(0, "::ffff:8.8.8.8");
        assert_eq!(mapped.ipv4.as_deref(), Some("8.8.8.8"));
        assert_eq!(mapped.classification, AddressClassification::Global);
    }

    #[test]
    fn test_process_input_out_of_range_prefix() {
        let row = process_input(0, "10.0.0.1/33");
        assert_eq!(row.prefix_length, -1);
        let row = process_input(0, "10.0.0.1/99999999999");
        assert_eq!(row.prefix_length, -1);
    }

    #[test]
    fn test_process_input_invalid() {
        let row = process_input(4, "not-an-address");
        assert_eq!(row.name, "arg5");
        assert!(row.address.is_null());
        assert_eq!(row.protocol, LayerProtocol::Unknown);
        assert_eq!(row.classification, AddressClassification::Unknown);
        assert_eq!(row.prefix_length, -1);
    }

    #[test]
    fn test_process_record() {
        let record = AddressRecord {
            name: "gateway".to_string(),
            address: "10.0.0.1".parse().unwrap(),
            prefix: Some(16),
        };
        let row = process_record(&record);
        assert_eq!(row.name, "gateway");
        assert_eq!(row.input, "10.0.0.1");
        assert_eq!(row.netmask.to_string(), "255.255.0.0");

        let record = AddressRecord {
            prefix: Some(64),
            ..record
        };
        assert_eq!(process_record(&record).prefix_length, -1);
    }
}
