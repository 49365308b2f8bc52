//! Integration tests for netaddr
//!
//! These tests exercise the public address API and the report workflow from
//! record file to output rows.

use clap::Parser;
use netaddr::config::{Args, Config, OutputFormat};
use netaddr::models::{
    Address, AddressClassification, Conversion, LayerProtocol, Netmask, SockAddr, SpecialAddress,
};
use netaddr::output::{address_csv_row, to_json};
use netaddr::processing::find_equivalent_rows;
use netaddr::{collect_rows, run};
use std::net::SocketAddr;

fn addr(text: &str) -> Address {
    text.parse().expect("Failed to parse test address")
}

#[test]
fn test_ipv4_any_equals_unspecified() {
    let any4 = Address::from_ipv4(0);
    let any6 = addr("::");
    assert_eq!(any4.to_ipv6_address(), any6.to_ipv6_address());
    assert!(any4.is_equal(&any6, Conversion::CONVERT_UNSPECIFIED_ADDRESS));
    assert!(!any4.is_equal(&any6, Conversion::STRICT_CONVERSION));
    assert_ne!(any4, any6);
}

#[test]
fn test_localhost_and_mapped_equality() {
    let local4 = Address::from_ipv4(0x7f00_0001);
    assert_eq!(local4.to_string(), "127.0.0.1");
    assert_eq!(local4.classification(), AddressClassification::LoopBack);
    assert!(local4.is_equal(&addr("::1"), Conversion::CONVERT_LOCAL_HOST));
    assert!(!local4.is_equal(&addr("::1"), Conversion::STRICT_CONVERSION));

    let mapped = addr("::ffff:192.168.1.1");
    let v4 = Address::from_ipv4(0xC0A8_0101);
    assert!(mapped.is_equal(&v4, Conversion::CONVERT_V4_MAPPED_TO_IPV4));
    assert!(mapped != v4);
}

#[test]
fn test_classification_partition() {
    assert_eq!(addr("224.0.0.1").classification(), AddressClassification::Multicast);
    assert_eq!(addr("169.254.1.1").classification(), AddressClassification::LinkLocal);
    assert_eq!(
        addr("255.255.255.255").classification(),
        AddressClassification::Broadcast
    );
    assert_eq!(addr("8.8.8.8").classification(), AddressClassification::Global);
    assert_eq!(addr("fc00::1").classification(), AddressClassification::UniqueLocal);
}

#[test]
fn test_netmask_round_trip_ipv4() {
    for p in 0..=32 {
        let mut mask = Netmask::new();
        mask.set_prefix_length(LayerProtocol::Ipv4, p);
        let address = mask.address(LayerProtocol::Ipv4);
        let expected = if p == 0 { 0 } else { u32::MAX << (32 - p) };
        assert_eq!(address.to_ipv4_address(), Some(expected));

        let mut back = Netmask::new();
        assert!(back.set_address(&address));
        assert_eq!(back.prefix_length(), p);
    }

    let mut mask = Netmask::new();
    mask.set_prefix_length(LayerProtocol::Ipv4, 33);
    assert_eq!(mask.prefix_length(), -1);
    mask.set_prefix_length(LayerProtocol::Ipv4, -1);
    assert_eq!(mask.prefix_length(), -1);
}

#[test]
fn test_copy_then_mutate_keeps_original() {
    let original = addr("fe80::abcd");
    let mut copy = original.clone();
    copy.set_address_ipv4(0x0a00_0001);
    assert_eq!(original.to_string(), "fe80::abcd");
    assert_eq!(copy.to_string(), "10.0.0.1");
}

#[test]
fn test_sockaddr_and_special() {
    let sa: SocketAddr = "[2001:db8::5]:443".parse().unwrap();
    let address = Address::from(&SockAddr::from(sa));
    assert_eq!(address.to_string(), "2001:db8::5");
    assert_eq!(address.classification(), AddressClassification::TestNetwork);

    let sa: SocketAddr = "127.0.0.1:80".parse().unwrap();
    assert!(Address::from(&SockAddr::from(sa)) == SpecialAddress::LocalHost);
}

#[test]
fn test_workflow_with_record_file() {
    let args = Args::try_parse_from([
        "netaddr",
        "--file",
        "src/tests/test_data/addresses_01.json",
        "10.0.0.1/255.255.255.0",
    ])
    .expect("Failed to parse args");

    let rows = collect_rows(&args).expect("Failed to collect rows");
    assert_eq!(rows.len(), 13, "12 records plus one input");

    let classes: Vec<AddressClassification> = rows.iter().map(|r| r.classification).collect();
    assert_eq!(
        classes,
        vec![
            AddressClassification::LoopBack,
            AddressClassification::LoopBack,
            AddressClassification::PrivateNetwork,
            AddressClassification::PrivateNetwork,
            AddressClassification::Global,
            AddressClassification::Multicast,
            AddressClassification::Broadcast,
            AddressClassification::LinkLocal,
            AddressClassification::UniqueLocal,
            AddressClassification::TestNetwork,
            AddressClassification::LocalNet,
            AddressClassification::LocalNet,
            AddressClassification::PrivateNetwork,
        ]
    );
    assert_eq!(rows[12].name, "arg1");
    assert_eq!(rows[12].prefix_length, 24);
    assert_eq!(rows[10].netmask.to_string(), "0.0.0.0");

    // loopback/loopback-v6, gateway/gateway-mapped, any/any-v6
    let pairs = find_equivalent_rows(&rows, Conversion::TOLERANT_CONVERSION);
    assert_eq!(pairs, vec![(0, 1), (2, 3), (10, 11)]);
    assert!(find_equivalent_rows(&rows, Conversion::STRICT_CONVERSION).is_empty());

    let csv = address_csv_row(&rows[2]);
    assert!(csv.contains("\"255.255.255.0\""));
    let json = to_json(&rows).expect("Failed to serialize rows");
    assert!(json.contains("\"name\": \"ula\""));
}

#[test]
fn test_run_requires_work() {
    let args = Args::try_parse_from(["netaddr"]).unwrap();
    assert!(run(&args, &Config::default()).is_err());
}

#[test]
fn test_run_missing_file_fails() {
    let args = Args::try_parse_from(["netaddr", "--file", "no/such/file.json"]).unwrap();
    let config = Config {
        output: OutputFormat::Json,
        ..Config::default()
    };
    let err = run(&args, &config).unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}
