//! Address value types.
//!
//! This module contains the core data structures of the crate:
//! - [`Address`] - IPv4/IPv6 address handle with classification and tolerant comparison
//! - [`Netmask`] - prefix-length netmask
//! - [`SockAddr`] - raw socket-address input

mod address;
mod address_data;
mod netmask;
mod sockaddr;

// Re-export public types
pub use address::{Address, AddressParseError, Conversion, LayerProtocol, SpecialAddress};
pub use address_data::AddressClassification;
pub use netmask::{ipv4_mask, ipv6_mask, Netmask, MAX_LENGTH_IPV4, MAX_LENGTH_IPV6};
pub use sockaddr::{AddressFamily, SockAddr};
