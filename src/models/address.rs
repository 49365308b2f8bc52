//! IPv4/IPv6 address handle.
//!
//! [`Address`] is a cheap-to-clone handle over shared, immutable
//! [`AddressData`]. Clones share the data; every setter swaps in freshly built
//! data for that handle only, so other clones keep their value.

use super::address_data::{AddressClassification, AddressData};
use super::sockaddr::{AddressFamily, SockAddr};
use bitflags::bitflags;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use std::sync::Arc;

/// Host-order value of `127.0.0.1`.
const LOCAL_HOST_IPV4: u32 = 0x7f00_0001;

/// Network layer protocol of an [`Address`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum LayerProtocol {
    #[default]
    Unknown,
    Ipv4,
    Ipv6,
    /// Dual-stack "any" address.
    AnyIp,
}

impl fmt::Display for LayerProtocol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            LayerProtocol::Unknown => "unknown",
            LayerProtocol::Ipv4 => "ipv4",
            LayerProtocol::Ipv6 => "ipv6",
            LayerProtocol::AnyIp => "any",
        };
        f.write_str(name)
    }
}

/// Well-known addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialAddress {
    /// The null address.
    Empty,
    /// `255.255.255.255`
    Broadcast,
    /// `127.0.0.1`
    LocalHost,
    /// `::1`
    LocalHostIpv6,
    /// Dual-stack any-address, listening on both IPv4 and IPv6.
    Any,
    /// `0.0.0.0`
    AnyIpv4,
    /// `::`
    AnyIpv6,
}

bitflags! {
    /// Cross-representation equivalences honoured by [`Address::is_equal`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Conversion: u8 {
        /// `::ffff:a.b.c.d` equals `a.b.c.d`.
        const CONVERT_V4_MAPPED_TO_IPV4 = 1;
        /// Deprecated `::a.b.c.d` equals `a.b.c.d`.
        const CONVERT_V4_COMPAT_TO_IPV4 = 2;
        /// `0.0.0.0`, `::` and the dual-stack any-address are equal.
        const CONVERT_UNSPECIFIED_ADDRESS = 4;
        /// `127.0.0.1` equals `::1`.
        const CONVERT_LOCAL_HOST = 8;
        const TOLERANT_CONVERSION = 0xff;
    }
}

impl Conversion {
    pub const STRICT_CONVERSION: Conversion = Conversion::empty();

    /// True when every named conversion is enabled, whatever the spare bits hold.
    pub fn is_tolerant(self) -> bool {
        self.contains(
            Conversion::CONVERT_V4_MAPPED_TO_IPV4
                | Conversion::CONVERT_V4_COMPAT_TO_IPV4
                | Conversion::CONVERT_UNSPECIFIED_ADDRESS
                | Conversion::CONVERT_LOCAL_HOST,
        )
    }
}

impl Default for Conversion {
    fn default() -> Self {
        Conversion::TOLERANT_CONVERSION
    }
}

/// Error returned by [`Address::from_str`] for malformed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressParseError {
    input: String,
}

impl fmt::Display for AddressParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid IP address: {:?}", self.input)
    }
}

impl Error for AddressParseError {}

/// An IPv4 or IPv6 address, a dual-stack "any" marker, or null.
#[derive(Clone, Default)]
pub struct Address {
    d: Arc<AddressData>,
}

impl Address {
    /// The null address ([`LayerProtocol::Unknown`]).
    pub fn new() -> Address {
        Address::default()
    }

    /// Build from a host-order IPv4 value.
    pub fn from_ipv4(ipv4: u32) -> Address {
        Address::from_data(AddressData::from_ipv4(ipv4))
    }

    /// Build from 16 network-order IPv6 bytes.
    pub fn from_ipv6_bytes(bytes: [u8; 16]) -> Address {
        Address::from_data(AddressData::from_ipv6(bytes))
    }

    pub fn from_sockaddr(addr: &SockAddr) -> Address {
        let mut address = Address::new();
        address.set_address_sockaddr(addr);
        address
    }

    pub fn from_special(special: SpecialAddress) -> Address {
        Address::from_data(special_data(special))
    }

    fn from_data(data: AddressData) -> Address {
        Address { d: Arc::new(data) }
    }

    pub fn set_address_ipv4(&mut self, ipv4: u32) {
        self.d = Arc::new(AddressData::from_ipv4(ipv4));
    }

    pub fn set_address_ipv6(&mut self, bytes: [u8; 16]) {
        self.d = Arc::new(AddressData::from_ipv6(bytes));
    }

    /// Parse dotted-quad or colon-hex text.
    ///
    /// Returns `false` and leaves the address null when the text is malformed.
    pub fn set_address_str(&mut self, text: &str) -> bool {
        match AddressData::parse(text) {
            Some(data) => {
                self.d = Arc::new(data);
                true
            }
            None => {
                log::debug!("set_address_str: cannot parse {text:?}");
                self.d = Arc::new(AddressData::default());
                false
            }
        }
    }

    /// Set from a raw socket address, branching on its family.
    ///
    /// Unsupported families leave the address null.
    pub fn set_address_sockaddr(&mut self, addr: &SockAddr) {
        let data = match addr.family {
            AddressFamily::Inet => AddressData::from_ipv4(u32::from_be_bytes(addr.inet_bytes())),
            AddressFamily::Inet6 => AddressData::from_ipv6(addr.addr),
            AddressFamily::Other(family) => {
                log::debug!("set_address_sockaddr: unsupported family {family}");
                AddressData::default()
            }
        };
        self.d = Arc::new(data);
    }

    pub fn set_address_special(&mut self, special: SpecialAddress) {
        self.d = Arc::new(special_data(special));
    }

    pub fn swap(&mut self, other: &mut Address) {
        std::mem::swap(&mut self.d, &mut other.d);
    }

    pub fn protocol(&self) -> LayerProtocol {
        self.d.protocol()
    }

    /// The IPv4 value in host order.
    ///
    /// Available for IPv4 addresses and for IPv4-mapped or IPv4-compatible IPv6
    /// addresses; `None` otherwise.
    pub fn to_ipv4_address(&self) -> Option<u32> {
        match self.d.protocol() {
            LayerProtocol::Ipv4 => Some(self.d.ipv4()),
            LayerProtocol::Ipv6 => self.d.embedded_ipv4(),
            LayerProtocol::AnyIp | LayerProtocol::Unknown => None,
        }
    }

    /// The canonical 128-bit form, IPv4 addresses in mapped form.
    pub fn to_ipv6_address(&self) -> [u8; 16] {
        self.d.bytes()
    }

    /// Compare, honouring the equivalences enabled in `mode`.
    ///
    /// Same-protocol addresses compare by value. Across protocols the result is
    /// `false` unless an enabled conversion bridges the two.
    pub fn is_equal(&self, other: &Address, mode: Conversion) -> bool {
        let (a, b) = (&*self.d, &*other.d);
        match (a.protocol(), b.protocol()) {
            (p, q) if p == q => match p {
                LayerProtocol::Ipv4 => a.ipv4() == b.ipv4(),
                LayerProtocol::Ipv6 => a.bytes() == b.bytes(),
                LayerProtocol::AnyIp | LayerProtocol::Unknown => true,
            },
            (LayerProtocol::Ipv4, LayerProtocol::Ipv6) => ipv4_matches_ipv6(a.ipv4(), b, mode),
            (LayerProtocol::Ipv6, LayerProtocol::Ipv4) => ipv4_matches_ipv6(b.ipv4(), a, mode),
            (LayerProtocol::AnyIp, LayerProtocol::Ipv4 | LayerProtocol::Ipv6) => {
                mode.contains(Conversion::CONVERT_UNSPECIFIED_ADDRESS) && b.is_zero()
            }
            (LayerProtocol::Ipv4 | LayerProtocol::Ipv6, LayerProtocol::AnyIp) => {
                mode.contains(Conversion::CONVERT_UNSPECIFIED_ADDRESS) && a.is_zero()
            }
            _ => false,
        }
    }

    pub fn classification(&self) -> AddressClassification {
        self.d.classify()
    }

    pub fn is_null(&self) -> bool {
        self.d.protocol() == LayerProtocol::Unknown
    }

    pub fn is_loopback(&self) -> bool {
        self.classification() == AddressClassification::LoopBack
    }

    /// True for every global-scope kind, private and unique-local ranges included.
    pub fn is_global(&self) -> bool {
        self.classification().is_global_scope()
    }

    pub fn is_link_local(&self) -> bool {
        self.classification() == AddressClassification::LinkLocal
    }

    pub fn is_site_local(&self) -> bool {
        self.classification() == AddressClassification::SiteLocal
    }

    pub fn is_unique_local_unicast(&self) -> bool {
        self.classification() == AddressClassification::UniqueLocal
    }

    pub fn is_multicast(&self) -> bool {
        self.classification() == AddressClassification::Multicast
    }

    /// Only the limited broadcast `255.255.255.255`; subnet-directed broadcasts
    /// need a netmask and are not detected.
    pub fn is_broadcast(&self) -> bool {
        self.classification() == AddressClassification::Broadcast
    }

    pub fn is_private_use(&self) -> bool {
        matches!(
            self.classification(),
            AddressClassification::PrivateNetwork | AddressClassification::UniqueLocal
        )
    }
}

fn special_data(special: SpecialAddress) -> AddressData {
    match special {
        SpecialAddress::Empty => AddressData::default(),
        SpecialAddress::Broadcast => AddressData::from_ipv4(u32::MAX),
        SpecialAddress::LocalHost => AddressData::from_ipv4(LOCAL_HOST_IPV4),
        SpecialAddress::LocalHostIpv6 => AddressData::from_ipv6(Ipv6Addr::LOCALHOST.octets()),
        SpecialAddress::Any => AddressData::any(),
        SpecialAddress::AnyIpv4 => AddressData::from_ipv4(0),
        SpecialAddress::AnyIpv6 => AddressData::from_ipv6([0; 16]),
    }
}

fn ipv4_matches_ipv6(ipv4: u32, v6: &AddressData, mode: Conversion) -> bool {
    (mode.contains(Conversion::CONVERT_V4_MAPPED_TO_IPV4) && v6.mapped_ipv4() == Some(ipv4))
        || (mode.contains(Conversion::CONVERT_V4_COMPAT_TO_IPV4)
            && v6.compat_ipv4() == Some(ipv4))
        || (mode.contains(Conversion::CONVERT_UNSPECIFIED_ADDRESS) && ipv4 == 0 && v6.is_zero())
        || (mode.contains(Conversion::CONVERT_LOCAL_HOST)
            && ipv4 == LOCAL_HOST_IPV4
            && v6.is_ipv6_loopback())
}

impl From<u32> for Address {
    fn from(ipv4: u32) -> Address {
        Address::from_ipv4(ipv4)
    }
}

impl From<SpecialAddress> for Address {
    fn from(special: SpecialAddress) -> Address {
        Address::from_special(special)
    }
}

impl From<&SockAddr> for Address {
    fn from(addr: &SockAddr) -> Address {
        Address::from_sockaddr(addr)
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Address, AddressParseError> {
        AddressData::parse(s)
            .map(Address::from_data)
            .ok_or_else(|| AddressParseError {
                input: s.to_string(),
            })
    }
}

/// Strict equality: same protocol and same bits, no conversions.
impl PartialEq for Address {
    fn eq(&self, other: &Address) -> bool {
        Arc::ptr_eq(&self.d, &other.d) || *self.d == *other.d
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.d.hash(state);
    }
}

impl PartialEq<SpecialAddress> for Address {
    fn eq(&self, other: &SpecialAddress) -> bool {
        *self.d == special_data(*other)
    }
}

impl PartialEq<Address> for SpecialAddress {
    fn eq(&self, other: &Address) -> bool {
        other == self
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.d.protocol() {
            LayerProtocol::Unknown => f.pad(""),
            LayerProtocol::Ipv4 => fmt::Display::fmt(&Ipv4Addr::from(self.d.ipv4()), f),
            LayerProtocol::Ipv6 => fmt::Display::fmt(&Ipv6Addr::from(self.d.bytes()), f),
            LayerProtocol::AnyIp => fmt::Display::fmt(&Ipv6Addr::UNSPECIFIED, f),
        }
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Address")
            .field("protocol", &self.protocol())
            .field("address", &self.to_string())
            .finish()
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Address, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Ok(Address::new());
        }
        Address::from_str(&s).map_err(de::Error::custom)
    }
}
