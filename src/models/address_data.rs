//! Canonical 128-bit address storage and classification.
//!
//! Every address, IPv4 included, is held in a 16-byte big-endian buffer. IPv4
//! content is stored in its IPv4-mapped form (`::ffff:a.b.c.d`), except for
//! `0.0.0.0` which is stored as the all-zero unspecified address `::`.

use super::address::LayerProtocol;
use crate::endian::ByteSwap;
use serde::Serialize;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// Scope classification of an address.
///
/// The numbering groups the "global scope" kinds under bit 16, see
/// [`AddressClassification::is_global_scope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum AddressClassification {
    Unknown = 0,
    LoopBack = 1,
    LocalNet,
    LinkLocal,
    Multicast,
    Broadcast,
    SiteLocal,

    Global = 16,
    TestNetwork,
    PrivateNetwork,
    UniqueLocal,
}

impl AddressClassification {
    const GLOBAL_BIT: u8 = 16;

    /// True for [`Global`](Self::Global) and the kinds numbered after it.
    pub fn is_global_scope(self) -> bool {
        (self as u8) & Self::GLOBAL_BIT != 0
    }
}

impl fmt::Display for AddressClassification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            AddressClassification::Unknown => "unknown",
            AddressClassification::LoopBack => "loopback",
            AddressClassification::LocalNet => "local-net",
            AddressClassification::LinkLocal => "link-local",
            AddressClassification::Multicast => "multicast",
            AddressClassification::Broadcast => "broadcast",
            AddressClassification::SiteLocal => "site-local",
            AddressClassification::Global => "global",
            AddressClassification::TestNetwork => "test-network",
            AddressClassification::PrivateNetwork => "private",
            AddressClassification::UniqueLocal => "unique-local",
        };
        f.write_str(name)
    }
}

/// Big-endian value of the IPv4-mapped prefix word (`0000:ffff`).
const MAPPED_MARKER: u32 = 0x0000_FFFF;

/// Internal state shared by [`Address`](super::Address) handles.
///
/// Never mutated once a handle shares it; every setter on the handle builds a
/// fresh value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub(crate) struct AddressData {
    bytes: [u8; 16],
    /// IPv4 value in host order, 0 when not applicable.
    ipv4: u32,
    protocol: LayerProtocol,
}

impl AddressData {
    pub(crate) fn from_ipv4(ipv4: u32) -> AddressData {
        let mut data = AddressData::default();
        data.set_ipv4(ipv4);
        data
    }

    pub(crate) fn from_ipv6(bytes: [u8; 16]) -> AddressData {
        let mut data = AddressData::default();
        data.set_ipv6(bytes);
        data
    }

    /// The dual-stack "any" marker: all-zero storage tagged [`LayerProtocol::AnyIp`].
    pub(crate) fn any() -> AddressData {
        AddressData {
            protocol: LayerProtocol::AnyIp,
            ..Default::default()
        }
    }

    /// Parse a textual address into fresh data.
    ///
    /// Returns `None` for malformed input, zone-qualified IPv6 included.
    pub(crate) fn parse(text: &str) -> Option<AddressData> {
        let mut data = AddressData::default();
        if data.set_text(text) {
            Some(data)
        } else {
            None
        }
    }

    /// Rebuild from a host-order IPv4 value.
    pub(crate) fn set_ipv4(&mut self, ipv4: u32) {
        self.ipv4 = ipv4;
        self.protocol = LayerProtocol::Ipv4;

        self.set_lane64(0, 0);
        if ipv4 != 0 {
            self.set_lane32(2, MAPPED_MARKER);
            self.set_lane32(3, ipv4);
        } else {
            // "any" stays the unspecified address, not ::ffff:0.0.0.0
            self.set_lane64(1, 0);
        }
    }

    /// Rebuild from 16 network-order bytes.
    pub(crate) fn set_ipv6(&mut self, bytes: [u8; 16]) {
        self.bytes = bytes;
        self.protocol = LayerProtocol::Ipv6;
        self.ipv4 = self.embedded_ipv4().unwrap_or(0);
    }

    /// Rebuild from dotted-quad or colon-hex text.
    ///
    /// On failure the data is cleared to the Unknown state and `false` returned.
    pub(crate) fn set_text(&mut self, text: &str) -> bool {
        match IpAddr::from_str(text.trim()) {
            Ok(IpAddr::V4(v4)) => {
                self.set_ipv4(u32::from(v4));
                true
            }
            Ok(IpAddr::V6(v6)) => {
                self.set_ipv6(v6.octets());
                true
            }
            Err(e) => {
                log::trace!("set_text({text:?}) rejected: {e}");
                self.clear();
                false
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = AddressData::default();
    }

    pub(crate) fn protocol(&self) -> LayerProtocol {
        self.protocol
    }

    pub(crate) fn ipv4(&self) -> u32 {
        self.ipv4
    }

    pub(crate) fn bytes(&self) -> [u8; 16] {
        self.bytes
    }

    fn lane32(&self, index: usize) -> u32 {
        u32::read_be(&self.bytes[index * 4..])
    }

    fn lane64(&self, index: usize) -> u64 {
        u64::read_be(&self.bytes[index * 8..])
    }

    fn set_lane32(&mut self, index: usize, value: u32) {
        value.write_be(&mut self.bytes[index * 4..]);
    }

    fn set_lane64(&mut self, index: usize, value: u64) {
        value.write_be(&mut self.bytes[index * 8..]);
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.lane64(0) == 0 && self.lane64(1) == 0
    }

    pub(crate) fn is_ipv6_loopback(&self) -> bool {
        self.lane64(0) == 0 && self.lane64(1) == 1
    }

    /// Low 32 bits of an IPv4-mapped (`::ffff:a.b.c.d`) value.
    pub(crate) fn mapped_ipv4(&self) -> Option<u32> {
        if self.lane64(0) == 0 && self.lane32(2) == MAPPED_MARKER {
            Some(self.lane32(3))
        } else {
            None
        }
    }

    /// Low 32 bits of an IPv4-compatible (`::a.b.c.d`) value.
    ///
    /// `::` and `::1` are not IPv4-compatible.
    pub(crate) fn compat_ipv4(&self) -> Option<u32> {
        if self.lane64(0) == 0 && self.lane32(2) == 0 && self.lane32(3) > 1 {
            Some(self.lane32(3))
        } else {
            None
        }
    }

    pub(crate) fn embedded_ipv4(&self) -> Option<u32> {
        self.mapped_ipv4().or_else(|| self.compat_ipv4())
    }

    /// Classify from the stored 128 bits; the IPv4 cache is not consulted.
    pub(crate) fn classify(&self) -> AddressClassification {
        if let Some(v4) = self.mapped_ipv4() {
            return classify_ipv4(v4);
        }
        if self.lane64(0) != 0 {
            return classify_ipv6(self.lane32(0));
        }

        match self.lane64(1) {
            1 => AddressClassification::LoopBack,
            0 if self.protocol == LayerProtocol::Unknown => AddressClassification::Unknown,
            // only :: and 0.0.0.0 remain
            0 => AddressClassification::LocalNet,
            _ => AddressClassification::Unknown,
        }
    }
}

fn in_block(value: u32, network: u32, len: u32) -> bool {
    let mask = u32::MAX.checked_shl(32 - len).unwrap_or(0);
    value & mask == network
}

fn classify_ipv4(a: u32) -> AddressClassification {
    if in_block(a, 0x7f00_0000, 8) {
        return AddressClassification::LoopBack;
    }
    if in_block(a, 0xe000_0000, 4) {
        return AddressClassification::Multicast;
    }
    if in_block(a, 0xa9fe_0000, 16) {
        return AddressClassification::LinkLocal;
    }
    if in_block(a, 0, 8) {
        return AddressClassification::LocalNet;
    }
    if in_block(a, 0xf000_0000, 4) {
        if a == u32::MAX {
            return AddressClassification::Broadcast;
        }
        return AddressClassification::Unknown;
    }
    if in_block(a, 0x0a00_0000, 8) || in_block(a, 0xac10_0000, 12) || in_block(a, 0xc0a8_0000, 16)
    {
        return AddressClassification::PrivateNetwork;
    }
    if in_block(a, 0xc000_0200, 24) || in_block(a, 0xc633_6400, 24) || in_block(a, 0xcb00_7100, 24)
    {
        return AddressClassification::TestNetwork;
    }
    AddressClassification::Global
}

/// Classify a non-mapped IPv6 address from its first 32 bits.
fn classify_ipv6(high: u32) -> AddressClassification {
    if in_block(high, 0xff00_0000, 8) {
        return AddressClassification::Multicast;
    }
    if in_block(high, 0xfe80_0000, 10) {
        return AddressClassification::LinkLocal;
    }
    if in_block(high, 0xfec0_0000, 10) {
        return AddressClassification::SiteLocal;
    }
    if in_block(high, 0xfc00_0000, 7) {
        return AddressClassification::UniqueLocal;
    }
    if high == 0x2001_0db8 {
        return AddressClassification::TestNetwork;
    }
    if in_block(high, 0x2000_0000, 3) {
        return AddressClassification::Global;
    }
    AddressClassification::Unknown
}
