//! Prefix-length netmask.
//!
//! A [`Netmask`] stores only the prefix length. It converts to and from the
//! contiguous-prefix mask [`Address`] for IPv4 (32 bits) or IPv6 (128 bits).

use super::address::{Address, LayerProtocol};
use std::fmt;

/// Stored length meaning "no prefix configured".
const UNSET: u8 = 255;

/// Maximum length for an IPv4 netmask (32 bits).
pub const MAX_LENGTH_IPV4: u8 = 32;
/// Maximum length for an IPv6 netmask (128 bits).
pub const MAX_LENGTH_IPV6: u8 = 128;

fn max_length(protocol: LayerProtocol) -> Option<u8> {
    match protocol {
        LayerProtocol::Ipv4 => Some(MAX_LENGTH_IPV4),
        LayerProtocol::Ipv6 => Some(MAX_LENGTH_IPV6),
        LayerProtocol::AnyIp | LayerProtocol::Unknown => None,
    }
}

/// Convert a prefix length to an IPv4 mask as u32.
///
/// # Examples
/// ```
/// use netaddr::models::ipv4_mask;
/// assert_eq!(ipv4_mask(24), 0xFFFFFF00);
/// ```
pub fn ipv4_mask(len: u8) -> u32 {
    u32::MAX
        .checked_shl(u32::from(MAX_LENGTH_IPV4.saturating_sub(len)))
        .unwrap_or(0)
}

/// Convert a prefix length to an IPv6 mask as u128.
pub fn ipv6_mask(len: u8) -> u128 {
    u128::MAX
        .checked_shl(u32::from(MAX_LENGTH_IPV6.saturating_sub(len)))
        .unwrap_or(0)
}

/// Number of leading one-bits of a contiguous mask, `None` if a one follows a zero.
fn contiguous_prefix(bits: u128, width: u32) -> Option<u8> {
    let ones = bits.leading_ones();
    let rest = bits.checked_shl(ones).unwrap_or(0);
    if rest != 0 || ones > width {
        return None;
    }
    Some(ones as u8)
}

/// Network prefix length, or unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Netmask {
    length: u8,
}

impl Default for Netmask {
    fn default() -> Self {
        Netmask { length: UNSET }
    }
}

impl Netmask {
    /// An unset netmask.
    pub fn new() -> Netmask {
        Netmask::default()
    }

    /// Netmask with `len` validated against `protocol`; unset when out of range.
    pub fn with_prefix_length(protocol: LayerProtocol, len: i32) -> Netmask {
        let mut mask = Netmask::new();
        mask.set_prefix_length(protocol, len);
        mask
    }

    /// Prefix length, or -1 when unset.
    pub fn prefix_length(&self) -> i32 {
        if self.length == UNSET {
            -1
        } else {
            i32::from(self.length)
        }
    }

    pub fn is_set(&self) -> bool {
        self.length != UNSET
    }

    /// Store `len` if it is within 0..=32 (IPv4) or 0..=128 (IPv6).
    ///
    /// Anything else, an unknown protocol included, silently leaves the
    /// netmask unset.
    pub fn set_prefix_length(&mut self, protocol: LayerProtocol, len: i32) {
        self.length = match max_length(protocol) {
            Some(max) if (0..=i32::from(max)).contains(&len) => len as u8,
            _ => UNSET,
        };
    }

    /// Derive the prefix length from a contiguous mask such as `255.255.255.0`.
    ///
    /// Returns `false` and leaves the netmask unset if the address is null, not
    /// IPv4/IPv6, or not a contiguous run of leading ones.
    pub fn set_address(&mut self, mask: &Address) -> bool {
        self.length = UNSET;

        let prefix = match mask.protocol() {
            LayerProtocol::Ipv4 => mask
                .to_ipv4_address()
                .and_then(|v4| contiguous_prefix(u128::from(v4) << 96, 32)),
            LayerProtocol::Ipv6 => {
                contiguous_prefix(u128::from_be_bytes(mask.to_ipv6_address()), 128)
            }
            LayerProtocol::AnyIp | LayerProtocol::Unknown => None,
        };

        match prefix {
            Some(len) => {
                self.length = len;
                true
            }
            None => {
                log::debug!("Netmask::set_address: {mask} is not a contiguous prefix");
                false
            }
        }
    }

    /// The mask address for `protocol`: leading `prefix_length` bits set.
    ///
    /// Null when unset, when `protocol` is not IPv4/IPv6, or when the stored
    /// length does not fit the protocol.
    pub fn address(&self, protocol: LayerProtocol) -> Address {
        match max_length(protocol) {
            Some(max) if self.length <= max => {}
            _ => return Address::new(),
        }
        match protocol {
            LayerProtocol::Ipv4 => Address::from_ipv4(ipv4_mask(self.length)),
            _ => Address::from_ipv6_bytes(ipv6_mask(self.length).to_be_bytes()),
        }
    }
}

impl fmt::Display for Netmask {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_set() {
            write!(f, "/{}", self.length)
        } else {
            f.pad("")
        }
    }
}
