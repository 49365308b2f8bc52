//! Platform-neutral socket-address structure.

use std::net::SocketAddr;

/// Address family tag carried by a [`SockAddr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    Inet,
    Inet6,
    /// Any other family (e.g. a local socket); yields the null address.
    Other(u16),
}

/// Raw socket address: family tag plus 4 (IPv4) or 16 (IPv6) bytes in network order.
///
/// For [`AddressFamily::Inet`] only `addr[..4]` is meaningful. The IPv6 scope id
/// is carried through unvalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SockAddr {
    pub family: AddressFamily,
    pub addr: [u8; 16],
    pub port: u16,
    pub scope_id: u32,
}

impl SockAddr {
    pub fn inet(addr: [u8; 4], port: u16) -> SockAddr {
        let mut bytes = [0u8; 16];
        bytes[..4].copy_from_slice(&addr);
        SockAddr {
            family: AddressFamily::Inet,
            addr: bytes,
            port,
            scope_id: 0,
        }
    }

    pub fn inet6(addr: [u8; 16], port: u16, scope_id: u32) -> SockAddr {
        SockAddr {
            family: AddressFamily::Inet6,
            addr,
            port,
            scope_id,
        }
    }

    /// The four IPv4 bytes; zero-filled from the start of the buffer.
    pub fn inet_bytes(&self) -> [u8; 4] {
        [self.addr[0], self.addr[1], self.addr[2], self.addr[3]]
    }
}

impl From<SocketAddr> for SockAddr {
    fn from(addr: SocketAddr) -> SockAddr {
        match addr {
            SocketAddr::V4(v4) => SockAddr::inet(v4.ip().octets(), v4.port()),
            SocketAddr::V6(v6) => SockAddr::inet6(v6.ip().octets(), v6.port(), v6.scope_id()),
        }
    }
}
