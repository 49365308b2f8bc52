//! Byte-order helpers.
//!
//! [`ByteSwap`] reverses the byte order of the fixed-width integers and reads or
//! writes them big-endian at arbitrary (unaligned) byte offsets.

/// Integer types whose byte order can be swapped and serialized big-endian.
pub trait ByteSwap: Copy {
    /// Width of the integer in bytes.
    const WIDTH: usize;

    /// Reverse the byte order.
    fn swap(self) -> Self;

    /// Convert from host order to big-endian (network) order.
    fn to_big_endian(self) -> Self;

    /// Convert from big-endian (network) order to host order.
    fn from_big_endian(self) -> Self;

    /// Write `self` big-endian into the first [`Self::WIDTH`] bytes of `dest`.
    ///
    /// # Panics
    /// * If `dest` is shorter than [`Self::WIDTH`]
    fn write_be(self, dest: &mut [u8]);

    /// Read a big-endian value from the first [`Self::WIDTH`] bytes of `src`.
    ///
    /// # Panics
    /// * If `src` is shorter than [`Self::WIDTH`]
    fn read_be(src: &[u8]) -> Self;
}

macro_rules! impl_byte_swap {
    ($($t:ty),*) => {
        $(
            impl ByteSwap for $t {
                const WIDTH: usize = std::mem::size_of::<$t>();

                fn swap(self) -> Self {
                    self.swap_bytes()
                }

                fn to_big_endian(self) -> Self {
                    self.to_be()
                }

                fn from_big_endian(self) -> Self {
                    <$t>::from_be(self)
                }

                fn write_be(self, dest: &mut [u8]) {
                    dest[..Self::WIDTH].copy_from_slice(&self.to_be_bytes());
                }

                fn read_be(src: &[u8]) -> Self {
                    let mut buf = [0u8; std::mem::size_of::<$t>()];
                    buf.copy_from_slice(&src[..Self::WIDTH]);
                    <$t>::from_be_bytes(buf)
                }
            }
        )*
    };
}

impl_byte_swap!(u8, u16, u32, u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap() {
        assert_eq!(0x12u8.swap(), 0x12);
        assert_eq!(0x1234u16.swap(), 0x3412);
        assert_eq!(0x1234_5678u32.swap(), 0x7856_3412);
        assert_eq!(0x0102_0304_0506_0708u64.swap(), 0x0807_0605_0403_0201);
    }

    #[test]
    fn test_big_endian_is_involution() {
        let v = 0xC0A8_0101u32;
        assert_eq!(v.to_big_endian().from_big_endian(), v);
        if cfg!(target_endian = "little") {
            assert_eq!(v.to_big_endian(), v.swap());
        } else {
            assert_eq!(v.to_big_endian(), v);
        }
    }

    #[test]
    fn test_write_read_unaligned() {
        let mut buf = [0u8; 7];
        0xFFFFu16.write_be(&mut buf[1..]);
        0x7f00_0001u32.write_be(&mut buf[3..]);
        assert_eq!(buf, [0, 0xff, 0xff, 0x7f, 0, 0, 1]);
        assert_eq!(u32::read_be(&buf[3..]), 0x7f00_0001);
        assert_eq!(u16::read_be(&buf[1..]), 0xFFFF);
    }

    #[test]
    #[should_panic]
    fn test_write_short_buffer_panics() {
        let mut buf = [0u8; 3];
        0u32.write_be(&mut buf);
    }
}
