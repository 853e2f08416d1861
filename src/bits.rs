//! Byte and bit primitives shared by all decoders.
//!
//! Multi-byte extraction fails with [`ParseError::InsufficientData`] when the
//! buffer does not cover `offset + width`. Single-bit helpers are plain
//! arithmetic and cannot fail.

use crate::ParseError;

fn window(data: &[u8], offset: usize, width: usize) -> Result<&[u8], ParseError> {
    let end = offset.saturating_add(width);
    ParseError::ensure(data, end)?;
    Ok(&data[offset..end])
}

/// Read a `width`-byte little-endian unsigned integer at `offset`.
///
/// `width` must be at most 8.
pub fn uint_le(data: &[u8], offset: usize, width: usize) -> Result<u64, ParseError> {
    debug_assert!(width <= 8);
    let bytes = window(data, offset, width)?;
    Ok(bytes
        .iter()
        .rev()
        .fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
}

/// Read a `width`-byte big-endian unsigned integer at `offset`.
///
/// `width` must be at most 8.
pub fn uint_be(data: &[u8], offset: usize, width: usize) -> Result<u64, ParseError> {
    debug_assert!(width <= 8);
    let bytes = window(data, offset, width)?;
    Ok(bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
}

pub fn u8_at(data: &[u8], offset: usize) -> Result<u8, ParseError> {
    Ok(window(data, offset, 1)?[0])
}

pub fn u16_le(data: &[u8], offset: usize) -> Result<u16, ParseError> {
    let b = window(data, offset, 2)?;
    Ok(u16::from_le_bytes([b[0], b[1]]))
}

pub fn u16_be(data: &[u8], offset: usize) -> Result<u16, ParseError> {
    let b = window(data, offset, 2)?;
    Ok(u16::from_be_bytes([b[0], b[1]]))
}

/// 24-bit little-endian value, as used by IANA manufacturer IDs.
pub fn u24_le(data: &[u8], offset: usize) -> Result<u32, ParseError> {
    let b = window(data, offset, 3)?;
    Ok(u32::from_le_bytes([b[0], b[1], b[2], 0]))
}

pub fn u32_le(data: &[u8], offset: usize) -> Result<u32, ParseError> {
    let b = window(data, offset, 4)?;
    Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

pub fn u32_be(data: &[u8], offset: usize) -> Result<u32, ParseError> {
    let b = window(data, offset, 4)?;
    Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

/// Two's complement sign extension of a `bits`-wide field held in the low
/// bits of an unsigned container.
pub trait SignExtend {
    type Signed;

    fn sign_extend(self, bits: u32) -> Self::Signed;
}

macro_rules! sign_extend {
    ($($unsigned:ty => $signed:ty),*) => {
        $(
            impl SignExtend for $unsigned {
                type Signed = $signed;

                fn sign_extend(self, bits: u32) -> $signed {
                    debug_assert!(bits > 0 && bits <= <$unsigned>::BITS);
                    let shift = <$unsigned>::BITS - bits;
                    ((self << shift) as $signed) >> shift
                }
            }
        )*
    };
}

sign_extend!(u8 => i8, u16 => i16, u32 => i32);

/// Whether bit `bit` (0-7) of `value` is set.
pub const fn is_bit_set(value: u8, bit: u8) -> bool {
    (value >> (bit & 0x7)) & 1 == 1
}

pub const fn set_bit(value: u8, bit: u8) -> u8 {
    value | (1 << (bit & 0x7))
}

pub const fn clear_bit(value: u8, bit: u8) -> u8 {
    value & !(1 << (bit & 0x7))
}

/// The value that makes the modulo-256 sum of `data` and itself equal zero.
pub fn zero_checksum(data: &[u8]) -> u8 {
    let sum = data.iter().fold(0u8, |acc, v| acc.wrapping_add(*v));
    sum.wrapping_neg()
}

/// Whether the modulo-256 sum of all bytes in `data` (checksum included) is zero.
pub fn checksum_ok(data: &[u8]) -> bool {
    data.iter().fold(0u8, |acc, v| acc.wrapping_add(*v)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endianness() {
        let data = [0x01, 0x02, 0x03, 0x04];

        assert_eq!(u16_le(&data, 0), Ok(0x0201));
        assert_eq!(u16_be(&data, 0), Ok(0x0102));
        assert_eq!(u24_le(&data, 1), Ok(0x040302));
        assert_eq!(u32_le(&data, 0), Ok(0x04030201));
        assert_eq!(u32_be(&data, 0), Ok(0x01020304));
        assert_eq!(uint_le(&data, 1, 3), Ok(0x040302));
        assert_eq!(uint_be(&data, 1, 3), Ok(0x020304));
        assert_eq!(uint_le(&data, 4, 0), Ok(0));
    }

    #[test]
    fn short_buffers() {
        let data = [0x01, 0x02, 0x03];

        assert_eq!(
            u32_le(&data, 0),
            Err(ParseError::InsufficientData {
                needed: 4,
                available: 3
            })
        );
        assert_eq!(
            u16_be(&data, 2),
            Err(ParseError::InsufficientData {
                needed: 4,
                available: 3
            })
        );
        assert!(u8_at(&data, usize::MAX).is_err());
    }

    #[test]
    fn sign_extension() {
        assert_eq!(0x0Fu8.sign_extend(4), -1);
        assert_eq!(0x08u8.sign_extend(4), -8);
        assert_eq!(0x07u8.sign_extend(4), 7);
        assert_eq!(0x3FFu16.sign_extend(10), -1);
        assert_eq!(0x200u16.sign_extend(10), -512);
        assert_eq!(0x1FFu16.sign_extend(10), 511);
        assert_eq!(0xFFu8.sign_extend(8), -1);
        assert_eq!(0x8000_0000u32.sign_extend(32), i32::MIN);
    }

    #[test]
    fn bit_helpers() {
        for bit in 0..8 {
            let set = set_bit(0, bit);
            assert!(is_bit_set(set, bit));
            assert_eq!(clear_bit(set, bit), 0);
            assert_eq!(clear_bit(0xFF, bit), !(1 << bit));
        }
    }

    #[test]
    fn checksums() {
        let mut data = vec![0x01, 0x00, 0x01, 0x03, 0x07, 0x00, 0x00];
        let checksum = zero_checksum(&data);
        assert_eq!(checksum, 0xF4);
        data.push(checksum);
        assert!(checksum_ok(&data));
    }
}
