//! Type/Length encoded strings, as used by SDR ID strings and FRU info area
//! fields.
//!
//! Reference: IPMI 2.0 Specification, Section 43.15 "Type/Length Byte Format"
//! and the Platform Management FRU Information Storage Definition, Section 13.

use crate::ParseError;

const BCD_PLUS: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ' ', '-', '.', ':', ',', '_',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCode {
    /// Binary or unspecified. SDRs call this "Unicode".
    Binary,
    BcdPlus,
    Ascii6BPacked,
    Ascii8BAndLatin1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeLength(u8);

impl TypeLength {
    /// Marks the end of the custom fields in FRU info areas.
    pub const END_OF_FIELDS: Self = Self(0xC1);

    pub fn new(value: u8) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn type_code(&self) -> TypeCode {
        match self.0 >> 6 {
            0b00 => TypeCode::Binary,
            0b01 => TypeCode::BcdPlus,
            0b10 => TypeCode::Ascii6BPacked,
            _ => TypeCode::Ascii8BAndLatin1,
        }
    }

    /// The amount of encoded bytes that follow this byte.
    pub fn length(&self) -> usize {
        (self.0 & 0x3F) as usize
    }

    /// The amount of characters (or bytes, for binary data) the encoded
    /// bytes decode into.
    pub fn size(&self) -> usize {
        let length = self.length();
        match self.type_code() {
            TypeCode::Binary | TypeCode::Ascii8BAndLatin1 => length,
            TypeCode::BcdPlus => length * 2,
            TypeCode::Ascii6BPacked => length.div_ceil(3) * 4,
        }
    }

    pub fn is_end_of_fields(&self) -> bool {
        *self == Self::END_OF_FIELDS
    }

    /// Decode `raw`, which must be exactly [`TypeLength::length`] bytes long.
    pub fn decode(&self, raw: &[u8]) -> Result<TypeLengthString, ParseError> {
        if raw.len() != self.length() {
            return Err(ParseError::LengthMismatch {
                declared: self.length(),
                actual: raw.len(),
            });
        }

        let value = match self.type_code() {
            TypeCode::Binary => TypeLengthString::Binary(raw.to_vec()),
            TypeCode::BcdPlus => TypeLengthString::BcdPlus(decode_bcd_plus(raw)),
            TypeCode::Ascii6BPacked => TypeLengthString::Ascii6BPacked(decode_ascii_6b(raw)),
            TypeCode::Ascii8BAndLatin1 => {
                TypeLengthString::Ascii8BAndLatin1(raw.iter().map(|b| char::from(*b)).collect())
            }
        };

        Ok(value)
    }
}

impl From<u8> for TypeLength {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

fn decode_bcd_plus(raw: &[u8]) -> String {
    raw.iter()
        .flat_map(|b| [b & 0x0F, b >> 4])
        .map(|nibble| BCD_PLUS[nibble as usize])
        .collect()
}

fn decode_ascii_6b(raw: &[u8]) -> String {
    let mut out = String::with_capacity(raw.len().div_ceil(3) * 4);

    for group in raw.chunks(3) {
        let mut bytes = [0u8; 3];
        bytes[..group.len()].copy_from_slice(group);
        let packed = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], 0]);

        for shift in [0, 6, 12, 18] {
            let code = ((packed >> shift) & 0x3F) as u8;
            out.push(char::from(0x20 + code));
        }
    }

    out
}

/// A decoded Type/Length field.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeLengthString {
    Binary(Vec<u8>),
    BcdPlus(String),
    Ascii6BPacked(String),
    Ascii8BAndLatin1(String),
}

impl TypeLengthString {
    /// The amount of decoded characters, or bytes for binary data.
    pub fn len(&self) -> usize {
        match self {
            Self::Binary(v) => v.len(),
            Self::BcdPlus(v) | Self::Ascii6BPacked(v) | Self::Ascii8BAndLatin1(v) => {
                v.chars().count()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The decoded text, if this field holds text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Binary(_) => None,
            Self::BcdPlus(v) | Self::Ascii6BPacked(v) | Self::Ascii8BAndLatin1(v) => Some(v),
        }
    }

    /// Encode this value into a Type/Length byte followed by its data.
    ///
    /// Only binary and 8-bit ASCII + Latin-1 values can be encoded. Returns
    /// `None` for other encodings, for values longer than 63 bytes, for
    /// characters outside of Latin-1, and for single-character 8-bit values
    /// (which would collide with the end-of-fields marker).
    pub fn encode(&self) -> Option<Vec<u8>> {
        let (type_code, payload) = match self {
            Self::Binary(v) => (0b00u8, v.clone()),
            Self::Ascii8BAndLatin1(v) => {
                let payload = v
                    .chars()
                    .map(|c| u8::try_from(c).ok())
                    .collect::<Option<Vec<_>>>()?;

                if payload.len() == 1 {
                    return None;
                }

                (0b11u8, payload)
            }
            Self::BcdPlus(_) | Self::Ascii6BPacked(_) => return None,
        };

        if payload.len() > 0x3F {
            return None;
        }

        let mut out = Vec::with_capacity(payload.len() + 1);
        out.push((type_code << 6) | payload.len() as u8);
        out.extend_from_slice(&payload);
        Some(out)
    }
}

impl Default for TypeLengthString {
    fn default() -> Self {
        Self::Ascii8BAndLatin1(String::new())
    }
}

impl core::fmt::Display for TypeLengthString {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Binary(v) => match core::str::from_utf8(v) {
                Ok(v) => write!(f, "{}", v.trim_end_matches('\0')),
                Err(_) => v.iter().try_for_each(|b| write!(f, "{:02X}", b)),
            },
            Self::BcdPlus(v) | Self::Ascii6BPacked(v) | Self::Ascii8BAndLatin1(v) => {
                write!(f, "{}", v.trim_end())
            }
        }
    }
}

/// Read one Type/Length field starting at `*offset`, advancing `*offset`
/// past it.
///
/// Returns `Ok(None)` (after consuming the marker) if the field is the
/// end-of-fields marker.
pub fn read_field(
    data: &[u8],
    offset: &mut usize,
) -> Result<Option<TypeLengthString>, ParseError> {
    let type_length = TypeLength::new(crate::bits::u8_at(data, *offset)?);

    if type_length.is_end_of_fields() {
        *offset += 1;
        return Ok(None);
    }

    let start = *offset + 1;
    let end = start + type_length.length();
    ParseError::ensure(data, end)?;

    let value = type_length.decode(&data[start..end])?;
    *offset = end;

    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_length_matches_size() {
        for value in 0..=255u8 {
            let type_length = TypeLength::new(value);
            let raw = vec![0x5A; type_length.length()];
            let decoded = type_length.decode(&raw).unwrap();
            assert_eq!(
                decoded.len(),
                type_length.size(),
                "type/length {value:#04X}"
            );
        }
    }

    #[test]
    fn mismatched_length() {
        let type_length = TypeLength::new(0xC4);

        assert_eq!(
            type_length.decode(b"abc"),
            Err(ParseError::LengthMismatch {
                declared: 4,
                actual: 3
            })
        );
        assert!(type_length.decode(b"abcde").is_err());
    }

    #[test]
    fn size_is_monotonic() {
        for code in 0..4u8 {
            let sizes: Vec<_> = (0..=0x3Fu8)
                .map(|len| TypeLength::new((code << 6) | len).size())
                .collect();

            assert!(sizes.windows(2).all(|w| w[0] <= w[1]));

            if code == 0b10 {
                assert!(sizes.iter().all(|s| s % 4 == 0));
            }
        }
    }

    #[test]
    fn bcd_plus() {
        let decoded = TypeLength::new(0x43).decode(&[0x21, 0xBA, 0xF9]).unwrap();
        assert_eq!(decoded, TypeLengthString::BcdPlus("12 -9_".into()));
    }

    #[test]
    fn ascii_6b_packed() {
        // "IPMI" packed as 6-bit ASCII
        let decoded = TypeLength::new(0x83).decode(&[0x29, 0xDC, 0xA6]).unwrap();
        assert_eq!(decoded, TypeLengthString::Ascii6BPacked("IPMI".into()));

        // Partial trailing groups are padded with spaces.
        let decoded = TypeLength::new(0x81).decode(&[0x29]).unwrap();
        assert_eq!(decoded, TypeLengthString::Ascii6BPacked("I   ".into()));
        assert_eq!(decoded.to_string(), "I");
    }

    #[test]
    fn latin1() {
        let decoded = TypeLength::new(0xC3).decode(&[b'F', b'a', 0xE9]).unwrap();
        assert_eq!(decoded, TypeLengthString::Ascii8BAndLatin1("Faé".into()));
        assert_eq!(decoded.len(), 3);
    }

    #[test]
    fn encode_binary_and_latin1() {
        let binary = TypeLengthString::Binary(vec![1, 2, 3]);
        assert_eq!(binary.encode(), Some(vec![0x03, 1, 2, 3]));

        let text = TypeLengthString::Ascii8BAndLatin1("Fan 1".into());
        let encoded = text.encode().unwrap();
        assert_eq!(encoded[0], 0xC5);
        assert_eq!(
            TypeLength::new(encoded[0]).decode(&encoded[1..]).unwrap(),
            text
        );

        let latin1 = TypeLengthString::Ascii8BAndLatin1("x".into());
        assert_eq!(latin1.encode(), None);
        assert_eq!(TypeLengthString::BcdPlus("12".into()).encode(), None);
        assert_eq!(TypeLengthString::Binary(vec![0; 64]).encode(), None);
    }

    #[test]
    fn field_reader() {
        let data = [0xC2, b'h', b'i', 0xC0, 0xC1, 0x00];
        let mut offset = 0;

        assert_eq!(
            read_field(&data, &mut offset),
            Ok(Some(TypeLengthString::Ascii8BAndLatin1("hi".into())))
        );
        assert_eq!(offset, 3);
        assert_eq!(
            read_field(&data, &mut offset),
            Ok(Some(TypeLengthString::Ascii8BAndLatin1(String::new())))
        );
        assert_eq!(read_field(&data, &mut offset), Ok(None));
        assert_eq!(offset, 5);

        let truncated = [0xC4, b'a'];
        let mut offset = 0;
        assert_eq!(
            read_field(&truncated, &mut offset),
            Err(ParseError::InsufficientData {
                needed: 5,
                available: 2
            })
        );
    }
}
