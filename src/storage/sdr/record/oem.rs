use crate::bits;

use super::*;

/// OEM record (type `0xC0`): a manufacturer ID followed by opaque data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OemRecord {
    pub manufacturer_id: u32,
    pub data: Vec<u8>,
}

impl OemRecord {
    pub fn parse(record_data: &[u8]) -> Result<Self, ParseError> {
        Ok(Self {
            manufacturer_id: bits::u24_le(record_data, 0)?,
            data: record_data[3..].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        let record = OemRecord::parse(&[0x57, 0x01, 0x00, 0xAA]).unwrap();
        assert_eq!(record.manufacturer_id, 0x157);
        assert_eq!(record.data, vec![0xAA]);

        assert!(OemRecord::parse(&[0x57, 0x01]).is_err());
    }
}
