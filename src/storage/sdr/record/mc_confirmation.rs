use crate::bits;

use super::*;

/// Management Controller Confirmation Record (type `0x13`).
///
/// Reference: IPMI 2.0 Specification, Table 43-9.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct McConfirmation {
    pub i2c_address: u8,
    pub device_id: u8,
    pub channel: Channel,
    pub device_revision: u8,
    pub firmware_major_revision: u8,
    pub firmware_minor_revision: u8,
    pub ipmi_version_major: u8,
    pub ipmi_version_minor: u8,
    pub manufacturer_id: u32,
    pub product_id: u16,
    pub device_guid: [u8; 16],
}

impl McConfirmation {
    pub const SIZE: usize = 27;

    pub fn parse(record_data: &[u8]) -> Result<Self, ParseError> {
        ParseError::ensure(record_data, Self::SIZE)?;

        let mut device_guid = [0u8; 16];
        device_guid.copy_from_slice(&record_data[11..27]);

        Ok(Self {
            i2c_address: record_data[0] >> 1,
            device_id: record_data[1],
            channel: Channel::from_low_bits(record_data[2] >> 4),
            device_revision: record_data[2] & 0x0F,
            firmware_major_revision: record_data[3] & 0x7F,
            firmware_minor_revision: record_data[4],
            ipmi_version_major: record_data[5] & 0x0F,
            ipmi_version_minor: record_data[5] >> 4,
            manufacturer_id: bits::u24_le(record_data, 6)?,
            product_id: bits::u16_le(record_data, 9)?,
            device_guid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        let mut data = vec![
            0x20, 0x01, 0x13, 0x02, 0x45, 0x02, 0x57, 0x01, 0x00, 0x34, 0x12,
        ];
        data.extend(0..16u8);

        let record = McConfirmation::parse(&data).unwrap();
        assert_eq!(record.i2c_address, 0x10);
        assert_eq!(record.channel.value(), 1);
        assert_eq!(record.device_revision, 3);
        assert_eq!(record.ipmi_version_major, 2);
        assert_eq!(record.ipmi_version_minor, 0);
        assert_eq!(record.manufacturer_id, 0x0157);
        assert_eq!(record.product_id, 0x1234);
        assert_eq!(record.device_guid[15], 15);

        assert!(McConfirmation::parse(&data[..26]).is_err());
    }
}
