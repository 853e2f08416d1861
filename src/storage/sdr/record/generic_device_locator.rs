//! Generic Device Locator Record (SDR Type 10h)
//!
//! Reference: IPMI 2.0 Specification, Table 43-6 "SDR Type 10h - Generic Device Locator Record"

use std::num::NonZeroU8;

use crate::storage::sdr::DeviceType;

use super::*;

/// Record key for Generic Device Locator Record (SDR Type 10h).
///
/// Reference: IPMI 2.0 Specification, Table 43-6, bytes 6-8
/// (record data offsets 0-2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenericDeviceRecordKey {
    /// 7-bit I2C Slave Address of device on the channel.
    pub device_access_address: u8,
    /// 7-bit I2C Slave Address on the device's bus.
    pub device_slave_address: u8,
    /// Channel number for the management controller used to access the device.
    ///
    /// Assembled from the most significant bit in record byte 1 and the
    /// three least significant bits in record byte 2.
    pub channel_number: u8,
    /// Access LUN for Master Write-Read command.
    pub access_lun: LogicalUnit,
    /// Private bus ID if bus is private, None if device directly on IPMB.
    pub private_bus_id: Option<NonZeroU8>,
}

/// Generic Device Locator Record (SDR Type 10h).
///
/// This record is used to store the location and type information for devices
/// on the IPMB or management controller private busses that are neither IPMI
/// FRU devices nor IPMI management controllers.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericDeviceLocator {
    pub record_key: GenericDeviceRecordKey,
    /// Number of addresses the device occupies, minus one.
    pub address_span: u8,
    pub device_type: DeviceType,
    pub device_type_modifier: u8,
    pub entity_id: EntityId,
    /// Entity instance number. This record does not use the sensor SDR
    /// instance layout, so it is kept raw.
    pub entity_instance: u8,
    pub oem_reserved: u8,
    pub id_string: SensorId,
}

impl GenericDeviceLocator {
    const ID_OFFSET: usize = 10;

    /// Parse a Generic Device Locator Record from raw SDR record data.
    ///
    /// | Offset | Field                                                       |
    /// |--------|-------------------------------------------------------------|
    /// | 0      | Device Access Address [7:1], [0] reserved                   |
    /// | 1      | Device Slave Address [7:1], channel ms-bit in [0]           |
    /// | 2      | [7:5] Channel (ls-3 bits), [4:3] Access LUN, [2:0] Bus ID   |
    /// | 3      | [2:0] Address Span                                          |
    /// | 4      | Reserved                                                    |
    /// | 5      | Device Type (Table 43-12)                                   |
    /// | 6      | Device Type Modifier                                        |
    /// | 7      | Entity ID                                                   |
    /// | 8      | Entity Instance                                             |
    /// | 9      | OEM                                                         |
    /// | 10     | Device ID String Type/Length                                |
    pub fn parse(record_data: &[u8]) -> Result<Self, ParseError> {
        ParseError::ensure(record_data, Self::ID_OFFSET + 1)?;

        let device_access_address = record_data[0] >> 1;
        let device_slave_address = record_data[1] >> 1;

        let access_lun = LogicalUnit::from_low_bits(record_data[2] >> 3);
        let private_bus_id = NonZeroU8::new(record_data[2] & 0b111);
        let channel_number = ((record_data[1] & 0b1) << 3) | (record_data[2] >> 5);

        let address_span = record_data[3] & 0b111;

        let record_key = GenericDeviceRecordKey {
            device_access_address,
            device_slave_address,
            channel_number,
            access_lun,
            private_bus_id,
        };

        Ok(Self {
            record_key,
            address_span,
            device_type: DeviceType::from(record_data[5]),
            device_type_modifier: record_data[6],
            entity_id: EntityId::from(record_data[7]),
            entity_instance: record_data[8],
            oem_reserved: record_data[9],
            id_string: parse_id_string(record_data, Self::ID_OFFSET)?,
        })
    }

    pub fn id_string(&self) -> &SensorId {
        &self.id_string
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_bits() {
        let data = [
            0x20, 0xA1, 0b1011_0010, 0x01, 0x00, 0x10, 0x00, 0x07, 0x01, 0x00, 0xC2, b'E', b'E',
        ];

        let record = GenericDeviceLocator::parse(&data).unwrap();
        let key = record.record_key;

        assert_eq!(key.device_access_address, 0x10);
        assert_eq!(key.device_slave_address, 0x50);
        assert_eq!(key.channel_number, 0b1101);
        assert_eq!(key.access_lun, LogicalUnit::Two);
        assert_eq!(key.private_bus_id, NonZeroU8::new(2));
        assert_eq!(record.address_span, 1);
        assert_eq!(record.entity_id, EntityId::SystemBoard);
        assert_eq!(record.id_string().as_str(), Some("EE"));
    }
}
