use crate::storage::sdr::DeviceType;

use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FruDeviceKind {
    /// A logical FRU device, accessed through Read FRU Data with this ID.
    Logical { fru_device_id: u8 },
    /// A non-intelligent FRU device, accessed at this I2C slave address.
    Physical { i2c_address: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FruRecordKey {
    pub device_access_address: u8,
    pub fru_device: FruDeviceKind,
    pub lun: LogicalUnit,
    pub private_bus_id: u8,
    pub channel: Channel,
}

/// FRU Device Locator Record (type `0x11`).
///
/// Reference: IPMI 2.0 Specification, Table 43-7.
#[derive(Debug, Clone, PartialEq)]
pub struct FruDeviceLocator {
    pub record_key: FruRecordKey,
    pub device_type: DeviceType,
    pub device_type_modifier: u8,
    pub fru_entity_id: EntityId,
    pub fru_entity_instance: u8,
    pub oem_reserved: u8,
    pub id_string: SensorId,
}

impl FruDeviceLocator {
    const ID_OFFSET: usize = 10;

    pub fn parse(record_data: &[u8]) -> Result<Self, ParseError> {
        ParseError::ensure(record_data, Self::ID_OFFSET + 1)?;

        let device_access_address = record_data[0] >> 1;

        let logical = (record_data[2] & 0x80) == 0x80;
        let fru_device = if logical {
            FruDeviceKind::Logical {
                fru_device_id: record_data[1],
            }
        } else {
            FruDeviceKind::Physical {
                i2c_address: record_data[1] >> 1,
            }
        };

        let lun = LogicalUnit::from_low_bits(record_data[2] >> 3);
        let private_bus_id = record_data[2] & 0b111;
        let channel = Channel::from_low_bits(record_data[3] >> 4);

        let record_key = FruRecordKey {
            device_access_address,
            fru_device,
            lun,
            private_bus_id,
            channel,
        };

        Ok(Self {
            record_key,
            device_type: DeviceType::from(record_data[5]),
            device_type_modifier: record_data[6],
            fru_entity_id: EntityId::from(record_data[7]),
            fru_entity_instance: record_data[8],
            oem_reserved: record_data[9],
            id_string: parse_id_string(record_data, Self::ID_OFFSET)?,
        })
    }

    pub fn id_string(&self) -> &SensorId {
        &self.id_string
    }

    pub fn is_logical(&self) -> bool {
        matches!(self.record_key.fru_device, FruDeviceKind::Logical { .. })
    }
}
