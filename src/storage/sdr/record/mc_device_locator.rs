use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct McRecordKey {
    pub i2c_address: u8,
    pub channel: Channel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalInitialization {
    EnableEventMessageGeneration,
    DisableEventMessageGeneration,
    DoNotInitialize,
    Reserved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceCapabilities {
    pub chassis_device: bool,
    pub bridge: bool,
    pub ipmi_event_generator: bool,
    pub ipmi_event_receiver: bool,
    pub fru_inventory_device: bool,
    pub sel_device: bool,
    pub sdr_repository_device: bool,
    pub sensor_device: bool,
}

impl From<u8> for DeviceCapabilities {
    fn from(value: u8) -> Self {
        let bit = |n: u8| (value >> n) & 1 == 1;

        Self {
            chassis_device: bit(7),
            bridge: bit(6),
            ipmi_event_generator: bit(5),
            ipmi_event_receiver: bit(4),
            fru_inventory_device: bit(3),
            sel_device: bit(2),
            sdr_repository_device: bit(1),
            sensor_device: bit(0),
        }
    }
}

/// Management Controller Device Locator Record (type `0x12`).
///
/// Reference: IPMI 2.0 Specification, Table 43-8.
#[derive(Debug, Clone, PartialEq)]
pub struct McDeviceLocator {
    pub key: McRecordKey,
    pub acpi_system_power_state_notification_required: bool,
    pub acpi_device_power_state_notification_required: bool,
    pub static_controller: bool,
    pub controller_logs_initialization_errors: bool,
    pub log_initialization_errors_accessing_controller: bool,
    pub global_initialization: GlobalInitialization,
    pub device_capabilities: DeviceCapabilities,
    pub entity_id: EntityId,
    // Only an instance number, unlike the entity instance of sensor records.
    pub entity_instance: u8,
    pub oem_reserved: u8,
    pub id_string: SensorId,
}

impl McDeviceLocator {
    const ID_OFFSET: usize = 10;

    pub fn parse(record_data: &[u8]) -> Result<Self, ParseError> {
        ParseError::ensure(record_data, Self::ID_OFFSET + 1)?;

        let i2c_address = record_data[0] >> 1;
        let channel = Channel::from_low_bits(record_data[1]);

        let flags = record_data[2];
        let global_initialization = match flags & 0b11 {
            0b00 => GlobalInitialization::EnableEventMessageGeneration,
            0b01 => GlobalInitialization::DisableEventMessageGeneration,
            0b10 => GlobalInitialization::DoNotInitialize,
            _ => GlobalInitialization::Reserved,
        };

        // 3 reserved bytes after the capabilities

        Ok(Self {
            key: McRecordKey {
                i2c_address,
                channel,
            },
            acpi_system_power_state_notification_required: (flags & 0x80) == 0x80,
            acpi_device_power_state_notification_required: (flags & 0x40) == 0x40,
            static_controller: (flags & 0x20) == 0x20,
            controller_logs_initialization_errors: (flags & 0x08) == 0x08,
            log_initialization_errors_accessing_controller: (flags & 0x04) == 0x04,
            global_initialization,
            device_capabilities: DeviceCapabilities::from(record_data[3]),
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
    fn parse() {
        let mut data = vec![
            0x20, 0xF5, 0x21, 0x2F, 0x00, 0x00, 0x00, 0x07, 0x01, 0x00, 0xC3,
        ];
        data.extend_from_slice(b"BMC");

        let record = McDeviceLocator::parse(&data).unwrap();

        assert_eq!(record.key.i2c_address, 0x10);
        // Only the low nibble holds the channel.
        assert_eq!(record.key.channel.value(), 5);
        assert!(record.static_controller);
        assert_eq!(
            record.global_initialization,
            GlobalInitialization::DisableEventMessageGeneration
        );
        assert!(record.device_capabilities.ipmi_event_generator);
        assert!(record.device_capabilities.fru_inventory_device);
        assert!(record.device_capabilities.sensor_device);
        assert!(!record.device_capabilities.bridge);
        assert_eq!(record.id_string().as_str(), Some("BMC"));
    }
}
