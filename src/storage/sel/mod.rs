//! System Event Log entries.
//!
//! Reference: IPMI 2.0 Specification, Section 32 "SEL Record Formats"

use crate::{
    addressing::{Channel, LogicalUnit},
    bits,
    fmt::{LogItem, Loggable},
    storage::sdr::{event_description, EventDescription, EventReadingTypeCodes, SensorType},
    ParseError,
};

use super::Timestamp;

mod event_data;
pub use event_data::{EventData, EventData2, EventData3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(u16);

impl RecordId {
    pub const FIRST: Self = Self(0x0000);
    pub const LAST: Self = Self(0xFFFF);

    /// Create a record ID that identifies a single entry.
    ///
    /// The first and last IDs are reserved and return `None`.
    pub fn new(id: u16) -> Option<Self> {
        if id == Self::FIRST.0 || id == Self::LAST.0 {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn new_raw(id: u16) -> Self {
        RecordId(id)
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    pub fn is_first(&self) -> bool {
        self == &Self::FIRST
    }

    pub fn is_last(&self) -> bool {
        self == &Self::LAST
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelRecordType {
    System,
    TimestampedOem(u8),
    NonTimestampedOem(u8),
    Unknown(u8),
}

impl From<u8> for SelRecordType {
    fn from(value: u8) -> Self {
        match value {
            0x02 => Self::System,
            0xC0..=0xDF => Self::TimestampedOem(value),
            0xE0..=0xFF => Self::NonTimestampedOem(value),
            v => Self::Unknown(v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventGenerator {
    RqSAAndLun {
        i2c_addr: u8,
        channel: Channel,
        lun: LogicalUnit,
    },
    SoftwareId {
        software_id: u8,
        channel: Channel,
    },
}

impl From<(u8, u8)> for EventGenerator {
    fn from(value: (u8, u8)) -> Self {
        let is_software_id = (value.0 & 0x1) == 0x1;
        let i2c_or_sid = (value.0 >> 1) & 0x7F;
        let channel = Channel::from_low_bits(value.1 >> 4);

        if is_software_id {
            Self::SoftwareId {
                software_id: i2c_or_sid,
                channel,
            }
        } else {
            Self::RqSAAndLun {
                i2c_addr: i2c_or_sid,
                channel,
                lun: LogicalUnit::from_low_bits(value.1),
            }
        }
    }
}

impl core::fmt::Display for EventGenerator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::RqSAAndLun {
                i2c_addr,
                channel,
                lun,
            } => write!(
                f,
                "IPMB 0x{:02X}, LUN {}, {}",
                i2c_addr,
                lun.value(),
                channel
            ),
            Self::SoftwareId {
                software_id,
                channel,
            } => write!(f, "Software ID 0x{:02X}, {}", software_id, channel),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventMessageRevision {
    V2_0,
    V1_0,
    Unknown(u8),
}

impl From<u8> for EventMessageRevision {
    fn from(value: u8) -> Self {
        match value {
            0x04 => Self::V2_0,
            0x03 => Self::V1_0,
            v => Self::Unknown(v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDirection {
    Assert,
    Deassert,
}

impl EventDirection {
    /// Bit 7 of the event/reading type byte is set for deassertion events.
    pub fn from_event_type_byte(value: u8) -> Self {
        if (value & 0x80) == 0x80 {
            Self::Deassert
        } else {
            Self::Assert
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    System {
        record_id: RecordId,
        timestamp: Timestamp,
        generator_id: EventGenerator,
        event_message_format: EventMessageRevision,
        sensor_type: SensorType,
        sensor_number: u8,
        event_direction: EventDirection,
        event_type: EventReadingTypeCodes,
        event_data: EventData,
    },
    OemTimestamped {
        record_id: RecordId,
        ty: u8,
        timestamp: Timestamp,
        manufacturer_id: u32,
        data: [u8; 6],
    },
    OemNotTimestamped {
        record_id: RecordId,
        ty: u8,
        data: [u8; 13],
    },
    /// A record type that is neither a system event nor an OEM record.
    Unknown {
        record_id: RecordId,
        ty: u8,
        data: [u8; 13],
    },
}

impl Entry {
    pub const SIZE: usize = 16;

    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        ParseError::ensure(data, Self::SIZE)?;

        let record_id = RecordId(bits::u16_le(data, 0)?);
        let record_type = SelRecordType::from(data[2]);
        let timestamp = Timestamp::from(bits::u32_le(data, 3)?);

        let mut trailing = [0u8; 13];
        trailing.copy_from_slice(&data[3..16]);

        let entry = match record_type {
            SelRecordType::System => Self::System {
                record_id,
                timestamp,
                generator_id: EventGenerator::from((data[7], data[8])),
                event_message_format: EventMessageRevision::from(data[9]),
                sensor_type: SensorType::from(data[10]),
                sensor_number: data[11],
                event_direction: EventDirection::from_event_type_byte(data[12]),
                event_type: EventReadingTypeCodes::from(data[12]),
                event_data: EventData::parse([data[13], data[14], data[15]]),
            },
            SelRecordType::TimestampedOem(ty) => Self::OemTimestamped {
                record_id,
                ty,
                timestamp,
                manufacturer_id: bits::u24_le(data, 7)?,
                data: [data[10], data[11], data[12], data[13], data[14], data[15]],
            },
            SelRecordType::NonTimestampedOem(ty) => Self::OemNotTimestamped {
                record_id,
                ty,
                data: trailing,
            },
            SelRecordType::Unknown(ty) => {
                debug!(
                    "SEL entry 0x{:04X} has unknown record type 0x{:02X}",
                    record_id.value(),
                    ty
                );

                Self::Unknown {
                    record_id,
                    ty,
                    data: trailing,
                }
            }
        };

        Ok(entry)
    }

    pub fn record_id(&self) -> RecordId {
        match self {
            Self::System { record_id, .. }
            | Self::OemTimestamped { record_id, .. }
            | Self::OemNotTimestamped { record_id, .. }
            | Self::Unknown { record_id, .. } => *record_id,
        }
    }

    /// The description and severity of a system event.
    pub fn description(&self) -> Option<EventDescription> {
        match self {
            Self::System {
                sensor_type,
                event_type,
                event_data,
                ..
            } => event_description(*event_type, *sensor_type, event_data.offset),
            _ => None,
        }
    }
}

impl Loggable for Entry {
    fn as_log(&self) -> Vec<LogItem> {
        let mut log = log_vec![
            (0, "SEL entry"),
            (
                1,
                "Record ID",
                format!("0x{:04X}", self.record_id().value()),
            ),
        ];

        match self {
            Entry::System {
                timestamp,
                generator_id,
                event_message_format,
                sensor_type,
                sensor_number,
                event_direction,
                event_type,
                event_data,
                ..
            } => {
                let format = match event_message_format {
                    EventMessageRevision::V2_0 => "2.0".into(),
                    EventMessageRevision::V1_0 => "1.0".into(),
                    EventMessageRevision::Unknown(v) => format!("Unknown (0x{:02X})", v),
                };

                let event_dir = match event_direction {
                    EventDirection::Assert => "Asserted",
                    EventDirection::Deassert => "Deasserted",
                };

                log.push((1, "Record type", "System (0x02)").into());
                log.push((1, "Time", timestamp).into());
                log.push((1, "Generator", generator_id).into());
                log.push((1, "Format revision", format).into());
                log.push((1, "Sensor type", sensor_type.description()).into());
                log.push((1, "Sensor number", format!("0x{:02X}", sensor_number)).into());
                log.push((1, "Assertion state", event_dir).into());
                log.push((1, "Event type", format!("0x{:02X}", u8::from(*event_type))).into());
                log.push((1, "Event data", event_data).into());

                if let Some(description) = self.description() {
                    log.push((1, "Event", description.description).into());
                    log.push((1, "Severity", description.severity).into());
                }
            }
            Entry::OemTimestamped {
                ty,
                timestamp,
                manufacturer_id,
                data,
                ..
            } => {
                log.push((1, "Record type", format!("Timestamped OEM (0x{:02X})", ty)).into());
                log.push((1, "Time", timestamp).into());
                log.push((1, "Manufacturer ID", format!("0x{:06X}", manufacturer_id)).into());
                log.push((1, "Data", format!("{:02X?}", data)).into());
            }
            Entry::OemNotTimestamped { ty, data, .. } => {
                let record_type = format!("Non-timestamped OEM (0x{:02X})", ty);
                log.push((1, "Record type", record_type).into());
                log.push((1, "Data", format!("{:02X?}", data)).into());
            }
            Entry::Unknown { ty, data, .. } => {
                log.push((1, "Record type", format!("Unknown (0x{:02X})", ty)).into());
                log.push((1, "Data", format!("{:02X?}", data)).into());
            }
        }

        log
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id() {
        assert_eq!(RecordId::new(0x0000), None);
        assert_eq!(RecordId::new(0xFFFF), None);
        assert_eq!(RecordId::new(0x0102).map(|id| id.value()), Some(0x0102));
    }

    #[test]
    fn deassertion_threshold_event() {
        let data = [
            0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x20, 0x00, 0x04, 0x01, 0x30, 0x81, 0x59,
            0x5A, 0x50,
        ];

        let entry = Entry::parse(&data).unwrap();
        let Entry::System {
            generator_id,
            event_direction,
            event_type,
            sensor_type,
            ..
        } = &entry
        else {
            panic!("Expected system event");
        };

        assert_eq!(
            *generator_id,
            EventGenerator::RqSAAndLun {
                i2c_addr: 0x10,
                channel: Channel::Primary,
                lun: LogicalUnit::Zero,
            }
        );
        assert_eq!(*event_direction, EventDirection::Deassert);
        assert_eq!(*event_type, EventReadingTypeCodes::Threshold);
        assert_eq!(*sensor_type, SensorType::Temperature);

        let description = entry.description().unwrap();
        assert_eq!(description.description, "Upper Critical - going high");
    }

    #[test]
    fn oem_entries() {
        let mut data = [0u8; 16];
        data[2] = 0xC1;
        data[7..10].copy_from_slice(&[0x57, 0x01, 0x00]);
        data[10] = 0xAB;

        match Entry::parse(&data).unwrap() {
            Entry::OemTimestamped {
                ty,
                manufacturer_id,
                data,
                ..
            } => {
                assert_eq!(ty, 0xC1);
                assert_eq!(manufacturer_id, 0x157);
                assert_eq!(data[0], 0xAB);
            }
            other => panic!("Unexpected entry {other:?}"),
        }

        data[2] = 0xE0;
        assert!(matches!(
            Entry::parse(&data).unwrap(),
            Entry::OemNotTimestamped { ty: 0xE0, .. }
        ));

        data[2] = 0x10;
        assert!(matches!(
            Entry::parse(&data).unwrap(),
            Entry::Unknown { ty: 0x10, .. }
        ));

        assert!(matches!(
            Entry::parse(&data[..15]),
            Err(ParseError::InsufficientData {
                needed: 16,
                available: 15,
            })
        ));
    }
}
