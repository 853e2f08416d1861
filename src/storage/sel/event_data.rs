//! Event data fields of system event records.
//!
//! Reference: IPMI 2.0 Specification, Section 29.7 "Event Data Field Formats"

use core::fmt;

use nonmax::NonMaxU8;

/// Contents of event data 2, selected by event data 1 bits [7:6].
///
/// `0xFF` is the "unspecified" value, so specified contents are `NonMaxU8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventData2 {
    Unspecified,
    TriggerReading(NonMaxU8),
    OemCode(NonMaxU8),
    SensorSpecific(NonMaxU8),
}

/// Contents of event data 3, selected by event data 1 bits [5:4].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventData3 {
    Unspecified,
    TriggerThreshold(NonMaxU8),
    OemCode(NonMaxU8),
    SensorSpecific(NonMaxU8),
}

impl EventData2 {
    fn parse(kind: u8, value: u8) -> Self {
        let Some(value) = NonMaxU8::new(value) else {
            return Self::Unspecified;
        };

        match kind & 0b11 {
            0b01 => Self::TriggerReading(value),
            0b10 => Self::OemCode(value),
            0b11 => Self::SensorSpecific(value),
            _ => Self::Unspecified,
        }
    }
}

impl EventData3 {
    fn parse(kind: u8, value: u8) -> Self {
        let Some(value) = NonMaxU8::new(value) else {
            return Self::Unspecified;
        };

        match kind & 0b11 {
            0b01 => Self::TriggerThreshold(value),
            0b10 => Self::OemCode(value),
            0b11 => Self::SensorSpecific(value),
            _ => Self::Unspecified,
        }
    }
}

impl fmt::Display for EventData2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TriggerReading(value) => write!(f, "reading=0x{:02X}", value.get()),
            Self::OemCode(value) => write!(f, "oem2=0x{:02X}", value.get()),
            Self::SensorSpecific(value) => write!(f, "ext2=0x{:02X}", value.get()),
            Self::Unspecified => Ok(()),
        }
    }
}

impl fmt::Display for EventData3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TriggerThreshold(value) => write!(f, "threshold=0x{:02X}", value.get()),
            Self::OemCode(value) => write!(f, "oem3=0x{:02X}", value.get()),
            Self::SensorSpecific(value) => write!(f, "ext3=0x{:02X}", value.get()),
            Self::Unspecified => Ok(()),
        }
    }
}

/// The decoded 3-byte event data field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventData {
    /// Event offset, bits [3:0] of event data 1.
    pub offset: u8,
    pub data2: EventData2,
    pub data3: EventData3,
    pub raw: [u8; 3],
}

impl EventData {
    pub fn parse(data: [u8; 3]) -> Self {
        Self {
            offset: data[0] & 0x0F,
            data2: EventData2::parse(data[0] >> 6, data[1]),
            data3: EventData3::parse(data[0] >> 4, data[2]),
            raw: data,
        }
    }
}

impl fmt::Display for EventData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "offset=0x{:X}", self.offset)?;

        if self.data2 != EventData2::Unspecified {
            write!(f, " {}", self.data2)?;
        }

        if self.data3 != EventData3::Unspecified {
            write!(f, " {}", self.data3)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_event_data() {
        let data = EventData::parse([0x59, 0x5A, 0x50]);

        assert_eq!(data.offset, 0x09);

        let reading = NonMaxU8::new(0x5A).unwrap();
        let threshold = NonMaxU8::new(0x50).unwrap();
        assert_eq!(data.data2, EventData2::TriggerReading(reading));
        assert_eq!(data.data3, EventData3::TriggerThreshold(threshold));
        assert_eq!(data.to_string(), "offset=0x9 reading=0x5A threshold=0x50");
    }

    #[test]
    fn unspecified_bytes() {
        let data = EventData::parse([0xF3, 0xFF, 0xFF]);

        assert_eq!(data.offset, 0x03);
        assert_eq!(data.data2, EventData2::Unspecified);
        assert_eq!(data.data3, EventData3::Unspecified);
        assert_eq!(data.to_string(), "offset=0x3");
    }
}
