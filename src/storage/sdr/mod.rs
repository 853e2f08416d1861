//! Sensor Data Records.
//!
//! Reference: IPMI 2.0 Specification, Section 43 "Sensor Data Record Formats"

mod get_sdr;
pub use get_sdr::{RecordInfo as SdrRecordInfo, SdrWalker};

pub mod record;
pub use record::{Record, RecordContents, RecordHeader, RecordType};

pub mod conversion;
pub use conversion::{
    convert_hysteresis, convert_reading, convert_tolerance, AnalogDataFormat, Linearization,
    ReadingFactors,
};

pub mod mask;
pub use mask::{
    AssertionLowerMask, DeassertionUpperMask, DiscreteMask, DiscreteStates, EventSlope, Mask,
    MaskView, ReadingMask, SupportedThresholdEvents, ThresholdEvent, ThresholdEvents,
    ThresholdKind, ThresholdMask, Thresholds,
};

pub mod event_reading_type_code;
pub use event_reading_type_code::{EventReadingTypeCodes, GenericEventReading};

mod sensor_type;
pub use sensor_type::SensorType;

mod entity;
pub use entity::EntityId;

mod device_type;
pub use device_type::DeviceType;

mod event_offset;
pub use event_offset::{event_description, EventDescription, EventSeverity};

mod units;
pub use units::{IsPlural, Unit};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(u16);

impl RecordId {
    pub const FIRST: Self = Self(0);
    pub const LAST: Self = Self(0xFFFF);

    pub fn new_raw(value: u16) -> Self {
        Self(value)
    }

    pub fn is_first(&self) -> bool {
        self.0 == Self::FIRST.0
    }

    pub fn is_last(&self) -> bool {
        self.0 == Self::LAST.0
    }

    pub fn value(&self) -> u16 {
        self.0
    }
}
