//! Event/Reading Type Codes.
//!
//! Reference: IPMI 2.0 Specification, Table 42-1 "Event/Reading Type Code Ranges"
//! and Table 42-2 "Generic Event/Reading Type Codes"

macro_rules! generic_event_reading {
    ($($name:ident => $code:literal,)*) => {
        /// The generic discrete event/reading classes, `0x02..=0x0C`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum GenericEventReading {
            $($name,)*
        }

        impl GenericEventReading {
            pub fn from_code(code: u8) -> Option<Self> {
                match code {
                    $($code => Some(Self::$name),)*
                    _ => None,
                }
            }

            pub fn code(&self) -> u8 {
                match self {
                    $(Self::$name => $code,)*
                }
            }
        }
    };
}

generic_event_reading!(
    UsageState => 0x02,
    StateAssertion => 0x03,
    PredictiveFailure => 0x04,
    LimitExcess => 0x05,
    PerformanceMetric => 0x06,
    SeverityEvents => 0x07,
    DevicePresence => 0x08,
    DeviceEnabledStatus => 0x09,
    PowerState => 0x0A,
    RedundancyState => 0x0B,
    AcpiDevicePowerState => 0x0C,
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventReadingTypeCodes {
    Unspecified,
    Threshold,
    DiscreteGeneric(GenericEventReading),
    SensorSpecific,
    Oem(u8),
    Reserved(u8),
}

impl EventReadingTypeCodes {
    pub fn is_threshold(&self) -> bool {
        matches!(self, Self::Threshold)
    }

    /// Every class that reports individual states rather than
    /// threshold comparisons.
    pub fn is_discrete(&self) -> bool {
        matches!(
            self,
            Self::DiscreteGeneric(_) | Self::SensorSpecific | Self::Oem(_)
        )
    }

    pub fn is_generic(&self) -> bool {
        matches!(self, Self::Threshold | Self::DiscreteGeneric(_))
    }

    pub fn is_sensor_specific(&self) -> bool {
        matches!(self, Self::SensorSpecific)
    }

    pub fn is_oem(&self) -> bool {
        matches!(self, Self::Oem(_))
    }
}

impl From<u8> for EventReadingTypeCodes {
    fn from(value: u8) -> Self {
        let value = value & 0x7F;
        match value {
            0x00 => Self::Unspecified,
            0x01 => Self::Threshold,
            0x6F => Self::SensorSpecific,
            0x70..=0x7F => Self::Oem(value),
            v => GenericEventReading::from_code(v)
                .map(Self::DiscreteGeneric)
                .unwrap_or(Self::Reserved(v)),
        }
    }
}

impl From<EventReadingTypeCodes> for u8 {
    fn from(value: EventReadingTypeCodes) -> Self {
        match value {
            EventReadingTypeCodes::Unspecified => 0x00,
            EventReadingTypeCodes::Threshold => 0x01,
            EventReadingTypeCodes::DiscreteGeneric(g) => g.code(),
            EventReadingTypeCodes::SensorSpecific => 0x6F,
            EventReadingTypeCodes::Oem(v) | EventReadingTypeCodes::Reserved(v) => v,
        }
    }
}
