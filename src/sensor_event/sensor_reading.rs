use crate::{
    fmt::{LogItem, Loggable},
    storage::sdr::{
        event_description, record::FullSensorRecord, record::Value, DiscreteStates,
        EventDescription, EventReadingTypeCodes, SensorType, ThresholdKind, Thresholds,
    },
    ParseError,
};

/// The response data of a Get Sensor Reading command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSensorReading {
    pub reading: u8,
    pub all_event_messages_disabled: bool,
    pub scanning_disabled: bool,
    pub reading_or_state_unavailable: bool,
    pub offset_data_1: Option<u8>,
    pub offset_data_2: Option<u8>,
}

impl RawSensorReading {
    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        ParseError::ensure(data, 2)?;

        let reading = data[0];

        // Bit indicates that all event messages are enabled => must negate result
        let all_event_messages_disabled = (data[1] & 0x80) != 0x80;

        // Bit indicates that sensor scanning is enabled => must negate result
        let scanning_disabled = (data[1] & 0x40) != 0x40;

        let reading_or_state_unavailable = (data[1] & 0x20) == 0x20;

        let offset_data_1 = data.get(2).copied();
        let offset_data_2 = data.get(3).copied();

        Ok(Self {
            reading,
            all_event_messages_disabled,
            scanning_disabled,
            reading_or_state_unavailable,
            offset_data_1,
            offset_data_2,
        })
    }

    /// Interpret this reading as the reading of a threshold sensor.
    pub fn threshold(&self) -> ThresholdReading {
        ThresholdReading::from(self)
    }

    /// Interpret this reading as the reading of a discrete sensor.
    pub fn discrete(&self) -> DiscreteReading {
        DiscreteReading::from(self)
    }
}

impl Loggable for RawSensorReading {
    fn as_log(&self) -> Vec<LogItem> {
        let mut log = log_vec![
            (0, "Sensor reading"),
            (1, "Raw reading", format!("0x{:02X}", self.reading)),
            (
                1,
                "Event messages disabled",
                self.all_event_messages_disabled,
            ),
            (1, "Scanning disabled", self.scanning_disabled),
            (1, "Unavailable", self.reading_or_state_unavailable),
        ];

        if let Some(data) = self.offset_data_1 {
            log.push((1, "State byte 1", format!("0x{:02X}", data)).into());
        }

        if let Some(data) = self.offset_data_2 {
            log.push((1, "State byte 2", format!("0x{:02X}", data)).into());
        }

        log
    }
}

/// The reading of a threshold based sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdReading {
    pub all_event_messages_disabled: bool,
    pub scanning_disabled: bool,
    /// The raw reading, `None` if the sensor reports it as unavailable.
    pub reading: Option<u8>,
    /// The thresholds that the reading is at or beyond.
    pub threshold_status: Option<Thresholds>,
}

impl From<&RawSensorReading> for ThresholdReading {
    fn from(in_reading: &RawSensorReading) -> Self {
        let available = !in_reading.reading_or_state_unavailable;

        // Bits [5:0] share their layout with the threshold reading mask.
        let threshold_status = in_reading
            .offset_data_1
            .filter(|_| available)
            .map(|d| Thresholds::from_bits_truncate(d & 0x3F));

        Self {
            all_event_messages_disabled: in_reading.all_event_messages_disabled,
            scanning_disabled: in_reading.scanning_disabled,
            reading: available.then_some(in_reading.reading),
            threshold_status,
        }
    }
}

impl ThresholdReading {
    /// Whether the reading is at or beyond threshold `kind`.
    pub fn is_crossed(&self, kind: ThresholdKind) -> bool {
        self.threshold_status
            .map_or(false, |status| status.contains(kind.flag()))
    }

    /// The reading converted with the factors of `sensor`.
    pub fn value(&self, sensor: &FullSensorRecord) -> Option<Value> {
        self.reading.and_then(|raw| sensor.value(raw))
    }
}

/// The reading of a discrete sensor: up to 15 asserted states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscreteReading {
    pub all_event_messages_disabled: bool,
    pub scanning_disabled: bool,
    /// The asserted states, `None` if the sensor reports them as unavailable.
    pub states: Option<DiscreteStates>,
}

impl From<&RawSensorReading> for DiscreteReading {
    fn from(in_reading: &RawSensorReading) -> Self {
        let states = if in_reading.reading_or_state_unavailable {
            None
        } else {
            in_reading.offset_data_1.map(|low| {
                let high = in_reading.offset_data_2.unwrap_or(0);
                DiscreteStates::from_bits(u16::from_le_bytes([low, high]))
            })
        };

        Self {
            all_event_messages_disabled: in_reading.all_event_messages_disabled,
            scanning_disabled: in_reading.scanning_disabled,
            states,
        }
    }
}

impl DiscreteReading {
    /// Describe the asserted states of a sensor with the given event/reading
    /// type and sensor type. States without a known description are skipped.
    pub fn descriptions(
        &self,
        event_reading_type: EventReadingTypeCodes,
        sensor_type: SensorType,
    ) -> Vec<EventDescription> {
        self.states
            .iter()
            .flat_map(|states| states.offsets())
            .filter_map(|offset| event_description(event_reading_type, sensor_type, offset))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sdr::EventSeverity;

    #[test]
    fn flags() {
        let reading = RawSensorReading::parse(&[0x2D, 0xC0]).unwrap();

        assert_eq!(reading.reading, 0x2D);
        assert!(!reading.all_event_messages_disabled);
        assert!(!reading.scanning_disabled);
        assert!(!reading.reading_or_state_unavailable);
        assert_eq!(reading.offset_data_1, None);

        let reading = RawSensorReading::parse(&[0x00, 0x20, 0x12]).unwrap();
        assert!(reading.all_event_messages_disabled);
        assert!(reading.scanning_disabled);
        assert!(reading.reading_or_state_unavailable);

        let threshold = reading.threshold();
        assert_eq!(threshold.reading, None);
        assert_eq!(threshold.threshold_status, None);
        assert_eq!(reading.discrete().states, None);

        assert!(matches!(
            RawSensorReading::parse(&[0x00]),
            Err(ParseError::InsufficientData {
                needed: 2,
                available: 1,
            })
        ));
    }

    #[test]
    fn threshold_status() {
        // At or below lower critical and lower non-critical.
        let raw = RawSensorReading::parse(&[0x03, 0xC0, 0xC3]).unwrap();
        let reading = raw.threshold();

        assert_eq!(reading.reading, Some(0x03));
        assert!(reading.is_crossed(ThresholdKind::LowerNonCritical));
        assert!(reading.is_crossed(ThresholdKind::LowerCritical));
        assert!(!reading.is_crossed(ThresholdKind::LowerNonRecoverable));
        assert!(!reading.is_crossed(ThresholdKind::UpperNonRecoverable));

        let raw = RawSensorReading::parse(&[0xF0, 0xC0, 0x38]).unwrap();
        let reading = raw.threshold();
        assert_eq!(
            reading.threshold_status,
            Some(
                Thresholds::UPPER_NON_CRITICAL
                    | Thresholds::UPPER_CRITICAL
                    | Thresholds::UPPER_NON_RECOVERABLE
            )
        );
    }

    #[test]
    fn discrete_states() {
        let reading = RawSensorReading::parse(&[0x00, 0xC0, 0x01, 0x81])
            .unwrap()
            .discrete();

        let states = reading.states.unwrap();
        assert_eq!(states.offsets().collect::<Vec<_>>(), vec![0, 8]);

        let descriptions = reading.descriptions(
            EventReadingTypeCodes::SensorSpecific,
            SensorType::PowerSupply,
        );
        assert_eq!(descriptions[0].description, "Presence detected");
        assert_eq!(descriptions[0].severity, EventSeverity::Info);
    }
}
