use crate::storage::sdr::{
    conversion::{convert_hysteresis, convert_reading, convert_tolerance},
    Linearization, ReadingFactors, ThresholdKind,
};

use super::*;

/// Nominal, normal maximum and normal minimum readings, present only when the
/// corresponding analog characteristics flag is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NormalReadings {
    pub nominal: Option<u8>,
    pub normal_maximum: Option<u8>,
    pub normal_minimum: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawThresholds {
    pub upper_non_recoverable: u8,
    pub upper_critical: u8,
    pub upper_non_critical: u8,
    pub lower_non_recoverable: u8,
    pub lower_critical: u8,
    pub lower_non_critical: u8,
}

impl RawThresholds {
    pub fn get(&self, kind: ThresholdKind) -> u8 {
        match kind {
            ThresholdKind::LowerNonCritical => self.lower_non_critical,
            ThresholdKind::LowerCritical => self.lower_critical,
            ThresholdKind::LowerNonRecoverable => self.lower_non_recoverable,
            ThresholdKind::UpperNonCritical => self.upper_non_critical,
            ThresholdKind::UpperCritical => self.upper_critical,
            ThresholdKind::UpperNonRecoverable => self.upper_non_recoverable,
        }
    }
}

/// Full Sensor Record (type `0x01`).
///
/// Reference: IPMI 2.0 Specification, Table 43-1.
#[derive(Debug, Clone, PartialEq)]
pub struct FullSensorRecord {
    common: SensorRecordCommon,
    pub linearization: Linearization,
    pub factors: ReadingFactors,
    pub direction: Direction,
    pub normal_readings: NormalReadings,
    pub max_reading: u8,
    pub min_reading: u8,
    pub thresholds: RawThresholds,
    pub positive_going_threshold_hysteresis: u8,
    pub negative_going_threshold_hysteresis: u8,
    pub oem_data: u8,
}

impl FullSensorRecord {
    /// The offset of the ID string Type/Length byte in the record body.
    const ID_OFFSET: usize = 42;

    pub fn parse(record_data: &[u8]) -> Result<Self, ParseError> {
        ParseError::ensure(record_data, Self::ID_OFFSET + 1)?;

        let (mut common, record_data_rest) = SensorRecordCommon::parse_without_id(record_data)?;

        let linearization = Linearization::from(record_data_rest[0]);

        let factors = ReadingFactors::parse(&record_data_rest[1..7])?;
        let direction = Direction::from_low_bits(record_data_rest[5]);

        let analog_characteristics = record_data_rest[7];
        let flagged = |bit: u8, value: u8| {
            ((analog_characteristics >> bit) & 1 == 1).then_some(value)
        };

        let normal_readings = NormalReadings {
            nominal: flagged(0, record_data_rest[8]),
            normal_maximum: flagged(1, record_data_rest[9]),
            normal_minimum: flagged(2, record_data_rest[10]),
        };

        let max_reading = record_data_rest[11];
        let min_reading = record_data_rest[12];

        let thresholds = RawThresholds {
            upper_non_recoverable: record_data_rest[13],
            upper_critical: record_data_rest[14],
            upper_non_critical: record_data_rest[15],
            lower_non_recoverable: record_data_rest[16],
            lower_critical: record_data_rest[17],
            lower_non_critical: record_data_rest[18],
        };

        let positive_going_threshold_hysteresis = record_data_rest[19];
        let negative_going_threshold_hysteresis = record_data_rest[20];

        // Two reserved bytes in between

        let oem_data = record_data_rest[23];

        common.set_id(parse_id_string(record_data, Self::ID_OFFSET)?);

        Ok(Self {
            common,
            linearization,
            factors,
            direction,
            normal_readings,
            max_reading,
            min_reading,
            thresholds,
            positive_going_threshold_hysteresis,
            negative_going_threshold_hysteresis,
            oem_data,
        })
    }

    fn format(&self) -> AnalogDataFormat {
        self.common.sensor_units.analog_format
    }

    /// Convert a raw reading of this sensor to engineering units.
    ///
    /// Returns `None` if the sensor does not provide analog readings.
    pub fn convert(&self, raw: u8) -> Option<f64> {
        if self.format() == AnalogDataFormat::NotAnalog {
            return None;
        }

        Some(convert_reading(raw, self.format(), &self.factors, self.linearization))
    }

    /// Convert a raw reading of this sensor, using `factors` instead of the
    /// factors stored in the record.
    ///
    /// Non-linear sensors report the applicable factors per reading.
    pub fn convert_with_factors(&self, raw: u8, factors: &ReadingFactors) -> Option<f64> {
        if self.format() == AnalogDataFormat::NotAnalog {
            return None;
        }

        Some(convert_reading(raw, self.format(), factors, self.linearization))
    }

    pub fn value(&self, raw: u8) -> Option<Value> {
        self.convert(raw)
            .map(|value| Value::new(self.common.sensor_units, value))
    }

    pub fn nominal_reading(&self) -> Option<Value> {
        let raw = self.normal_readings.nominal?;
        self.value(raw)
    }

    pub fn normal_maximum(&self) -> Option<Value> {
        let raw = self.normal_readings.normal_maximum?;
        self.value(raw)
    }

    pub fn normal_minimum(&self) -> Option<Value> {
        let raw = self.normal_readings.normal_minimum?;
        self.value(raw)
    }

    /// The maximum reading, or `None` if the record marks it as unspecified.
    pub fn max_reading(&self) -> Option<Value> {
        if self.format().max_reading_unspecified() == Some(self.max_reading) {
            None
        } else {
            self.value(self.max_reading)
        }
    }

    /// The minimum reading, or `None` if the record marks it as unspecified.
    pub fn min_reading(&self) -> Option<Value> {
        if self.format().min_reading_unspecified() == Some(self.min_reading) {
            None
        } else {
            self.value(self.min_reading)
        }
    }

    /// The converted value of threshold `kind`.
    ///
    /// Returns `None` if the threshold is not readable according to the
    /// reading mask of this record.
    pub fn threshold(&self, kind: ThresholdKind) -> Option<Value> {
        let readable = self.common.mask.readable_thresholds();
        if !readable.contains(kind.flag()) {
            return None;
        }

        self.value(self.thresholds.get(kind))
    }

    pub fn positive_going_hysteresis(&self) -> Option<f64> {
        convert_hysteresis(self.positive_going_threshold_hysteresis, &self.factors)
    }

    pub fn negative_going_hysteresis(&self) -> Option<f64> {
        convert_hysteresis(self.negative_going_threshold_hysteresis, &self.factors)
    }

    pub fn tolerance(&self) -> f64 {
        convert_tolerance(&self.factors)
    }

    pub fn accuracy_percent(&self) -> f64 {
        self.factors.accuracy_percent()
    }
}

impl WithSensorRecordCommon for FullSensorRecord {
    fn common(&self) -> &SensorRecordCommon {
        &self.common
    }
}

impl DirectionalSensor for FullSensorRecord {
    fn direction(&self) -> Direction {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sdr::{EntityId, Unit};

    /// A temperature sensor: M = 1, B = 0, unsigned, degrees Celsius.
    fn temperature_record(id: &[u8]) -> Vec<u8> {
        let mut data = vec![
            0x20, 0x00, 0x30, // key
            0x03, 0x01, // processor 1
            0x7F, 0x68, // init, caps
            0x01, 0x01, // temperature, threshold
            0x80, 0x0A, 0x80, 0x7A, 0x3F, 0x3F, // masks
            0x00, 0x01, 0x00, // units
            0x00, // linear
            0x01, 0x00, 0x00, 0x00, 0x00, 0x00, // M = 1
            0x07, // all normal readings specified
            0x28, 0x50, 0x0A, // nominal, normal max, normal min
            0xFF, 0x00, // max, min
            0x69, 0x64, 0x5F, 0x00, 0x05, 0x0A, // thresholds
            0x02, 0x02, // hysteresis
            0x00, 0x00, // reserved
            0x00, // oem
        ];
        data.push(0xC0 | id.len() as u8);
        data.extend_from_slice(id);
        data
    }

    #[test]
    fn parse_temperature_sensor() {
        let record = FullSensorRecord::parse(&temperature_record(b"CPU Temp")).unwrap();

        assert_eq!(record.id_string().as_str(), Some("CPU Temp"));
        assert_eq!(record.entity_id(), EntityId::Processor);
        assert_eq!(record.sensor_number().get(), 0x30);
        assert_eq!(*record.ty(), SensorType::Temperature);
        assert!(record.event_reading_type_codes().is_threshold());

        let units = record.common().sensor_units;
        assert_eq!(units.base_unit, Unit::DegreesCelsius);

        assert_eq!(record.nominal_reading().map(|v| v.value()), Some(40.0));
        assert_eq!(record.normal_maximum().map(|v| v.value()), Some(80.0));
        assert_eq!(record.normal_minimum().map(|v| v.value()), Some(10.0));

        // 0xFF and 0x00 are the unspecified markers for unsigned readings.
        assert_eq!(record.max_reading(), None);
        assert_eq!(record.min_reading(), None);

        let threshold = |kind| record.threshold(kind).map(|v| v.value());
        assert_eq!(threshold(ThresholdKind::UpperCritical), Some(100.0));
        assert_eq!(threshold(ThresholdKind::LowerCritical), Some(5.0));
        assert_eq!(record.positive_going_hysteresis(), Some(2.0));

        assert_eq!(record.value(0x2D).unwrap().display(true), "45.00 °C");
    }

    #[test]
    fn id_string_boundaries() {
        let mut data = temperature_record(b"");
        assert_eq!(data.len(), 43);
        let record = FullSensorRecord::parse(&data).unwrap();
        assert!(record.id_string().is_empty());

        data.pop();
        assert!(matches!(
            FullSensorRecord::parse(&data),
            Err(ParseError::InsufficientData {
                needed: 43,
                available: 42,
            })
        ));

        let mut truncated = temperature_record(b"CPU");
        truncated.pop();
        assert!(matches!(
            FullSensorRecord::parse(&truncated),
            Err(ParseError::InsufficientData {
                needed: 46,
                available: 45,
            })
        ));
    }

    #[test]
    fn not_analog() {
        let mut data = temperature_record(b"x");
        data[15] = 0xC0;
        let record = FullSensorRecord::parse(&data).unwrap();

        assert_eq!(record.convert(0x10), None);
        assert_eq!(record.nominal_reading(), None);
    }

    fn reading_range(data: &[u8]) -> (Option<f64>, Option<f64>) {
        let record = FullSensorRecord::parse(data).unwrap();
        let max = record.max_reading().map(|v| v.value());
        let min = record.min_reading().map(|v| v.value());
        (max, min)
    }

    #[test]
    fn signed_reading_range_markers() {
        let mut data = temperature_record(b"x");

        // 1's complement
        data[15] = 0x40;
        data[29] = 0x00;
        data[30] = 0xFF;
        assert_eq!(reading_range(&data), (None, None));

        data[29] = 0xFF;
        data[30] = 0x00;
        assert_eq!(reading_range(&data), (Some(0.0), Some(0.0)));

        data[29] = 0x7F;
        data[30] = 0x80;
        assert_eq!(reading_range(&data), (Some(127.0), Some(-127.0)));

        // 2's complement
        data[15] = 0x80;
        assert_eq!(reading_range(&data), (None, None));

        data[29] = 0x7E;
        data[30] = 0x81;
        assert_eq!(reading_range(&data), (Some(126.0), Some(-127.0)));

        data[29] = 0x00;
        data[30] = 0xFF;
        assert_eq!(reading_range(&data), (Some(0.0), Some(-1.0)));
    }
}
