use super::*;

/// Compact Sensor Record (type `0x02`).
///
/// Compact records carry no conversion factors or thresholds. A single
/// record may describe several sensors, see [`RecordSharing`].
///
/// Reference: IPMI 2.0 Specification, Table 43-2.
#[derive(Debug, Clone, PartialEq)]
pub struct CompactSensorRecord {
    common: SensorRecordCommon,
    pub record_sharing: RecordSharing,
    pub positive_going_threshold_hysteresis: u8,
    pub negative_going_threshold_hysteresis: u8,
    pub oem_data: u8,
}

impl CompactSensorRecord {
    const ID_OFFSET: usize = 26;

    pub fn parse(record_data: &[u8]) -> Result<Self, ParseError> {
        ParseError::ensure(record_data, Self::ID_OFFSET + 1)?;

        let (mut common, record_data_rest) = SensorRecordCommon::parse_without_id(record_data)?;

        let record_sharing = RecordSharing::parse(record_data_rest[0], record_data_rest[1]);

        let positive_going_threshold_hysteresis = record_data_rest[2];
        let negative_going_threshold_hysteresis = record_data_rest[3];

        // Three reserved bytes

        let oem_data = record_data_rest[7];

        common.set_id(parse_id_string(record_data, Self::ID_OFFSET)?);

        Ok(Self {
            common,
            record_sharing,
            positive_going_threshold_hysteresis,
            negative_going_threshold_hysteresis,
            oem_data,
        })
    }
}

impl WithSensorRecordCommon for CompactSensorRecord {
    fn common(&self) -> &SensorRecordCommon {
        &self.common
    }
}

impl DirectionalSensor for CompactSensorRecord {
    fn direction(&self) -> Direction {
        self.record_sharing.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        let mut data = vec![
            0x20, 0x00, 0x40, // key
            0x07, 0x01, // system board
            0x63, 0x40, // init, caps
            0x08, 0x6F, // power supply, sensor specific
            0x01, 0x00, 0x00, 0x00, 0x01, 0x00, // masks
            0xC0, 0x00, 0x00, // not analog
            0b1000_0010, 0x01, // output, numeric, 2 sensors
            0x00, 0x00, // hysteresis
            0x00, 0x00, 0x00, // reserved
            0x00, // oem
        ];
        data.push(0xC3);
        data.extend_from_slice(b"PSU");

        let record = CompactSensorRecord::parse(&data).unwrap();

        assert_eq!(record.id_string().as_str(), Some("PSU"));
        assert_eq!(*record.ty(), SensorType::PowerSupply);
        assert!(record.event_reading_type_codes().is_sensor_specific());
        assert_eq!(record.direction(), Direction::Output);
        assert_eq!(
            record.record_sharing.id_string_modifier,
            IdStringModifier::Numeric
        );
        assert_eq!(record.record_sharing.share_count, 2);
        assert_eq!(record.record_sharing.modifier_offset, 1);
        assert_eq!(
            record.common().sensor_units.analog_format,
            AnalogDataFormat::NotAnalog
        );

        data.truncate(26);
        assert!(matches!(
            CompactSensorRecord::parse(&data),
            Err(ParseError::InsufficientData {
                needed: 27,
                available: 26,
            })
        ));
    }
}
