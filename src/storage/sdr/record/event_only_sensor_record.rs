use super::*;

/// Event-Only Sensor Record (type `0x03`).
///
/// Describes a sensor that only generates events and cannot be read.
///
/// Reference: IPMI 2.0 Specification, Table 43-3.
#[derive(Debug, Clone, PartialEq)]
pub struct EventOnlySensorRecord {
    pub key: SensorKey,
    pub entity_id: EntityId,
    pub entity_instance: EntityInstance,
    pub ty: SensorType,
    pub event_reading_type_code: EventReadingTypeCodes,
    pub record_sharing: RecordSharing,
    pub oem_data: u8,
    pub id_string: SensorId,
}

impl EventOnlySensorRecord {
    const ID_OFFSET: usize = 11;

    pub fn parse(record_data: &[u8]) -> Result<Self, ParseError> {
        ParseError::ensure(record_data, Self::ID_OFFSET + 1)?;

        let key = SensorKey::parse(record_data)?;

        let entity_id = EntityId::from(record_data[3]);
        let entity_instance = EntityInstance::from(record_data[4]);

        let ty = SensorType::from(record_data[5]);
        let event_reading_type_code = EventReadingTypeCodes::from(record_data[6]);

        let record_sharing = RecordSharing::parse(record_data[7], record_data[8]);

        // One reserved byte

        let oem_data = record_data[10];

        let id_string = parse_id_string(record_data, Self::ID_OFFSET)?;

        Ok(Self {
            key,
            entity_id,
            entity_instance,
            ty,
            event_reading_type_code,
            record_sharing,
            oem_data,
            id_string,
        })
    }

    pub fn id_string(&self) -> &SensorId {
        &self.id_string
    }
}

impl DirectionalSensor for EventOnlySensorRecord {
    fn direction(&self) -> Direction {
        self.record_sharing.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        let data = [
            0x20, 0x00, 0x52, 0x03, 0x00, 0x07, 0x6F, 0x41, 0x00, 0x00, 0x00, 0xC4, b'C', b'P',
            b'U', b'0',
        ];

        let record = EventOnlySensorRecord::parse(&data).unwrap();
        assert_eq!(record.key.sensor_number.get(), 0x52);
        assert_eq!(record.entity_id, EntityId::Processor);
        assert_eq!(record.ty, SensorType::Processor);
        assert_eq!(record.direction(), Direction::Input);
        assert_eq!(record.record_sharing.share_count, 1);
        assert_eq!(record.id_string().as_str(), Some("CPU0"));

        assert!(matches!(
            EventOnlySensorRecord::parse(&data[..11]),
            Err(ParseError::InsufficientData {
                needed: 12,
                available: 11,
            })
        ));
    }
}
