use crate::{
    sensor_event::RawSensorReading,
    storage::{
        sdr::{
            record::RecordContents, EntityId, EventSeverity, MaskView, RecordId, SdrWalker,
            SensorType, ThresholdKind, Thresholds, Unit,
        },
        SdrRecord,
    },
    IdentifiableSensor, InstancedSensor, ParseError, WithSensorRecordCommon,
};

use super::bytes;

const CPU_TEMP: &str = "010051013320003003017f680101800a807a3f3f000100000100000000000728500aff0069645f00050a0202000000c84350552054656d70";

const NO_ID: &str = "020051012b20003003017f680101800a807a3f3f000100000100000000000728500aff0069645f00050a0202000000c0";

#[test]
fn full_sensor_record() {
    let record = SdrRecord::parse(&bytes(CPU_TEMP)).unwrap();

    assert_eq!(record.header.id, RecordId::new_raw(1));
    assert_eq!(record.header.sdr_version_major, 1);
    assert_eq!(record.header.sdr_version_minor, 5);
    assert_eq!(record.id().and_then(|id| id.as_str()), Some("CPU Temp"));
    assert_eq!(record.sensor_number().map(|n| n.get()), Some(0x30));

    let RecordContents::FullSensor(full) = &record.contents else {
        panic!("Expected a full sensor record");
    };

    assert_eq!(full.entity_id(), EntityId::Processor);
    assert_eq!(*full.ty(), SensorType::Temperature);
    assert_eq!(full.common().sensor_units.base_unit, Unit::DegreesCelsius);
    assert_eq!(
        full.threshold(ThresholdKind::UpperNonCritical)
            .map(|v| v.value()),
        Some(95.0)
    );

    let MaskView::Threshold(mask) = full.mask_view() else {
        panic!("Expected a threshold mask");
    };
    assert_eq!(mask.readable, Thresholds::all());
    assert_eq!(
        full.describe_offset(0x09).map(|d| d.severity),
        Some(EventSeverity::Critical)
    );
}

#[test]
fn full_sensor_length_boundary() {
    let data = bytes(NO_ID);
    assert_eq!(data.len(), 48);

    let record = SdrRecord::parse(&data).unwrap();
    assert!(record.id().map_or(false, |id| id.is_empty()));

    assert!(matches!(
        SdrRecord::parse(&data[..47]),
        Err(ParseError::InsufficientData {
            needed: 48,
            available: 47,
        })
    ));

    // A declared length that leaves out the ID string byte.
    let mut short = data[..47].to_vec();
    short[4] = 0x2A;
    assert!(matches!(
        SdrRecord::parse(&short),
        Err(ParseError::InsufficientData {
            needed: 43,
            available: 42,
        })
    ));
}

#[test]
fn reading_through_record() {
    let record = SdrRecord::parse(&bytes(CPU_TEMP)).unwrap();
    let full = record.full_sensor().unwrap();

    let raw = RawSensorReading::parse(&[0x2D, 0xC0, 0x00]).unwrap();
    let reading = raw.threshold();
    let value = reading.value(full).unwrap();

    assert_eq!(value.value(), 45.0);
    assert_eq!(value.display(true), "45.00 °C");
    assert!(!reading.is_crossed(ThresholdKind::UpperCritical));
}

#[test]
fn walk_repository() {
    let first = bytes(CPU_TEMP);
    let second = bytes(NO_ID);

    let fetch = |id: RecordId| -> Result<Vec<u8>, ParseError> {
        let (next, record) = match id.value() {
            0x0000 => (0x0002u16, &first),
            0x0002 => (0xFFFF, &second),
            other => panic!("Unexpected record 0x{other:04X}"),
        };

        let mut data = next.to_le_bytes().to_vec();
        data.extend_from_slice(record);
        Ok(data)
    };

    let records: Vec<_> = SdrWalker::new(fetch).collect::<Result<_, _>>().unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].header.id, RecordId::new_raw(2));
}
