use crate::{
    addressing::Channel,
    storage::{
        sdr::{EventReadingTypeCodes, EventSeverity, GenericEventReading, SensorType},
        sel::{EventData2, EventData3, EventDirection, EventGenerator, EventMessageRevision},
        SelEntry, Timestamp,
    },
};

use super::bytes;

#[test]
fn power_unit_redundancy_event() {
    let data = bytes("4d150290b3c66741000409010b03ffff");

    let entry = SelEntry::parse(&data).unwrap();
    assert_eq!(entry.record_id().value(), 0x154D);

    let SelEntry::System {
        timestamp,
        generator_id,
        event_message_format,
        sensor_type,
        sensor_number,
        event_direction,
        event_type,
        event_data,
        ..
    } = &entry
    else {
        panic!("Expected a system event, got {entry:?}");
    };

    assert_eq!(*timestamp, Timestamp::from(0x67C6B390));
    assert_eq!(
        *generator_id,
        EventGenerator::SoftwareId {
            software_id: 0x20,
            channel: Channel::Primary,
        }
    );
    assert_eq!(*event_message_format, EventMessageRevision::V2_0);
    assert_eq!(*sensor_type, SensorType::PowerUnit);
    assert_eq!(*sensor_number, 0x01);
    assert_eq!(*event_direction, EventDirection::Assert);
    assert_eq!(
        *event_type,
        EventReadingTypeCodes::DiscreteGeneric(GenericEventReading::RedundancyState)
    );
    assert_eq!(event_data.offset, 0x03);
    assert_eq!(event_data.data2, EventData2::Unspecified);
    assert_eq!(event_data.data3, EventData3::Unspecified);

    let description = entry.description().unwrap();
    assert_eq!(
        description.description,
        "Non-redundant: Sufficient Resources from Redundant"
    );
    assert_eq!(description.severity, EventSeverity::Critical);
}

#[cfg(feature = "time")]
#[test]
fn logged_entry() {
    use crate::Logger;

    let entry = SelEntry::parse(&bytes("4d150290b3c66741000409010b03ffff")).unwrap();
    let lines = Logger::lines(&entry);

    assert_eq!(lines[0], "SEL entry");
    assert!(lines
        .iter()
        .any(|line| line.ends_with("2025-03-04T08:02:24Z")));
    assert!(lines.iter().any(|line| line.ends_with("Critical")));
}

#[test]
fn short_entry() {
    let data = bytes("4d150290b3c66741000409010b03ff");
    assert!(SelEntry::parse(&data).is_err());
}
