//! SDR record header, record dispatch and the fields shared by sensor records.
//!
//! Reference: IPMI 2.0 Specification, Section 43 and Tables 43-1 to 43-3.

mod full_sensor_record;
pub use full_sensor_record::{FullSensorRecord, NormalReadings, RawThresholds};

mod compact_sensor_record;
pub use compact_sensor_record::CompactSensorRecord;

mod event_only_sensor_record;
pub use event_only_sensor_record::EventOnlySensorRecord;

mod entity_association;
pub use entity_association::{
    ContainedEntities, ContainedEntity, DeviceRelativeEntity, DeviceRelativeEntityAssociation,
    EntityAssociation, EntityAssociationFlags,
};

mod generic_device_locator;
pub use generic_device_locator::{GenericDeviceLocator, GenericDeviceRecordKey};

mod fru_device_locator;
pub use fru_device_locator::{FruDeviceKind, FruDeviceLocator, FruRecordKey};

mod mc_device_locator;
pub use mc_device_locator::{
    DeviceCapabilities, GlobalInitialization, McDeviceLocator, McRecordKey,
};

mod mc_confirmation;
pub use mc_confirmation::McConfirmation;

mod bmc_channel_info;
pub use bmc_channel_info::{BmcChannelInfo, ChannelInfo};

mod oem;
pub use oem::OemRecord;

mod traits;
pub use traits::*;

use nonmax::NonMaxU8;

use crate::{
    addressing::{Channel, LogicalUnit},
    fmt::{LogItem, Loggable},
    type_length::{TypeLength, TypeLengthString},
    ParseError,
};

use super::{
    mask::Mask, AnalogDataFormat, EntityId, EventReadingTypeCodes, RecordId, SensorType,
    Thresholds, Unit,
};

/// The decoded ID string of a record.
pub type SensorId = TypeLengthString;

/// Decode the Type/Length byte at `offset` and the ID string that follows it.
///
/// Bytes after the ID string are ignored.
pub(crate) fn parse_id_string(record_data: &[u8], offset: usize) -> Result<SensorId, ParseError> {
    let type_length = TypeLength::new(crate::bits::u8_at(record_data, offset)?);

    let start = offset + 1;
    let end = start + type_length.length();
    ParseError::ensure(record_data, end)?;

    type_length.decode(&record_data[start..end])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SensorNumber(pub NonMaxU8);

impl SensorNumber {
    pub fn new(value: NonMaxU8) -> Self {
        Self(value)
    }

    pub fn get(&self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for SensorNumber {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        NonMaxU8::new(value)
            .map(Self)
            .ok_or(ParseError::ReservedSensorNumber)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorOwner {
    I2C(u8),
    System(u8),
}

impl From<u8> for SensorOwner {
    fn from(value: u8) -> Self {
        let id = (value & 0xFE) >> 1;

        if (value & 1) == 1 {
            Self::System(id)
        } else {
            Self::I2C(id)
        }
    }
}

impl From<SensorOwner> for u8 {
    fn from(value: SensorOwner) -> Self {
        match value {
            SensorOwner::I2C(id) => (id << 1) & 0xFE,
            SensorOwner::System(id) => ((id << 1) & 0xFE) | 1,
        }
    }
}

impl core::fmt::Display for SensorOwner {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SensorOwner::I2C(addr) => write!(f, "I2C @ 0x{:02X}", addr),
            SensorOwner::System(addr) => write!(f, "System @ 0x{:02X}", addr),
        }
    }
}

/// The record key of full, compact and event-only sensor records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorKey {
    pub owner_id: SensorOwner,
    pub owner_channel: Channel,
    pub fru_inv_device_owner_lun: LogicalUnit,
    pub owner_lun: LogicalUnit,
    pub sensor_number: SensorNumber,
}

impl SensorKey {
    pub const SIZE: usize = 3;

    pub fn parse(record_data: &[u8]) -> Result<Self, ParseError> {
        ParseError::ensure(record_data, Self::SIZE)?;

        let owner_id = SensorOwner::from(record_data[0]);
        let owner_channel_fru_lun = record_data[1];
        let owner_channel = Channel::from_low_bits(owner_channel_fru_lun >> 4);
        let fru_inv_device_owner_lun = LogicalUnit::from_low_bits(owner_channel_fru_lun >> 2);
        let owner_lun = LogicalUnit::from_low_bits(owner_channel_fru_lun);

        let sensor_number = SensorNumber::try_from(record_data[2])?;

        Ok(Self {
            owner_id,
            owner_channel,
            fru_inv_device_owner_lun,
            owner_lun,
            sensor_number,
        })
    }

    fn log_into(&self, level: usize, log: &mut Vec<LogItem>) {
        log.push((level, "Sensor owner", self.owner_id).into());
        log.push((level, "Owner channel", self.owner_channel).into());
        log.push((level, "Owner LUN", self.owner_lun.value()).into());
        log.push((level, "Sensor number", self.sensor_number.get()).into());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRelativeTo {
    System,
    Device,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityInstance {
    Physical {
        relative: EntityRelativeTo,
        instance_number: u8,
    },
    LogicalContainer {
        relative: EntityRelativeTo,
        instance_number: u8,
    },
}

impl From<u8> for EntityInstance {
    fn from(value: u8) -> Self {
        let instance_number = value & 0x7F;
        let relative = if instance_number < 0x60 {
            EntityRelativeTo::System
        } else {
            EntityRelativeTo::Device
        };

        if (value & 0x80) == 0x80 {
            Self::LogicalContainer {
                relative,
                instance_number,
            }
        } else {
            Self::Physical {
                relative,
                instance_number,
            }
        }
    }
}

impl EntityInstance {
    pub fn instance_number(&self) -> u8 {
        match self {
            Self::Physical {
                instance_number, ..
            }
            | Self::LogicalContainer {
                instance_number, ..
            } => *instance_number,
        }
    }
}

bitflags::bitflags! {
    struct InitializationFlags: u8 {
        const SETTABLE = 1 << 7;
        const SCANNING = 1 << 6;
        const EVENTS = 1 << 5;
        const THRESHOLDS = 1 << 4;
        const HYSTERESIS = 1 << 3;
        const TYPE = 1 << 2;
        const EVENTGEN_ON_STARTUP = 1 << 1;
        const SCANNING_ON_STARTUP = 1 << 0;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SensorInitialization {
    pub settable: bool,
    pub scanning: bool,
    pub events: bool,
    pub thresholds: bool,
    pub hysteresis: bool,
    pub sensor_type: bool,
    pub event_generation_enabled_on_startup: bool,
    pub sensor_scanning_enabled_on_startup: bool,
}

impl From<u8> for SensorInitialization {
    fn from(value: u8) -> Self {
        let flags = InitializationFlags::from_bits_truncate(value);

        Self {
            settable: flags.contains(InitializationFlags::SETTABLE),
            scanning: flags.contains(InitializationFlags::SCANNING),
            events: flags.contains(InitializationFlags::EVENTS),
            thresholds: flags.contains(InitializationFlags::THRESHOLDS),
            hysteresis: flags.contains(InitializationFlags::HYSTERESIS),
            sensor_type: flags.contains(InitializationFlags::TYPE),
            event_generation_enabled_on_startup: flags
                .contains(InitializationFlags::EVENTGEN_ON_STARTUP),
            sensor_scanning_enabled_on_startup: flags
                .contains(InitializationFlags::SCANNING_ON_STARTUP),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HysteresisCapability {
    NoneOrUnspecified,
    Readable,
    ReadableAndSettable,
    FixedAndUnreadable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdAccessCapability {
    None,
    Readable {
        readable: Thresholds,
    },
    ReadableAndSettable {
        readable: Thresholds,
        settable: Thresholds,
    },
    FixedAndUnreadable {
        supported: Thresholds,
    },
}

impl ThresholdAccessCapability {
    pub fn readable(&self, kind: super::ThresholdKind) -> bool {
        match self {
            Self::Readable { readable } | Self::ReadableAndSettable { readable, .. } => {
                readable.contains(kind.flag())
            }
            _ => false,
        }
    }

    pub fn settable(&self, kind: super::ThresholdKind) -> bool {
        match self {
            Self::ReadableAndSettable { settable, .. } => settable.contains(kind.flag()),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventMessageControl {
    PerThresholdOrState,
    EntireSensorOnly,
    GlobalDisableOnly,
    NoEvents,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorCapabilities {
    pub ignore: bool,
    pub auto_rearm: bool,
    pub event_message_control: EventMessageControl,
    pub hysteresis: HysteresisCapability,
    pub threshold_access: ThresholdAccessCapability,
}

impl SensorCapabilities {
    pub fn new(caps: u8, mask: &Mask) -> Self {
        let ignore = (caps & 0x80) == 0x80;
        let auto_rearm = (caps & 0x40) == 0x40;

        let hysteresis = match (caps >> 4) & 0b11 {
            0b00 => HysteresisCapability::NoneOrUnspecified,
            0b01 => HysteresisCapability::Readable,
            0b10 => HysteresisCapability::ReadableAndSettable,
            _ => HysteresisCapability::FixedAndUnreadable,
        };

        let readable = mask.readable_thresholds();
        let threshold_access = match (caps >> 2) & 0b11 {
            0b00 => ThresholdAccessCapability::None,
            0b01 => ThresholdAccessCapability::Readable { readable },
            0b10 => ThresholdAccessCapability::ReadableAndSettable {
                readable,
                settable: mask.settable_thresholds(),
            },
            _ => ThresholdAccessCapability::FixedAndUnreadable {
                supported: readable,
            },
        };

        let event_message_control = match caps & 0b11 {
            0b00 => EventMessageControl::PerThresholdOrState,
            0b01 => EventMessageControl::EntireSensorOnly,
            0b10 => EventMessageControl::GlobalDisableOnly,
            _ => EventMessageControl::NoEvents,
        };

        Self {
            ignore,
            auto_rearm,
            event_message_control,
            hysteresis,
            threshold_access,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateUnit {
    Microsecond,
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
}

impl RateUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Microsecond => "µs",
            Self::Millisecond => "ms",
            Self::Second => "s",
            Self::Minute => "min",
            Self::Hour => "h",
            Self::Day => "d",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierUnit {
    BaseUnitDivByModifier(Unit),
    BaseUnitMulByModifier(Unit),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorUnits {
    pub analog_format: AnalogDataFormat,
    pub rate: Option<RateUnit>,
    pub modifier: Option<ModifierUnit>,
    pub is_percentage: bool,
    pub base_unit: Unit,
}

impl SensorUnits {
    pub fn from(sensor_units_1: u8, base_unit: u8, modifier_unit: u8) -> Self {
        let analog_format = AnalogDataFormat::from_sensor_units_1(sensor_units_1);

        let rate = match (sensor_units_1 >> 3) & 0b111 {
            0b001 => Some(RateUnit::Microsecond),
            0b010 => Some(RateUnit::Millisecond),
            0b011 => Some(RateUnit::Second),
            0b100 => Some(RateUnit::Minute),
            0b101 => Some(RateUnit::Hour),
            0b110 => Some(RateUnit::Day),
            _ => None,
        };

        let base_unit = Unit::from(base_unit);
        let modifier_unit = Unit::from(modifier_unit);

        let modifier = match (sensor_units_1 >> 1) & 0b11 {
            0b01 => Some(ModifierUnit::BaseUnitDivByModifier(modifier_unit)),
            0b10 => Some(ModifierUnit::BaseUnitMulByModifier(modifier_unit)),
            _ => None,
        };

        let is_percentage = (sensor_units_1 & 0x1) == 0x1;

        Self {
            analog_format,
            rate,
            modifier,
            is_percentage,
            base_unit,
        }
    }
}

/// A converted reading together with the units of its sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Value {
    units: SensorUnits,
    value: f64,
}

impl Value {
    pub fn new(units: SensorUnits, value: f64) -> Self {
        Self { units, value }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn units(&self) -> &SensorUnits {
        &self.units
    }

    pub fn display(&self, short: bool) -> String {
        if self.units.is_percentage {
            return format!("{:.2} %", self.value);
        }

        let mut out = self.units.base_unit.display(short, self.value);

        let unit_label = |unit: Unit| {
            unit.symbol()
                .filter(|_| short)
                .unwrap_or_else(|| unit.name(false))
        };

        match self.units.modifier {
            Some(ModifierUnit::BaseUnitDivByModifier(unit)) => {
                out.push('/');
                out.push_str(unit_label(unit));
            }
            Some(ModifierUnit::BaseUnitMulByModifier(unit)) => {
                out.push('*');
                out.push_str(unit_label(unit));
            }
            None => {}
        }

        if let Some(rate) = self.units.rate {
            out.push('/');
            out.push_str(rate.symbol());
        }

        out
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    UnspecifiedNotApplicable,
    Input,
    Output,
    Reserved,
}

impl Direction {
    pub fn from_low_bits(value: u8) -> Self {
        match value & 0b11 {
            0b00 => Self::UnspecifiedNotApplicable,
            0b01 => Self::Input,
            0b10 => Self::Output,
            _ => Self::Reserved,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdStringModifier {
    Numeric,
    Alpha,
    Reserved(u8),
}

/// Sensor record sharing, as used by compact and event-only sensor records.
///
/// A shared record describes `share_count` sensors with consecutive sensor
/// numbers. Their ID strings get a suffix derived from `modifier_offset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordSharing {
    pub direction: Direction,
    pub id_string_modifier: IdStringModifier,
    pub share_count: u8,
    pub entity_instance_increments: bool,
    pub modifier_offset: u8,
}

impl RecordSharing {
    pub fn parse(sharing_1: u8, sharing_2: u8) -> Self {
        let id_string_modifier = match (sharing_1 >> 4) & 0b11 {
            0b00 => IdStringModifier::Numeric,
            0b01 => IdStringModifier::Alpha,
            v => IdStringModifier::Reserved(v),
        };

        Self {
            direction: Direction::from_low_bits(sharing_1 >> 6),
            id_string_modifier,
            share_count: sharing_1 & 0x0F,
            entity_instance_increments: (sharing_2 & 0x80) == 0x80,
            modifier_offset: sharing_2 & 0x7F,
        }
    }
}

/// Sensor record fields shared between full and compact sensor records.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorRecordCommon {
    pub key: SensorKey,
    pub entity_id: EntityId,
    pub entity_instance: EntityInstance,
    pub initialization: SensorInitialization,
    pub capabilities: SensorCapabilities,
    pub ty: SensorType,
    pub event_reading_type_code: EventReadingTypeCodes,
    pub mask: Mask,
    pub sensor_units: SensorUnits,
    pub sensor_id: SensorId,
}

impl SensorRecordCommon {
    pub const SIZE: usize = 18;

    /// Parse common sensor record data, but set the SensorID to an empty string.
    ///
    /// You _must_ remember to [`SensorRecordCommon::set_id`] once the ID of the
    /// record has been parsed.
    pub(crate) fn parse_without_id(record_data: &[u8]) -> Result<(Self, &[u8]), ParseError> {
        ParseError::ensure(record_data, Self::SIZE)?;

        let key = SensorKey::parse(&record_data[..3])?;

        let entity_id = EntityId::from(record_data[3]);
        let entity_instance = EntityInstance::from(record_data[4]);
        let initialization = SensorInitialization::from(record_data[5]);

        let sensor_capabilities = record_data[6];

        let ty = SensorType::from(record_data[7]);
        let event_reading_type_code = EventReadingTypeCodes::from(record_data[8]);

        let mask = Mask::parse(&record_data[9..15]).ok_or(ParseError::InsufficientData {
            needed: 15,
            available: record_data.len(),
        })?;

        let capabilities = SensorCapabilities::new(sensor_capabilities, &mask);

        let sensor_units = SensorUnits::from(record_data[15], record_data[16], record_data[17]);

        Ok((
            Self {
                key,
                entity_id,
                entity_instance,
                initialization,
                capabilities,
                ty,
                event_reading_type_code,
                mask,
                sensor_units,
                sensor_id: Default::default(),
            },
            &record_data[Self::SIZE..],
        ))
    }

    pub(crate) fn set_id(&mut self, id: SensorId) {
        self.sensor_id = id;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    FullSensor,
    CompactSensor,
    EventOnlySensor,
    EntityAssociation,
    DeviceRelativeEntityAssociation,
    GenericDeviceLocator,
    FruDeviceLocator,
    McDeviceLocator,
    McConfirmation,
    BmcChannelInfo,
    Oem,
    Unknown(u8),
}

impl From<u8> for RecordType {
    fn from(value: u8) -> Self {
        match value {
            0x01 => Self::FullSensor,
            0x02 => Self::CompactSensor,
            0x03 => Self::EventOnlySensor,
            0x08 => Self::EntityAssociation,
            0x09 => Self::DeviceRelativeEntityAssociation,
            0x10 => Self::GenericDeviceLocator,
            0x11 => Self::FruDeviceLocator,
            0x12 => Self::McDeviceLocator,
            0x13 => Self::McConfirmation,
            0x14 => Self::BmcChannelInfo,
            0xC0 => Self::Oem,
            v => Self::Unknown(v),
        }
    }
}

impl From<RecordType> for u8 {
    fn from(value: RecordType) -> Self {
        match value {
            RecordType::FullSensor => 0x01,
            RecordType::CompactSensor => 0x02,
            RecordType::EventOnlySensor => 0x03,
            RecordType::EntityAssociation => 0x08,
            RecordType::DeviceRelativeEntityAssociation => 0x09,
            RecordType::GenericDeviceLocator => 0x10,
            RecordType::FruDeviceLocator => 0x11,
            RecordType::McDeviceLocator => 0x12,
            RecordType::McConfirmation => 0x13,
            RecordType::BmcChannelInfo => 0x14,
            RecordType::Oem => 0xC0,
            RecordType::Unknown(v) => v,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub id: RecordId,

    pub sdr_version_major: u8,
    pub sdr_version_minor: u8,

    pub record_type: RecordType,
    /// The amount of record bytes following the header.
    pub length: u8,
}

impl RecordHeader {
    pub const SIZE: usize = 5;

    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        ParseError::ensure(data, Self::SIZE)?;

        Ok(Self {
            id: RecordId::new_raw(u16::from_le_bytes([data[0], data[1]])),
            sdr_version_minor: (data[2] & 0xF0) >> 4,
            sdr_version_major: data[2] & 0x0F,
            record_type: RecordType::from(data[3]),
            length: data[4],
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub header: RecordHeader,
    pub contents: RecordContents,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordContents {
    FullSensor(FullSensorRecord),
    CompactSensor(CompactSensorRecord),
    EventOnlySensor(EventOnlySensorRecord),
    EntityAssociation(EntityAssociation),
    DeviceRelativeEntityAssociation(DeviceRelativeEntityAssociation),
    GenericDeviceLocator(GenericDeviceLocator),
    FruDeviceLocator(FruDeviceLocator),
    McDeviceLocator(McDeviceLocator),
    McConfirmation(McConfirmation),
    BmcChannelInfo(BmcChannelInfo),
    Oem(OemRecord),
    Unknown { ty: u8, data: Vec<u8> },
}

impl Record {
    /// Parse a complete record, including its 5 byte header.
    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        let header = RecordHeader::parse(data)?;

        let end = RecordHeader::SIZE + header.length as usize;
        ParseError::ensure(data, end)?;

        if data.len() > end {
            debug!(
                "Ignoring {} trailing bytes after SDR record 0x{:04X}",
                data.len() - end,
                header.id.value()
            );
        }

        let record_data = &data[RecordHeader::SIZE..end];

        let contents = match header.record_type {
            RecordType::FullSensor => {
                RecordContents::FullSensor(FullSensorRecord::parse(record_data)?)
            }
            RecordType::CompactSensor => {
                RecordContents::CompactSensor(CompactSensorRecord::parse(record_data)?)
            }
            RecordType::EventOnlySensor => {
                RecordContents::EventOnlySensor(EventOnlySensorRecord::parse(record_data)?)
            }
            RecordType::EntityAssociation => {
                RecordContents::EntityAssociation(EntityAssociation::parse(record_data)?)
            }
            RecordType::DeviceRelativeEntityAssociation => {
                RecordContents::DeviceRelativeEntityAssociation(
                    DeviceRelativeEntityAssociation::parse(record_data)?,
                )
            }
            RecordType::GenericDeviceLocator => {
                RecordContents::GenericDeviceLocator(GenericDeviceLocator::parse(record_data)?)
            }
            RecordType::FruDeviceLocator => {
                RecordContents::FruDeviceLocator(FruDeviceLocator::parse(record_data)?)
            }
            RecordType::McDeviceLocator => {
                RecordContents::McDeviceLocator(McDeviceLocator::parse(record_data)?)
            }
            RecordType::McConfirmation => {
                RecordContents::McConfirmation(McConfirmation::parse(record_data)?)
            }
            RecordType::BmcChannelInfo => {
                RecordContents::BmcChannelInfo(BmcChannelInfo::parse(record_data)?)
            }
            RecordType::Oem => RecordContents::Oem(OemRecord::parse(record_data)?),
            RecordType::Unknown(ty) => {
                debug!(
                    "SDR record 0x{:04X} has unknown type 0x{:02X}",
                    header.id.value(),
                    ty
                );
                RecordContents::Unknown {
                    ty,
                    data: record_data.to_vec(),
                }
            }
        };

        Ok(Self { header, contents })
    }

    pub fn common_data(&self) -> Option<&SensorRecordCommon> {
        match &self.contents {
            RecordContents::FullSensor(s) => Some(s.common()),
            RecordContents::CompactSensor(s) => Some(s.common()),
            _ => None,
        }
    }

    pub fn full_sensor(&self) -> Option<&FullSensorRecord> {
        if let RecordContents::FullSensor(full_sensor) = &self.contents {
            Some(full_sensor)
        } else {
            None
        }
    }

    pub fn compact_sensor(&self) -> Option<&CompactSensorRecord> {
        if let RecordContents::CompactSensor(compact_sensor) = &self.contents {
            Some(compact_sensor)
        } else {
            None
        }
    }

    pub fn event_only(&self) -> Option<&EventOnlySensorRecord> {
        if let RecordContents::EventOnlySensor(event_only) = &self.contents {
            Some(event_only)
        } else {
            None
        }
    }

    pub fn id(&self) -> Option<&SensorId> {
        match &self.contents {
            RecordContents::FullSensor(full) => Some(full.id_string()),
            RecordContents::CompactSensor(compact) => Some(compact.id_string()),
            RecordContents::EventOnlySensor(event) => Some(event.id_string()),
            RecordContents::GenericDeviceLocator(generic) => Some(generic.id_string()),
            RecordContents::FruDeviceLocator(fru) => Some(fru.id_string()),
            RecordContents::McDeviceLocator(mc) => Some(mc.id_string()),
            _ => None,
        }
    }

    pub fn sensor_number(&self) -> Option<SensorNumber> {
        match &self.contents {
            RecordContents::FullSensor(full) => Some(full.sensor_number()),
            RecordContents::CompactSensor(compact) => Some(compact.sensor_number()),
            RecordContents::EventOnlySensor(event) => Some(event.key.sensor_number),
            _ => None,
        }
    }

    fn kind_name(&self) -> &'static str {
        match &self.contents {
            RecordContents::FullSensor(_) => "Full Sensor",
            RecordContents::CompactSensor(_) => "Compact Sensor",
            RecordContents::EventOnlySensor(_) => "Event-Only Sensor",
            RecordContents::EntityAssociation(_) => "Entity Association",
            RecordContents::DeviceRelativeEntityAssociation(_) => {
                "Device-relative Entity Association"
            }
            RecordContents::GenericDeviceLocator(_) => "Generic Device Locator",
            RecordContents::FruDeviceLocator(_) => "FRU Device Locator",
            RecordContents::McDeviceLocator(_) => "Management Controller Device Locator",
            RecordContents::McConfirmation(_) => "Management Controller Confirmation",
            RecordContents::BmcChannelInfo(_) => "BMC Message Channel Info",
            RecordContents::Oem(_) => "OEM",
            RecordContents::Unknown { .. } => "Unknown",
        }
    }
}

impl Loggable for Record {
    fn as_log(&self) -> Vec<LogItem> {
        let RecordHeader {
            id,
            sdr_version_major: sdr_v_maj,
            sdr_version_minor: sdr_v_min,
            ..
        } = &self.header;

        let mut log = log_vec![
            (0, format!("SDR Record ({})", self.kind_name())),
            (1, "Record ID", format!("0x{:04X}", id.value())),
            (1, "SDR Version", format!("{sdr_v_maj}.{sdr_v_min}")),
        ];

        if let Some(common) = self.common_data() {
            log.push((1, "Sensor Type", common.ty.description()).into());
            common.key.log_into(1, &mut log);
            log.push((1, "Entity ID", common.entity_id.description()).into());
        }

        match &self.contents {
            RecordContents::FullSensor(full) => {
                let display = |v: Option<Value>| {
                    v.map(|v| v.display(true))
                        .unwrap_or_else(|| "Unknown".to_string())
                };

                log.push((1, "Sensor ID", full.id_string()).into());
                log.push((1, "Nominal reading", display(full.nominal_reading())).into());
                log.push((1, "Max reading", display(full.max_reading())).into());
                log.push((1, "Min reading", display(full.min_reading())).into());
            }
            RecordContents::CompactSensor(compact) => {
                log.push((1, "Sensor ID", compact.id_string()).into());
            }
            RecordContents::EventOnlySensor(event) => {
                event.key.log_into(1, &mut log);
                log.push((1, "Sensor ID", event.id_string()).into());
                log.push((1, "Sensor Type", event.ty.description()).into());
            }
            RecordContents::FruDeviceLocator(fru) => {
                log.push((1, "Device ID", fru.id_string()).into());
                log.push((1, "Device Type", fru.device_type.description()).into());
            }
            RecordContents::GenericDeviceLocator(generic) => {
                log.push((1, "Device ID", generic.id_string()).into());
                log.push((1, "Device Type", generic.device_type.description()).into());
            }
            RecordContents::McDeviceLocator(mc) => {
                log.push((1, "Device ID", mc.id_string()).into());
                log.push((1, "Channel", mc.key.channel).into());
            }
            RecordContents::Unknown { ty, data } => {
                log.push((1, "Record type", format!("0x{ty:02X}")).into());
                log.push((1, "Data length", data.len()).into());
            }
            _ => {}
        }

        log
    }
}
