//! MultiRecord area records.
//!
//! Reference: Platform Management FRU Information Storage Definition,
//! Sections 16 to 18.

use crate::{bits, storage::sdr::EntityId, ParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiRecordHeader {
    pub record_type: u8,
    pub end_of_list: bool,
    pub format_version: u8,
    pub length: u8,
    pub record_checksum: u8,
    pub header_checksum: u8,
    valid: bool,
}

impl MultiRecordHeader {
    pub const SIZE: usize = 5;

    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        ParseError::ensure(data, Self::SIZE)?;

        Ok(Self {
            record_type: data[0],
            end_of_list: (data[1] & 0x80) == 0x80,
            format_version: data[1] & 0x0F,
            length: data[2],
            record_checksum: data[3],
            header_checksum: data[4],
            valid: bits::checksum_ok(&data[..Self::SIZE]),
        })
    }
}

bitflags::bitflags! {
    pub struct PowerSupplyFlags: u8 {
        const PREDICTIVE_FAIL = 1 << 0;
        const POWER_FACTOR_CORRECTION = 1 << 1;
        const AUTOSWITCH = 1 << 2;
        const HOT_SWAP = 1 << 3;
        /// Predictive fail pin is a tachometer output rather than pass/fail.
        const TACHOMETER_PULSES = 1 << 4;
    }
}

/// Power Supply Information (record type `0x00`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerSupplyInformation {
    /// Watts.
    pub overall_capacity: u16,
    /// Volt-amperes. `None` if unspecified.
    pub peak_va: Option<u16>,
    /// Amperes.
    pub inrush_current: u8,
    /// Milliseconds.
    pub inrush_interval: u8,
    /// Input voltage ranges (low, high), in 10 mV units.
    pub input_voltage_range_1: (u16, u16),
    pub input_voltage_range_2: (u16, u16),
    /// Hz.
    pub input_frequency_range: (u8, u8),
    /// Milliseconds.
    pub ac_dropout_tolerance: u8,
    pub flags: PowerSupplyFlags,
    /// Seconds.
    pub hold_up_time: u8,
    /// Watts.
    pub peak_capacity: u16,
    /// Combined wattage: the two voltages (as codes) and their combined watts.
    pub combined_wattage: (u8, u8, u16),
    /// Rotations per second.
    pub predictive_fail_tachometer_lower_threshold: u8,
}

impl PowerSupplyInformation {
    pub const SIZE: usize = 24;

    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        ParseError::ensure(data, Self::SIZE)?;

        let word = |offset| bits::u16_le(data, offset);

        let peak_va = word(2)?;
        let peak_wattage = word(18)?;

        Ok(Self {
            overall_capacity: word(0)? & 0x0FFF,
            peak_va: (peak_va != 0xFFFF).then_some(peak_va),
            inrush_current: data[4],
            inrush_interval: data[5],
            input_voltage_range_1: (word(6)?, word(8)?),
            input_voltage_range_2: (word(10)?, word(12)?),
            input_frequency_range: (data[14], data[15]),
            ac_dropout_tolerance: data[16],
            flags: PowerSupplyFlags::from_bits_truncate(data[17]),
            hold_up_time: (peak_wattage >> 12) as u8,
            peak_capacity: peak_wattage & 0x0FFF,
            combined_wattage: (data[20] >> 4, data[20] & 0x0F, word(21)?),
            predictive_fail_tachometer_lower_threshold: data[23],
        })
    }
}

/// DC Output (record type `0x01`). Voltages are in 10 mV units, currents in mA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DcOutput {
    pub output_number: u8,
    pub standby: bool,
    pub nominal_voltage: i16,
    pub max_negative_deviation: i16,
    pub max_positive_deviation: i16,
    /// Millivolts.
    pub ripple_and_noise: u16,
    pub min_current_draw: u16,
    pub max_current_draw: u16,
}

impl DcOutput {
    pub const SIZE: usize = 13;

    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        ParseError::ensure(data, Self::SIZE)?;

        let word = |offset| bits::u16_le(data, offset);

        Ok(Self {
            output_number: data[0] & 0x0F,
            standby: (data[0] & 0x80) == 0x80,
            nominal_voltage: word(1)? as i16,
            max_negative_deviation: word(3)? as i16,
            max_positive_deviation: word(5)? as i16,
            ripple_and_noise: word(7)?,
            min_current_draw: word(9)?,
            max_current_draw: word(11)?,
        })
    }
}

/// DC Load (record type `0x02`). Voltages are in 10 mV units, currents in mA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DcLoad {
    pub output_number: u8,
    pub nominal_voltage: i16,
    pub min_voltage: i16,
    pub max_voltage: i16,
    /// Millivolts.
    pub ripple_and_noise: u16,
    pub min_current_load: u16,
    pub max_current_load: u16,
}

impl DcLoad {
    pub const SIZE: usize = 13;

    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        ParseError::ensure(data, Self::SIZE)?;

        let word = |offset| bits::u16_le(data, offset);

        Ok(Self {
            output_number: data[0] & 0x0F,
            nominal_voltage: word(1)? as i16,
            min_voltage: word(3)? as i16,
            max_voltage: word(5)? as i16,
            ripple_and_noise: word(7)?,
            min_current_load: word(9)?,
            max_current_load: word(11)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagementAccessKind {
    SystemUrl,
    SystemName,
    SystemPingAddress,
    ComponentUrl,
    ComponentName,
    ComponentPingAddress,
    SystemUniqueId,
    Reserved(u8),
}

impl From<u8> for ManagementAccessKind {
    fn from(value: u8) -> Self {
        match value {
            0x01 => Self::SystemUrl,
            0x02 => Self::SystemName,
            0x03 => Self::SystemPingAddress,
            0x04 => Self::ComponentUrl,
            0x05 => Self::ComponentName,
            0x06 => Self::ComponentPingAddress,
            0x07 => Self::SystemUniqueId,
            v => Self::Reserved(v),
        }
    }
}

/// Base (`0x04`) or Extended (`0x05`) Compatibility record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compatibility {
    pub manufacturer_id: u32,
    pub entity_id: EntityId,
    pub compatibility_base: u8,
    pub code_start: u8,
    pub code_range_masks: Vec<u8>,
}

impl Compatibility {
    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        ParseError::ensure(data, 6)?;

        Ok(Self {
            manufacturer_id: bits::u24_le(data, 0)?,
            entity_id: EntityId::from(data[3]),
            compatibility_base: data[4],
            code_start: data[5] & 0x7F,
            code_range_masks: data[6..].to_vec(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultiRecordData {
    PowerSupplyInformation(PowerSupplyInformation),
    DcOutput(DcOutput),
    DcLoad(DcLoad),
    ManagementAccess {
        kind: ManagementAccessKind,
        data: Vec<u8>,
    },
    BaseCompatibility(Compatibility),
    ExtendedCompatibility(Compatibility),
    Oem {
        record_type: u8,
        manufacturer_id: u32,
        data: Vec<u8>,
    },
    Unknown {
        record_type: u8,
        data: Vec<u8>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiRecord {
    pub header: MultiRecordHeader,
    pub data: MultiRecordData,
    data_valid: bool,
}

impl MultiRecord {
    /// Parse one record, returning it and the amount of bytes it occupies.
    pub fn parse(data: &[u8]) -> Result<(Self, usize), ParseError> {
        let header = MultiRecordHeader::parse(data)?;

        let end = MultiRecordHeader::SIZE + usize::from(header.length);
        ParseError::ensure(data, end)?;
        let body = &data[MultiRecordHeader::SIZE..end];

        let data_valid = bits::zero_checksum(body) == header.record_checksum;
        if !header.valid || !data_valid {
            warn!(
                "FRU multi-record of type 0x{:02X} has a checksum mismatch",
                header.record_type
            );
        }

        let contents = match header.record_type {
            0x00 => MultiRecordData::PowerSupplyInformation(PowerSupplyInformation::parse(body)?),
            0x01 => MultiRecordData::DcOutput(DcOutput::parse(body)?),
            0x02 => MultiRecordData::DcLoad(DcLoad::parse(body)?),
            0x03 => MultiRecordData::ManagementAccess {
                kind: ManagementAccessKind::from(bits::u8_at(body, 0)?),
                data: body[1..].to_vec(),
            },
            0x04 => MultiRecordData::BaseCompatibility(Compatibility::parse(body)?),
            0x05 => MultiRecordData::ExtendedCompatibility(Compatibility::parse(body)?),
            record_type @ 0xC0..=0xFF => MultiRecordData::Oem {
                record_type,
                manufacturer_id: bits::u24_le(body, 0)?,
                data: body[3..].to_vec(),
            },
            record_type => MultiRecordData::Unknown {
                record_type,
                data: body.to_vec(),
            },
        };

        Ok((
            Self {
                header,
                data: contents,
                data_valid,
            },
            end,
        ))
    }

    pub fn header_valid(&self) -> bool {
        self.header.valid
    }

    pub fn data_valid(&self) -> bool {
        self.data_valid
    }

    /// Parse records until one has the end-of-list flag set.
    pub fn parse_list(data: &[u8]) -> Result<Vec<Self>, ParseError> {
        let mut records = Vec::new();
        let mut offset = 0;

        loop {
            let (record, size) = Self::parse(&data[offset.min(data.len())..])?;
            offset += size;

            let end_of_list = record.header.end_of_list;
            records.push(record);

            if end_of_list {
                break Ok(records);
            }
        }
    }
}

#[cfg(test)]
pub(super) fn encode_record(record_type: u8, end_of_list: bool, body: &[u8]) -> Vec<u8> {
    let mut header = vec![
        record_type,
        0x02 | if end_of_list { 0x80 } else { 0x00 },
        body.len() as u8,
        bits::zero_checksum(body),
    ];
    header.push(bits::zero_checksum(&header));
    header.extend_from_slice(body);
    header
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_supply() {
        let body = [
            0xF4, 0x01, // 500 W
            0xFF, 0xFF, // peak VA unspecified
            0x28, 0x0A, // inrush
            0x10, 0x27, 0x60, 0x5B, // 100 V - 234 V
            0x00, 0x00, 0x00, 0x00, // no second range
            0x2F, 0x3F, // 47 - 63 Hz
            0x14, // dropout
            0b0000_1110, // pfc, autoswitch, hot swap
            0x58, 0x22, // 2 s hold up, 600 W peak
            0x00, 0x00, 0x00, // combined
            0x00,
        ];

        let psu = PowerSupplyInformation::parse(&body).unwrap();

        assert_eq!(psu.overall_capacity, 500);
        assert_eq!(psu.peak_va, None);
        assert_eq!(psu.input_voltage_range_1, (10000, 23392));
        assert_eq!(psu.input_frequency_range, (47, 63));
        assert_eq!(
            psu.flags,
            PowerSupplyFlags::POWER_FACTOR_CORRECTION
                | PowerSupplyFlags::AUTOSWITCH
                | PowerSupplyFlags::HOT_SWAP
        );
        assert_eq!(psu.hold_up_time, 2);
        assert_eq!(psu.peak_capacity, 600);
    }

    #[test]
    fn record_list() {
        let mut data = encode_record(
            0x01,
            false,
            &[
                0x81, 0xB0, 0x04, 0x32, 0x00, 0x32, 0x00, 0x3C, 0x00, 0x00, 0x00, 0x10, 0x27,
            ],
        );
        data.extend(encode_record(0xC2, true, &[0x57, 0x01, 0x00, 0xAA, 0xBB]));
        data.extend_from_slice(&[0xFF; 4]);

        let records = MultiRecord::parse_list(&data).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.header_valid() && r.data_valid()));

        match &records[0].data {
            MultiRecordData::DcOutput(output) => {
                assert_eq!(output.output_number, 1);
                assert!(output.standby);
                assert_eq!(output.nominal_voltage, 1200);
                assert_eq!(output.max_current_draw, 10000);
            }
            other => panic!("Expected DC output, got {other:?}"),
        }

        assert_eq!(
            records[1].data,
            MultiRecordData::Oem {
                record_type: 0xC2,
                manufacturer_id: 0x157,
                data: vec![0xAA, 0xBB],
            }
        );
    }

    #[test]
    fn checksums_are_soft() {
        let mut data = encode_record(0x03, true, &[0x02, b'h', b'o', b's', b't']);
        data[6] ^= 0xFF;

        let (record, size) = MultiRecord::parse(&data).unwrap();
        assert_eq!(size, 10);
        assert!(record.header_valid());
        assert!(!record.data_valid());
        assert!(matches!(
            record.data,
            MultiRecordData::ManagementAccess {
                kind: ManagementAccessKind::SystemName,
                ..
            }
        ));
    }

    #[test]
    fn missing_end_of_list() {
        let data = encode_record(0x01, false, &[0; 13]);
        assert!(matches!(
            MultiRecord::parse_list(&data),
            Err(ParseError::InsufficientData { .. })
        ));
    }
}
