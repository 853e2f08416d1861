use crate::{
    bits,
    type_length::{read_field, TypeLengthString},
    ParseError,
};

/// Minutes since 1996-01-01 00:00 UTC. `0` means unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ManufacturingDate(u32);

impl ManufacturingDate {
    /// 1996-01-01 00:00:00 UTC as a Unix timestamp.
    const EPOCH: i64 = 820_454_400;

    pub fn from_minutes(minutes: u32) -> Self {
        Self(minutes & 0x00FF_FFFF)
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }

    pub fn is_unspecified(&self) -> bool {
        self.0 == 0
    }

    pub fn unix_timestamp(&self) -> i64 {
        Self::EPOCH + i64::from(self.0) * 60
    }
}

impl core::fmt::Display for ManufacturingDate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_unspecified() {
            return write!(f, "Unspecified");
        }

        #[cfg(feature = "time")]
        {
            let formatted = time::OffsetDateTime::from_unix_timestamp(self.unix_timestamp())
                .ok()
                .and_then(|ts| {
                    ts.format(&time::format_description::well_known::Rfc3339)
                        .ok()
                });

            if let Some(formatted) = formatted {
                return write!(f, "{}", formatted);
            }
        }

        write!(f, "{} minutes after 1996-01-01", self.0)
    }
}

/// The bytes of one info area, bounded by its declared length.
struct Area<'a> {
    format_version: u8,
    /// Area contents without the trailing checksum byte.
    body: &'a [u8],
    valid: bool,
}

impl<'a> Area<'a> {
    fn parse(data: &'a [u8], name: &str) -> Result<Self, ParseError> {
        ParseError::ensure(data, 2)?;

        let format_version = data[0] & 0x0F;
        let length = usize::from(data[1]) * 8;

        // Version, length and checksum at minimum.
        ParseError::ensure(data, length.max(3))?;
        let area = &data[..length.max(3)];

        let valid = bits::checksum_ok(area);
        if !valid {
            warn!("FRU {} area checksum mismatch", name);
        }

        Ok(Self {
            format_version,
            body: &area[..area.len() - 1],
            valid,
        })
    }

    /// Read a field in a fixed position. An end-of-fields marker in a fixed
    /// position reads as an empty field.
    fn fixed_field(&self, offset: &mut usize) -> Result<TypeLengthString, ParseError> {
        Ok(read_field(self.body, offset)?.unwrap_or_default())
    }

    /// Read custom fields until the end-of-fields marker or an empty field.
    fn custom_fields(&self, offset: &mut usize) -> Result<Vec<TypeLengthString>, ParseError> {
        let mut fields = Vec::new();

        while let Some(field) = read_field(self.body, offset)? {
            if field.is_empty() {
                break;
            }
            fields.push(field);
        }

        Ok(fields)
    }
}

/// Chassis Info Area.
///
/// Reference: Platform Management FRU Information Storage Definition, Section 10.
#[derive(Debug, Clone, PartialEq)]
pub struct ChassisInfoArea {
    pub format_version: u8,
    /// SMBIOS chassis type.
    pub chassis_type: u8,
    pub part_number: TypeLengthString,
    pub serial_number: TypeLengthString,
    pub custom_fields: Vec<TypeLengthString>,
    valid: bool,
}

impl ChassisInfoArea {
    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        let area = Area::parse(data, "chassis")?;
        let chassis_type = bits::u8_at(area.body, 2)?;

        let mut offset = 3;
        let part_number = area.fixed_field(&mut offset)?;
        let serial_number = area.fixed_field(&mut offset)?;
        let custom_fields = area.custom_fields(&mut offset)?;

        Ok(Self {
            format_version: area.format_version,
            chassis_type,
            part_number,
            serial_number,
            custom_fields,
            valid: area.valid,
        })
    }

    pub fn valid(&self) -> bool {
        self.valid
    }
}

/// Board Info Area.
///
/// Reference: Platform Management FRU Information Storage Definition, Section 11.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardInfoArea {
    pub format_version: u8,
    pub language_code: u8,
    pub manufacturing_date: ManufacturingDate,
    pub manufacturer: TypeLengthString,
    pub product_name: TypeLengthString,
    pub serial_number: TypeLengthString,
    pub part_number: TypeLengthString,
    pub fru_file_id: TypeLengthString,
    pub custom_fields: Vec<TypeLengthString>,
    valid: bool,
}

impl BoardInfoArea {
    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        let area = Area::parse(data, "board")?;

        let language_code = bits::u8_at(area.body, 2)?;
        let manufacturing_date = ManufacturingDate::from_minutes(bits::u24_le(area.body, 3)?);

        let mut offset = 6;
        let manufacturer = area.fixed_field(&mut offset)?;
        let product_name = area.fixed_field(&mut offset)?;
        let serial_number = area.fixed_field(&mut offset)?;
        let part_number = area.fixed_field(&mut offset)?;
        let fru_file_id = area.fixed_field(&mut offset)?;
        let custom_fields = area.custom_fields(&mut offset)?;

        Ok(Self {
            format_version: area.format_version,
            language_code,
            manufacturing_date,
            manufacturer,
            product_name,
            serial_number,
            part_number,
            fru_file_id,
            custom_fields,
            valid: area.valid,
        })
    }

    pub fn valid(&self) -> bool {
        self.valid
    }
}

/// Product Info Area.
///
/// Reference: Platform Management FRU Information Storage Definition, Section 12.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInfoArea {
    pub format_version: u8,
    pub language_code: u8,
    pub manufacturer: TypeLengthString,
    pub product_name: TypeLengthString,
    pub part_model_number: TypeLengthString,
    pub version: TypeLengthString,
    pub serial_number: TypeLengthString,
    pub asset_tag: TypeLengthString,
    pub fru_file_id: TypeLengthString,
    pub custom_fields: Vec<TypeLengthString>,
    valid: bool,
}

impl ProductInfoArea {
    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        let area = Area::parse(data, "product")?;

        let language_code = bits::u8_at(area.body, 2)?;

        let mut offset = 3;
        let manufacturer = area.fixed_field(&mut offset)?;
        let product_name = area.fixed_field(&mut offset)?;
        let part_model_number = area.fixed_field(&mut offset)?;
        let version = area.fixed_field(&mut offset)?;
        let serial_number = area.fixed_field(&mut offset)?;
        let asset_tag = area.fixed_field(&mut offset)?;
        let fru_file_id = area.fixed_field(&mut offset)?;
        let custom_fields = area.custom_fields(&mut offset)?;

        Ok(Self {
            format_version: area.format_version,
            language_code,
            manufacturer,
            product_name,
            part_model_number,
            version,
            serial_number,
            asset_tag,
            fru_file_id,
            custom_fields,
            valid: area.valid,
        })
    }

    pub fn valid(&self) -> bool {
        self.valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pad `area` to a multiple of 8 bytes and append its checksum.
    fn finish_area(mut area: Vec<u8>) -> Vec<u8> {
        area.push(0xC1);
        while (area.len() + 1) % 8 != 0 {
            area.push(0x00);
        }
        area[1] = ((area.len() + 1) / 8) as u8;
        area.push(bits::zero_checksum(&area));
        area
    }

    fn field(value: &str) -> Vec<u8> {
        let mut out = vec![0xC0 | value.len() as u8];
        out.extend_from_slice(value.as_bytes());
        out
    }

    #[test]
    fn board_area() {
        let mut area = vec![0x01, 0x00, 0x19, 0x60, 0xE9, 0x6D];
        for value in ["ACME", "Mainboard", "SN0001", "PN-42", ""] {
            area.extend(field(value));
        }
        area.extend(field("custom"));
        let area = finish_area(area);

        let board = BoardInfoArea::parse(&area).unwrap();

        assert!(board.valid());
        assert_eq!(board.language_code, 0x19);
        assert_eq!(board.manufacturing_date.minutes(), 0x6DE960);
        assert_eq!(board.manufacturer.to_string(), "ACME");
        assert_eq!(board.product_name.to_string(), "Mainboard");
        assert_eq!(board.serial_number.to_string(), "SN0001");
        assert_eq!(board.part_number.to_string(), "PN-42");
        assert!(board.fru_file_id.is_empty());
        assert_eq!(board.custom_fields.len(), 1);
        assert_eq!(board.custom_fields[0].to_string(), "custom");
    }

    #[test]
    fn checksum_is_soft() {
        let mut area = vec![0x01, 0x00, 0x17];
        area.extend(field("123"));
        area.extend(field("456"));
        let mut area = finish_area(area);
        let last = area.len() - 1;
        area[last] = area[last].wrapping_add(1);

        let chassis = ChassisInfoArea::parse(&area).unwrap();
        assert!(!chassis.valid());
        assert_eq!(chassis.chassis_type, 0x17);
        assert_eq!(chassis.serial_number.to_string(), "456");
    }

    #[test]
    fn declared_length_exceeds_buffer() {
        let mut area = vec![0x01, 0x00, 0x19];
        area.extend(field("ACME"));
        let area = finish_area(area);

        assert!(matches!(
            ProductInfoArea::parse(&area[..area.len() - 1]),
            Err(ParseError::InsufficientData { .. })
        ));
    }

    #[test]
    fn field_past_area_end() {
        // The declared length cuts the product name short.
        let area = [0x01, 0x01, 0x19, 0xC2, b'A', b'B', 0xC5, b'x'];

        assert!(matches!(
            ProductInfoArea::parse(&area),
            Err(ParseError::InsufficientData { .. })
        ));
    }

    #[cfg(feature = "time")]
    #[test]
    fn manufacturing_date() {
        let date = ManufacturingDate::from_minutes(60 * 24);
        assert_eq!(date.to_string(), "1996-01-02T00:00:00Z");

        let unspecified = ManufacturingDate::from_minutes(0);
        assert_eq!(unspecified.to_string(), "Unspecified");
    }
}
