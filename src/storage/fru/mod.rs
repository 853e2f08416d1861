//! FRU inventory data.
//!
//! Reference: Platform Management FRU Information Storage Definition v1.0.
//!
//! A FRU image starts with an 8 byte common header holding the offsets (in
//! multiples of 8 bytes) of the optional areas that follow it. Checksums are
//! checked, but a mismatch never fails parsing: see the `valid()` predicates.

mod info_area;
pub use info_area::{BoardInfoArea, ChassisInfoArea, ManufacturingDate, ProductInfoArea};

mod multi_record;
pub use multi_record::{
    Compatibility, DcLoad, DcOutput, ManagementAccessKind, MultiRecord, MultiRecordData,
    MultiRecordHeader, PowerSupplyFlags, PowerSupplyInformation,
};

use crate::{
    bits,
    fmt::{LogItem, Loggable},
    ParseError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommonHeader {
    pub format_version: u8,
    pub internal_use_offset: u8,
    pub chassis_info_offset: u8,
    pub board_info_offset: u8,
    pub product_info_offset: u8,
    pub multi_record_offset: u8,
    pub checksum: u8,
    raw: [u8; 8],
}

impl CommonHeader {
    pub const SIZE: usize = 8;

    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        ParseError::ensure(data, Self::SIZE)?;

        let mut raw = [0u8; 8];
        raw.copy_from_slice(&data[..Self::SIZE]);

        Ok(Self {
            format_version: raw[0] & 0x0F,
            internal_use_offset: raw[1],
            chassis_info_offset: raw[2],
            board_info_offset: raw[3],
            product_info_offset: raw[4],
            multi_record_offset: raw[5],
            checksum: raw[7],
            raw,
        })
    }

    /// Whether the header bytes, including the checksum, sum to zero.
    pub fn valid(&self) -> bool {
        bits::checksum_ok(&self.raw)
    }

    fn byte_offset(offset: u8) -> Option<usize> {
        (offset != 0).then(|| usize::from(offset) * 8)
    }

    pub fn internal_use(&self) -> Option<usize> {
        Self::byte_offset(self.internal_use_offset)
    }

    pub fn chassis_info(&self) -> Option<usize> {
        Self::byte_offset(self.chassis_info_offset)
    }

    pub fn board_info(&self) -> Option<usize> {
        Self::byte_offset(self.board_info_offset)
    }

    pub fn product_info(&self) -> Option<usize> {
        Self::byte_offset(self.product_info_offset)
    }

    pub fn multi_record(&self) -> Option<usize> {
        Self::byte_offset(self.multi_record_offset)
    }

    fn offsets(&self) -> [Option<usize>; 5] {
        [
            self.internal_use(),
            self.chassis_info(),
            self.board_info(),
            self.product_info(),
            self.multi_record(),
        ]
    }
}

/// A decoded FRU inventory image.
#[derive(Debug, Clone, PartialEq)]
pub struct Fru {
    pub header: CommonHeader,
    /// Raw internal use area, up to the next area or the end of the image.
    pub internal_use: Option<Vec<u8>>,
    pub chassis: Option<ChassisInfoArea>,
    pub board: Option<BoardInfoArea>,
    pub product: Option<ProductInfoArea>,
    pub multi_records: Vec<MultiRecord>,
}

fn area_data(data: &[u8], offset: usize) -> Result<&[u8], ParseError> {
    ParseError::ensure(data, offset + 1)?;
    Ok(&data[offset..])
}

impl Fru {
    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        let header = CommonHeader::parse(data)?;

        if !header.valid() {
            warn!("FRU common header checksum mismatch");
        }

        let internal_use = header
            .internal_use()
            .map(|start| {
                let end = header
                    .offsets()
                    .into_iter()
                    .flatten()
                    .filter(|offset| *offset > start)
                    .min()
                    .unwrap_or(data.len());

                let end = end.max(start);
                ParseError::ensure(data, end)?;
                Ok::<_, ParseError>(data[start..end].to_vec())
            })
            .transpose()?;

        let chassis = header
            .chassis_info()
            .map(|offset| ChassisInfoArea::parse(area_data(data, offset)?))
            .transpose()?;

        let board = header
            .board_info()
            .map(|offset| BoardInfoArea::parse(area_data(data, offset)?))
            .transpose()?;

        let product = header
            .product_info()
            .map(|offset| ProductInfoArea::parse(area_data(data, offset)?))
            .transpose()?;

        let multi_records = match header.multi_record() {
            Some(offset) => MultiRecord::parse_list(area_data(data, offset)?)?,
            None => Vec::new(),
        };

        Ok(Self {
            header,
            internal_use,
            chassis,
            board,
            product,
            multi_records,
        })
    }

    /// Whether the common header and every present area have valid checksums.
    pub fn valid(&self) -> bool {
        self.header.valid()
            && self.chassis.as_ref().map_or(true, ChassisInfoArea::valid)
            && self.board.as_ref().map_or(true, BoardInfoArea::valid)
            && self.product.as_ref().map_or(true, ProductInfoArea::valid)
            && self
                .multi_records
                .iter()
                .all(|r| r.header_valid() && r.data_valid())
    }
}

impl Loggable for Fru {
    fn as_log(&self) -> Vec<LogItem> {
        let mut log = log_vec![
            (0, "FRU"),
            (1, "Format version", self.header.format_version),
            (1, "Checksums valid", self.valid()),
        ];

        if let Some(internal_use) = &self.internal_use {
            let size = format!("{} bytes", internal_use.len());
            log.push((1, "Internal use area", size).into());
        }

        if let Some(chassis) = &self.chassis {
            log.push((1, "Chassis type", format!("0x{:02X}", chassis.chassis_type)).into());
            log.push((1, "Chassis part number", &chassis.part_number).into());
            log.push((1, "Chassis serial", &chassis.serial_number).into());
        }

        if let Some(board) = &self.board {
            log.push((1, "Board mfg date", board.manufacturing_date).into());
            log.push((1, "Board manufacturer", &board.manufacturer).into());
            log.push((1, "Board product", &board.product_name).into());
            log.push((1, "Board serial", &board.serial_number).into());
            log.push((1, "Board part number", &board.part_number).into());
        }

        if let Some(product) = &self.product {
            log.push((1, "Product manufacturer", &product.manufacturer).into());
            log.push((1, "Product name", &product.product_name).into());
            log.push((1, "Product part number", &product.part_model_number).into());
            log.push((1, "Product version", &product.version).into());
            log.push((1, "Product serial", &product.serial_number).into());
            log.push((1, "Product asset tag", &product.asset_tag).into());
        }

        for record in &self.multi_records {
            let kind = match &record.data {
                MultiRecordData::PowerSupplyInformation(_) => "Power supply information",
                MultiRecordData::DcOutput(_) => "DC output",
                MultiRecordData::DcLoad(_) => "DC load",
                MultiRecordData::ManagementAccess { .. } => "Management access",
                MultiRecordData::BaseCompatibility(_) => "Base compatibility",
                MultiRecordData::ExtendedCompatibility(_) => "Extended compatibility",
                MultiRecordData::Oem { .. } => "OEM",
                MultiRecordData::Unknown { .. } => "Unknown",
            };
            log.push((1, "Multi-record", kind).into());
        }

        log
    }
}
