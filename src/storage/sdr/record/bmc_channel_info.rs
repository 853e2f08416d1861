use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelInfo {
    pub transmit_supported: bool,
    pub message_receive_lun: LogicalUnit,
    pub protocol: u8,
}

impl From<u8> for ChannelInfo {
    fn from(value: u8) -> Self {
        Self {
            transmit_supported: (value & 0x80) == 0x80,
            message_receive_lun: LogicalUnit::from_low_bits(value >> 4),
            protocol: value & 0x0F,
        }
    }
}

/// BMC Message Channel Info Record (type `0x14`).
///
/// Reference: IPMI 2.0 Specification, Table 43-10.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmcChannelInfo {
    pub channels: [ChannelInfo; 8],
    pub messaging_interrupt_type: u8,
    pub event_message_buffer_interrupt_type: u8,
}

impl BmcChannelInfo {
    pub const SIZE: usize = 10;

    pub fn parse(record_data: &[u8]) -> Result<Self, ParseError> {
        ParseError::ensure(record_data, Self::SIZE)?;

        let mut channels = [ChannelInfo::from(0); 8];
        channels
            .iter_mut()
            .zip(&record_data[..8])
            .for_each(|(channel, raw)| *channel = ChannelInfo::from(*raw));

        Ok(Self {
            channels,
            messaging_interrupt_type: record_data[8],
            event_message_buffer_interrupt_type: record_data[9],
        })
    }
}
