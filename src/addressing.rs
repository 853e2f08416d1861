//! Channel and LUN fields embedded in SDR and SEL records.
//!
//! Both are packed into a few bits of a byte shared with other fields, so
//! they are decoded from the low bits of an already shifted value.

/// An implementation specific channel, `0x1` through `0xB`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChannelNumber(u8);

impl ChannelNumber {
    pub const MAX: u8 = 0xB;

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ChannelNumber {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        if (1..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(value)
        }
    }
}

/// A 4-bit IPMI channel number.
///
/// Reference: IPMI 2.0 Specification, Table 6-1 "Channel Number Assignments"
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Channel `0x0`, the primary IPMB.
    Primary,
    Numbered(ChannelNumber),
    /// `0xC` and `0xD`.
    Reserved(u8),
    /// `0xE`, the channel a request was received on.
    Current,
    /// `0xF`, the system interface.
    System,
}

impl Channel {
    /// Decode the low nibble of `value`.
    pub fn from_low_bits(value: u8) -> Self {
        let nibble = value & 0x0F;

        match nibble {
            0x0 => Self::Primary,
            0xE => Self::Current,
            0xF => Self::System,
            _ => ChannelNumber::try_from(nibble)
                .map(Self::Numbered)
                .unwrap_or(Self::Reserved(nibble)),
        }
    }

    pub fn value(&self) -> u8 {
        match self {
            Self::Primary => 0x0,
            Self::Numbered(number) => number.value(),
            Self::Reserved(value) => *value,
            Self::Current => 0xE,
            Self::System => 0xF,
        }
    }
}

impl From<Channel> for u8 {
    fn from(value: Channel) -> Self {
        value.value()
    }
}

impl core::fmt::Display for Channel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Primary => f.write_str("Primary IPMB"),
            Self::Numbered(number) => write!(f, "Channel 0x{:X}", number.value()),
            Self::Reserved(value) => write!(f, "Reserved channel 0x{:X}", value),
            Self::Current => f.write_str("Current channel"),
            Self::System => f.write_str("System interface"),
        }
    }
}

/// A logical unit number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LogicalUnit {
    Zero = 0,
    One = 1,
    Two = 2,
    Three = 3,
}

impl LogicalUnit {
    const ALL: [Self; 4] = [Self::Zero, Self::One, Self::Two, Self::Three];

    /// Decode the two lowest bits of `value`, ignoring all other bits.
    pub fn from_low_bits(value: u8) -> Self {
        Self::ALL[usize::from(value & 0b11)]
    }

    pub fn value(&self) -> u8 {
        *self as u8
    }
}

impl From<LogicalUnit> for u8 {
    fn from(value: LogicalUnit) -> Self {
        value.value()
    }
}

impl core::fmt::Display for LogicalUnit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "LUN {}", self.value())
    }
}
