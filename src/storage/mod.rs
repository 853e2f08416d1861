pub mod sel;
pub use sel::{Entry as SelEntry, RecordId as SelRecordId};

pub mod sdr;
pub use sdr::{Record as SdrRecord, RecordId as SdrRecordId};

pub mod fru;

/// Seconds since the Unix epoch, as stored in SEL entries.
///
/// Values up to `0x20000000` are relative to system initialization rather
/// than absolute, and `0xFFFFFFFF` means "unspecified".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u32);

impl Timestamp {
    pub const UNSPECIFIED: Self = Self(0xFFFF_FFFF);
    const RELATIVE_MAX: u32 = 0x2000_0000;

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn is_unspecified(&self) -> bool {
        *self == Self::UNSPECIFIED
    }

    /// Whether this timestamp counts from system initialization.
    pub fn is_relative(&self) -> bool {
        self.0 <= Self::RELATIVE_MAX
    }
}

impl core::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_unspecified() {
            return write!(f, "Unspecified");
        }

        if self.is_relative() {
            return write!(f, "Pre-init +{}s", self.0);
        }

        #[cfg(feature = "time")]
        {
            let formatted = time::OffsetDateTime::from_unix_timestamp(i64::from(self.0))
                .ok()
                .and_then(|ts| {
                    ts.format(&time::format_description::well_known::Rfc3339)
                        .ok()
                });

            if let Some(formatted) = formatted {
                return write!(f, "{}", formatted);
            }
        }

        write!(f, "{}", self.0)
    }
}

impl From<u32> for Timestamp {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Timestamp::UNSPECIFIED.to_string(), "Unspecified");
        assert_eq!(Timestamp::from(0x10).to_string(), "Pre-init +16s");

        #[cfg(feature = "time")]
        assert_eq!(
            Timestamp::from(0x67C6B390).to_string(),
            "2025-03-04T08:02:24Z"
        );
    }
}
