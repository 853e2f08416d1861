use thiserror::Error;

/// Errors produced while decoding SDR, SEL and FRU data.
///
/// Unknown or reserved enumeration values are never reported through this
/// type: they decode into `Reserved`/`Unknown`/`Oem` variants instead.
/// Checksums are not reported here either, see the `valid()` predicates
/// on the checksummed structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The buffer is shorter than a fixed minimum, or than a length implied
    /// by a length byte embedded in the data.
    #[error("insufficient data: needed {needed} bytes, but only {available} are available")]
    InsufficientData { needed: usize, available: usize },
    /// The amount of bytes supplied to the Type/Length decoder does not match
    /// the length declared in the Type/Length byte.
    #[error("type/length byte declares {declared} bytes, but {actual} were supplied")]
    LengthMismatch { declared: usize, actual: usize },
    /// Sensor number `0xFF` is reserved and does not identify a sensor.
    #[error("sensor number 0xFF is reserved")]
    ReservedSensorNumber,
}

impl ParseError {
    /// Check that `data` holds at least `needed` bytes.
    pub(crate) fn ensure(data: &[u8], needed: usize) -> Result<(), Self> {
        if data.len() < needed {
            Err(Self::InsufficientData {
                needed,
                available: data.len(),
            })
        } else {
            Ok(())
        }
    }
}
