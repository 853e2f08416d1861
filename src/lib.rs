//! ipmi-records: a pure-rust codec for IPMI records.
//!
//! This library decodes the self-describing records that a BMC hands out:
//! Sensor Data Records and System Event Log entries (in the [`storage`] module),
//! FRU inventory data (in [`storage::fru`]) and sensor readings (in the
//! [`sensor_event`] module). Full sensor records carry the calibration data
//! needed to turn raw readings into engineering units, see
//! [`storage::sdr::conversion`].
//!
//! Fetching the raw bytes from a BMC is up to the caller.

macro_rules! debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        log::debug!($($arg)*);
        #[cfg(not(feature = "log"))]
        let _ = format_args!($($arg)*);
    };
}

macro_rules! warn {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        log::warn!($($arg)*);
        #[cfg(not(feature = "log"))]
        let _ = format_args!($($arg)*);
    };
}

#[macro_use]
mod fmt;
pub use fmt::{LogItem, LogOutput, Loggable, Logger};

pub mod addressing;

pub mod bits;

mod error;
pub use error::ParseError;

pub mod type_length;
pub use type_length::{TypeLength, TypeLengthString};

pub mod storage;
pub use storage::sdr::record::{IdentifiableSensor, InstancedSensor, WithSensorRecordCommon};

pub mod sensor_event;

#[cfg(test)]
mod tests;
