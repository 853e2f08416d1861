//! Sensor readings, as returned by the Get Sensor Reading command.
//!
//! Reference: IPMI 2.0 Specification, Section 35.14

mod sensor_reading;
pub use sensor_reading::{DiscreteReading, RawSensorReading, ThresholdReading};
