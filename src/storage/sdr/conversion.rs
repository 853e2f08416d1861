//! Conversion of raw 8-bit sensor values into engineering units.
//!
//! Reference: IPMI 2.0 Specification, Section 36.3 "Sensor Reading Conversion
//! Formula" and Table 43-1 bytes 24 to 30.
//!
//! `y = L[(M * x + B * 10^B_exp) * 10^R_exp]`

use crate::{bits::SignExtend, ParseError};

/// Sensor Units 1, bits [7:6].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalogDataFormat {
    Unsigned,
    OnesComplement,
    TwosComplement,
    /// The sensor does not return an analog (numeric) reading.
    NotAnalog,
}

impl AnalogDataFormat {
    pub fn from_sensor_units_1(value: u8) -> Self {
        match (value >> 6) & 0b11 {
            0b00 => Self::Unsigned,
            0b01 => Self::OnesComplement,
            0b10 => Self::TwosComplement,
            _ => Self::NotAnalog,
        }
    }

    /// Reinterpret `raw` according to this format.
    ///
    /// Returns `None` for [`AnalogDataFormat::NotAnalog`].
    pub fn interpret(&self, raw: u8) -> Option<i16> {
        let value = match self {
            Self::Unsigned => i16::from(raw),
            // Negative zero (0xFF) maps to 0.
            Self::OnesComplement if raw & 0x80 != 0 => i16::from(raw.wrapping_add(1) as i8),
            Self::OnesComplement | Self::TwosComplement => i16::from(raw as i8),
            Self::NotAnalog => return None,
        };
        Some(value)
    }

    /// The raw value that means "maximum reading unspecified".
    pub fn max_reading_unspecified(&self) -> Option<u8> {
        match self {
            Self::Unsigned => Some(0xFF),
            Self::OnesComplement => Some(0x00),
            Self::TwosComplement => Some(0x7F),
            Self::NotAnalog => None,
        }
    }

    /// The raw value that means "minimum reading unspecified".
    pub fn min_reading_unspecified(&self) -> Option<u8> {
        match self {
            Self::Unsigned => Some(0x00),
            Self::OnesComplement => Some(0xFF),
            Self::TwosComplement => Some(0x80),
            Self::NotAnalog => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linearization {
    Linear,
    Ln,
    Log10,
    Log2,
    E,
    Exp10,
    Exp2,
    OneOverX,
    Sqr,
    Cube,
    Sqrt,
    CubeRoot,
    /// The reading factors change with the reading and have to be
    /// fetched with Get Sensor Reading Factors for each sample.
    NonLinear,
    Oem(u8),
    Unknown(u8),
}

impl From<u8> for Linearization {
    fn from(value: u8) -> Self {
        match value & 0x7F {
            0x00 => Self::Linear,
            0x01 => Self::Ln,
            0x02 => Self::Log10,
            0x03 => Self::Log2,
            0x04 => Self::E,
            0x05 => Self::Exp10,
            0x06 => Self::Exp2,
            0x07 => Self::OneOverX,
            0x08 => Self::Sqr,
            0x09 => Self::Cube,
            0x0A => Self::Sqrt,
            0x0B => Self::CubeRoot,
            0x70 => Self::NonLinear,
            v @ 0x71..=0x7F => Self::Oem(v),
            v => Self::Unknown(v),
        }
    }
}

impl Linearization {
    pub fn is_non_linear(&self) -> bool {
        matches!(self, Self::NonLinear | Self::Oem(_))
    }

    /// Apply the linearization function to `value`.
    ///
    /// Non-linear, OEM and unknown codes are applied as the identity: their
    /// factors already describe the reading at this point.
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Self::Ln => value.ln(),
            Self::Log10 => value.log10(),
            Self::Log2 => value.log2(),
            Self::E => value.exp(),
            Self::Exp10 => 10f64.powf(value),
            Self::Exp2 => 2f64.powf(value),
            Self::OneOverX => value.recip(),
            Self::Sqr => value.powi(2),
            Self::Cube => value.powi(3),
            Self::Sqrt => value.sqrt(),
            Self::CubeRoot => value.cbrt(),
            Self::Linear | Self::NonLinear | Self::Oem(_) | Self::Unknown(_) => value,
        }
    }
}

/// The packed M, B, tolerance, accuracy and exponent fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingFactors {
    pub m: i16,
    pub tolerance: u8,
    pub b: i16,
    pub accuracy: u16,
    pub accuracy_exponent: u8,
    pub result_exponent: i8,
    pub b_exponent: i8,
}

impl ReadingFactors {
    pub const SIZE: usize = 6;

    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        ParseError::ensure(data, Self::SIZE)?;

        let m_lsb = data[0];
        let m_msb_tolerance = data[1];
        let b_lsb = data[2];
        let b_msb_accuracy_lsb = data[3];
        let accuracy_msb_exp_direction = data[4];
        let r_exp_b_exp = data[5];

        let m = ((u16::from(m_msb_tolerance >> 6) << 8) | u16::from(m_lsb)).sign_extend(10);
        let tolerance = m_msb_tolerance & 0x3F;

        let b = ((u16::from(b_msb_accuracy_lsb >> 6) << 8) | u16::from(b_lsb)).sign_extend(10);

        let accuracy = (u16::from(accuracy_msb_exp_direction >> 4) << 6)
            | u16::from(b_msb_accuracy_lsb & 0x3F);
        let accuracy_exponent = (accuracy_msb_exp_direction >> 2) & 0b11;

        let result_exponent = (r_exp_b_exp >> 4).sign_extend(4);
        let b_exponent = (r_exp_b_exp & 0x0F).sign_extend(4);

        Ok(Self {
            m,
            tolerance,
            b,
            accuracy,
            accuracy_exponent,
            result_exponent,
            b_exponent,
        })
    }

    /// Parse the response data of a Get Sensor Reading Factors command.
    ///
    /// Returns the next reading for which the factors change, and the factors
    /// valid for the requested reading.
    pub fn parse_reading_factors_response(data: &[u8]) -> Result<(u8, Self), ParseError> {
        ParseError::ensure(data, 1 + Self::SIZE)?;
        Ok((data[0], Self::parse(&data[1..])?))
    }

    /// Accuracy in percent.
    pub fn accuracy_percent(&self) -> f64 {
        f64::from(self.accuracy) * 10f64.powi(i32::from(self.accuracy_exponent)) / 100.0
    }

    fn scale(&self) -> f64 {
        10f64.powi(i32::from(self.result_exponent))
    }

    fn offset(&self) -> f64 {
        f64::from(self.b) * 10f64.powi(i32::from(self.b_exponent))
    }
}

/// Convert a raw reading to engineering units.
///
/// Readings of sensors that are not analog convert to `0.0`.
pub fn convert_reading(
    raw: u8,
    format: AnalogDataFormat,
    factors: &ReadingFactors,
    linearization: Linearization,
) -> f64 {
    let Some(x) = format.interpret(raw) else {
        return 0.0;
    };

    let y = (f64::from(factors.m) * f64::from(x) + factors.offset()) * factors.scale();
    linearization.apply(y)
}

/// Convert a raw hysteresis value.
///
/// Hysteresis is a delta, so B does not apply. `0x00` and `0xFF` mean that
/// no hysteresis is specified.
pub fn convert_hysteresis(raw: u8, factors: &ReadingFactors) -> Option<f64> {
    if raw == 0x00 || raw == 0xFF {
        return None;
    }

    Some((f64::from(factors.m) * f64::from(raw) * factors.scale()).abs())
}

/// Convert the tolerance field, which is given in +/- half raw counts.
pub fn convert_tolerance(factors: &ReadingFactors) -> f64 {
    (f64::from(factors.m) * f64::from(factors.tolerance) / 2.0 * factors.scale()).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_factors(m: i16, b: i16, result_exponent: i8, b_exponent: i8) -> ReadingFactors {
        ReadingFactors {
            m,
            tolerance: 0,
            b,
            accuracy: 0,
            accuracy_exponent: 0,
            result_exponent,
            b_exponent,
        }
    }

    #[test]
    fn identity_factors() {
        let factors = linear_factors(1, 0, 0, 0);

        for raw in 0..=255u8 {
            let value = convert_reading(
                raw,
                AnalogDataFormat::Unsigned,
                &factors,
                Linearization::Linear,
            );
            assert_eq!(value, f64::from(raw));
        }
    }

    #[test]
    fn signedness() {
        let factors = linear_factors(1, 0, 0, 0);
        let convert = |raw, format| convert_reading(raw, format, &factors, Linearization::Linear);

        assert_eq!(convert(0xFE, AnalogDataFormat::TwosComplement), -2.0);
        assert_eq!(convert(0xFE, AnalogDataFormat::OnesComplement), -1.0);
        assert_eq!(convert(0xFF, AnalogDataFormat::OnesComplement), 0.0);
        assert_eq!(convert(0x7F, AnalogDataFormat::OnesComplement), 127.0);
        assert_eq!(convert(0x42, AnalogDataFormat::NotAnalog), 0.0);
    }

    #[test]
    fn scaled() {
        // 0.5 * x + 3 * 10^1, times 10^-1
        let factors = linear_factors(5, 3, -1, 1);
        let value = convert_reading(
            100,
            AnalogDataFormat::Unsigned,
            &factors,
            Linearization::Linear,
        );
        assert!((value - 53.0).abs() < 1e-9);

        let unit = linear_factors(1, 0, 0, 0);

        let value = convert_reading(3, AnalogDataFormat::Unsigned, &unit, Linearization::Sqr);
        assert_eq!(value, 9.0);

        let value = convert_reading(
            4,
            AnalogDataFormat::Unsigned,
            &unit,
            Linearization::OneOverX,
        );
        assert_eq!(value, 0.25);
    }

    #[test]
    fn linearization_functions() {
        let cases = [
            (Linearization::Ln, core::f64::consts::E, 1.0),
            (Linearization::Log10, 1000.0, 3.0),
            (Linearization::Log2, 8.0, 3.0),
            (Linearization::E, 1.0, core::f64::consts::E),
            (Linearization::Exp10, 2.0, 100.0),
            (Linearization::Exp2, 5.0, 32.0),
            (Linearization::Cube, -3.0, -27.0),
            (Linearization::Sqrt, 16.0, 4.0),
            (Linearization::CubeRoot, 27.0, 3.0),
            (Linearization::Linear, 7.5, 7.5),
            (Linearization::NonLinear, 7.5, 7.5),
        ];

        for (linearization, input, expected) in cases {
            let output = linearization.apply(input);
            assert!(
                (output - expected).abs() < 1e-9,
                "{:?}({}) = {}, expected {}",
                linearization,
                input,
                output,
                expected
            );
        }

        // sqrt(2 * 4 + 1)
        let value = convert_reading(
            4,
            AnalogDataFormat::Unsigned,
            &linear_factors(2, 1, 0, 0),
            Linearization::Sqrt,
        );
        assert!((value - 3.0).abs() < 1e-9);
    }

    #[test]
    fn unspecified_sentinels() {
        let cases = [
            (AnalogDataFormat::Unsigned, 0xFF, 0x00),
            (AnalogDataFormat::OnesComplement, 0x00, 0xFF),
            (AnalogDataFormat::TwosComplement, 0x7F, 0x80),
        ];

        for (format, max, min) in cases {
            assert_eq!(format.max_reading_unspecified(), Some(max));
            assert_eq!(format.min_reading_unspecified(), Some(min));
        }

        assert_eq!(AnalogDataFormat::NotAnalog.max_reading_unspecified(), None);
        assert_eq!(AnalogDataFormat::NotAnalog.min_reading_unspecified(), None);
    }

    #[test]
    fn linearization_codes() {
        assert_eq!(Linearization::from(0x09), Linearization::Cube);
        assert_eq!(Linearization::from(0x0A), Linearization::Sqrt);
        assert_eq!(Linearization::from(0x0B), Linearization::CubeRoot);
        assert_eq!(Linearization::from(0x70), Linearization::NonLinear);
        assert_eq!(Linearization::from(0x75), Linearization::Oem(0x75));
        assert_eq!(Linearization::from(0x0C), Linearization::Unknown(0x0C));
        assert_eq!(Linearization::from(0x80), Linearization::Linear);
    }

    #[test]
    fn packed_factors() {
        // M = -2 (0x3FE), tolerance = 5, B = 0x101, accuracy = 0x3C5,
        // accuracy exponent = 2, R = -3, B exponent = 2
        let factors = ReadingFactors::parse(&[0xFE, 0xC5, 0x01, 0x45, 0xFA, 0xD2]).unwrap();

        assert_eq!(factors.m, -2);
        assert_eq!(factors.tolerance, 5);
        assert_eq!(factors.b, 0x101);
        assert_eq!(factors.accuracy, 0x3C5);
        assert_eq!(factors.accuracy_exponent, 2);
        assert_eq!(factors.result_exponent, -3);
        assert_eq!(factors.b_exponent, 2);

        assert!(matches!(
            ReadingFactors::parse(&[0; 5]),
            Err(ParseError::InsufficientData {
                needed: 6,
                available: 5,
            })
        ));

        let response_data = [0x10, 0xFE, 0xC5, 0x01, 0x45, 0xFA, 0xD2];
        let (next, response) =
            ReadingFactors::parse_reading_factors_response(&response_data).unwrap();
        assert_eq!(next, 0x10);
        assert_eq!(response, factors);
    }

    #[test]
    fn hysteresis_and_tolerance() {
        let factors = ReadingFactors {
            tolerance: 3,
            ..linear_factors(-2, 100, 0, 0)
        };

        assert_eq!(convert_hysteresis(0x00, &factors), None);
        assert_eq!(convert_hysteresis(0xFF, &factors), None);
        assert_eq!(convert_hysteresis(4, &factors), Some(8.0));
        assert_eq!(convert_tolerance(&factors), 3.0);
    }
}
