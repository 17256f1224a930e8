//! # Unit Types
//!
//! The geometry is unit-agnostic, but people type numbers in some unit. A
//! [`LengthUnit`] fixes the unit of the edge and radii; areas and volumes
//! follow as its square and cube.
//!
//! Centimeters are the reference unit (the calculator page works in cm).
//!
//! ## Example
//!
//! ```rust
//! use dodeca_core::units::{Dimension, LengthUnit};
//!
//! // 1 m³ is a million cm³
//! let cm3 = LengthUnit::Meter.convert(1.0, Dimension::Volume, LengthUnit::Centimeter);
//! assert!((cm3 - 1.0e6).abs() < 1e-6);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

/// Physical dimension of a measure, as a power of length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// L¹ (edge, radii)
    Length,
    /// L² (surface area)
    Area,
    /// L³ (volume)
    Volume,
}

impl Dimension {
    /// Power of length this dimension carries
    pub fn exponent(self) -> i32 {
        match self {
            Dimension::Length => 1,
            Dimension::Area => 2,
            Dimension::Volume => 3,
        }
    }
}

/// Length unit used for input and output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    #[serde(rename = "mm")]
    Millimeter,
    #[default]
    #[serde(rename = "cm")]
    Centimeter,
    #[serde(rename = "m")]
    Meter,
    #[serde(rename = "in")]
    Inch,
}

impl LengthUnit {
    pub const ALL: [LengthUnit; 4] = [
        LengthUnit::Millimeter,
        LengthUnit::Centimeter,
        LengthUnit::Meter,
        LengthUnit::Inch,
    ];

    /// Length of one unit in centimeters
    pub fn centimeters(self) -> f64 {
        match self {
            LengthUnit::Millimeter => 0.1,
            LengthUnit::Centimeter => 1.0,
            LengthUnit::Meter => 100.0,
            LengthUnit::Inch => 2.54,
        }
    }

    /// Short code ("mm", "cm", "m", "in")
    pub fn code(self) -> &'static str {
        match self {
            LengthUnit::Millimeter => "mm",
            LengthUnit::Centimeter => "cm",
            LengthUnit::Meter => "m",
            LengthUnit::Inch => "in",
        }
    }

    /// Convert a value of the given dimension from `self` to `target`.
    pub fn convert(self, value: f64, dimension: Dimension, target: LengthUnit) -> f64 {
        if self == target {
            return value;
        }
        let factor = self.centimeters() / target.centimeters();
        value * factor.powi(dimension.exponent())
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LengthUnit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        LengthUnit::ALL
            .into_iter()
            .find(|u| u.code() == code)
            .ok_or_else(|| CalcError::invalid_input("unit", s, "Expected one of mm, cm, m, in"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_conversion() {
        let mm = LengthUnit::Centimeter.convert(5.0, Dimension::Length, LengthUnit::Millimeter);
        assert!((mm - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_area_and_volume_scale_with_power() {
        let sq_cm = LengthUnit::Inch.convert(1.0, Dimension::Area, LengthUnit::Centimeter);
        assert!((sq_cm - 6.4516).abs() < 1e-9);

        let cm3 = LengthUnit::Millimeter.convert(1000.0, Dimension::Volume, LengthUnit::Centimeter);
        assert!((cm3 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_same_unit_is_identity() {
        let v = 957.89;
        assert_eq!(LengthUnit::Centimeter.convert(v, Dimension::Volume, LengthUnit::Centimeter), v);
    }

    #[test]
    fn test_parse_units() {
        assert_eq!("CM".parse::<LengthUnit>().unwrap(), LengthUnit::Centimeter);
        assert_eq!(" in ".parse::<LengthUnit>().unwrap(), LengthUnit::Inch);
        assert!("furlong".parse::<LengthUnit>().is_err());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&LengthUnit::Meter).unwrap();
        assert_eq!(json, "\"m\"");
        let roundtrip: LengthUnit = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, LengthUnit::Meter);
    }
}
