//! Length units and the fixed 96-per-inch reference ratio

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConversionError;

/// Intrinsic (user) units per inch
pub const PX_PER_INCH: f64 = 96.0;

/// A CSS absolute length unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Unit {
    Pixel,
    Inch,
    Millimeter,
    Centimeter,
    Point,
    Pica,
    QuarterMillimeter,
}

impl Unit {
    /// Number of intrinsic pixels in one of this unit
    pub fn px_per_unit(self) -> f64 {
        match self {
            Unit::Pixel => 1.0,
            Unit::Inch => PX_PER_INCH,
            Unit::Millimeter => PX_PER_INCH / 25.4,
            Unit::Centimeter => PX_PER_INCH / 2.54,
            Unit::Point => PX_PER_INCH / 72.0,
            Unit::Pica => PX_PER_INCH / 6.0,
            Unit::QuarterMillimeter => PX_PER_INCH / 101.6,
        }
    }

    /// Suffix used when writing a length in this unit
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Pixel => "px",
            Unit::Inch => "in",
            Unit::Millimeter => "mm",
            Unit::Centimeter => "cm",
            Unit::Point => "pt",
            Unit::Pica => "pc",
            Unit::QuarterMillimeter => "Q",
        }
    }

    /// Whether the unit measures real-world distance
    pub fn is_physical(self) -> bool {
        !matches!(self, Unit::Pixel)
    }

    /// Parse a unit suffix; an empty suffix means pixels
    pub fn from_suffix(suffix: &str) -> Result<Self, ConversionError> {
        match suffix.trim() {
            "" | "px" => Ok(Unit::Pixel),
            "in" => Ok(Unit::Inch),
            "mm" => Ok(Unit::Millimeter),
            "cm" => Ok(Unit::Centimeter),
            "pt" => Ok(Unit::Point),
            "pc" => Ok(Unit::Pica),
            "Q" | "q" => Ok(Unit::QuarterMillimeter),
            other => Err(ConversionError::UnknownUnit(other.to_string())),
        }
    }
}

impl FromStr for Unit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inch" | "inches" => Ok(Unit::Inch),
            "millimeter" | "millimeters" | "millimetre" | "millimetres" => Ok(Unit::Millimeter),
            "centimeter" | "centimeters" | "centimetre" | "centimetres" => Ok(Unit::Centimeter),
            "pixel" | "pixels" => Ok(Unit::Pixel),
            "point" | "points" => Ok(Unit::Point),
            "pica" | "picas" => Ok(Unit::Pica),
            _ => Unit::from_suffix(s),
        }
    }
}

impl TryFrom<String> for Unit {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// A number with a unit, as written in `width="210mm"`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    pub value: f64,
    pub unit: Unit,
}

impl Length {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Parse an absolute length; percentages and unknown units are errors
    pub fn parse(s: &str) -> Result<Self, ConversionError> {
        let trimmed = s.trim();
        if trimmed.ends_with('%') {
            return Err(ConversionError::RelativeDimension(trimmed.to_string()));
        }
        let (number, suffix) = trimmed.split_at(numeric_prefix(trimmed));
        let value: f64 = number
            .trim()
            .parse()
            .map_err(|_| ConversionError::InvalidLength(trimmed.to_string()))?;
        Ok(Self::new(value, Unit::from_suffix(suffix)?))
    }

    /// Length in intrinsic pixels
    pub fn to_px(self) -> f64 {
        self.value * self.unit.px_per_unit()
    }
}

/// Byte length of the number at the start of `s`
///
/// An `e` only belongs to the number when digits follow it, so `12em` splits
/// as `12` and `em`.
fn numeric_prefix(s: &str) -> usize {
    let bytes = s.as_bytes();
    let digits = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    end = digits(end);
    if bytes.get(end) == Some(&b'.') {
        end = digits(end + 1);
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let after = digits(exponent);
        if after > exponent {
            end = after;
        }
    }
    end
}

/// Format a number with at most `precision` decimals and no trailing zeros
pub fn format_number(value: f64, precision: usize) -> String {
    let mut s = format!("{:.*}", precision, value);
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}
