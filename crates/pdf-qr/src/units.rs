//! Linear units and conversion to PDF points

use crate::constants::{POINTS_PER_CM, POINTS_PER_MM};
use crate::types::{QrError, Result};
use std::fmt;
use std::str::FromStr;

/// Physical units accepted for positions and sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    #[cfg_attr(
        feature = "serde",
        serde(rename = "pt", alias = "pts", alias = "point", alias = "points")
    )]
    Point,
    #[cfg_attr(feature = "serde", serde(rename = "mm"))]
    Millimeter,
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "cm"))]
    Centimeter,
}

impl Unit {
    /// Points per one of this unit
    pub fn points_per_unit(self) -> f64 {
        match self {
            Unit::Point => 1.0,
            Unit::Millimeter => POINTS_PER_MM,
            Unit::Centimeter => POINTS_PER_CM,
        }
    }

    pub fn to_points(self, value: f64) -> f64 {
        match self {
            Unit::Point => value,
            _ => value * self.points_per_unit(),
        }
    }

    pub fn from_points(self, value_pt: f64) -> f64 {
        match self {
            Unit::Point => value_pt,
            _ => value_pt / self.points_per_unit(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Point => "pt",
            Unit::Millimeter => "mm",
            Unit::Centimeter => "cm",
        }
    }
}

impl FromStr for Unit {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pt" | "pts" | "point" | "points" => Ok(Unit::Point),
            "mm" => Ok(Unit::Millimeter),
            "cm" => Ok(Unit::Centimeter),
            _ => Err(QrError::UnsupportedUnit(s.to_string())),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A length together with the unit it was expressed in
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    pub value: f64,
    pub unit: Unit,
}

impl Measurement {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn pt(value: f64) -> Self {
        Self::new(value, Unit::Point)
    }

    pub fn mm(value: f64) -> Self {
        Self::new(value, Unit::Millimeter)
    }

    pub fn cm(value: f64) -> Self {
        Self::new(value, Unit::Centimeter)
    }

    pub fn to_points(self) -> f64 {
        self.unit.to_points(self.value)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Convert `value` expressed in `unit` (`pt`, `mm` or `cm`) to points.
pub fn to_points(value: f64, unit: &str) -> Result<f64> {
    Ok(unit.parse::<Unit>()?.to_points(value))
}

/// Inverse of [`to_points`].
pub fn from_points(value_pt: f64, unit: &str) -> Result<f64> {
    Ok(unit.parse::<Unit>()?.from_points(value_pt))
}
