//! Angle units and conversions
//!
//! Each contact angle is entered in its own unit. Internally every calculation
//! runs in radians.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Unit an angle value is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AngleUnit {
    #[default]
    #[serde(rename = "deg")]
    Degrees,
    #[serde(rename = "rad")]
    Radians,
    /// Multiples of π (value 0.5 means π/2)
    #[serde(rename = "pi")]
    PiMultiples,
}

impl AngleUnit {
    /// Value used by the unit selectors
    pub fn as_str(&self) -> &'static str {
        match self {
            AngleUnit::Degrees => "deg",
            AngleUnit::Radians => "rad",
            AngleUnit::PiMultiples => "pi",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "deg" | "degrees" | "°" => Some(AngleUnit::Degrees),
            "rad" | "radians" => Some(AngleUnit::Radians),
            "pi" | "π" => Some(AngleUnit::PiMultiples),
            _ => None,
        }
    }

    /// Convert a value in this unit to radians
    #[inline]
    pub fn to_radians(&self, value: f64) -> f64 {
        match self {
            AngleUnit::Degrees => value * PI / 180.0,
            AngleUnit::Radians => value,
            AngleUnit::PiMultiples => value * PI,
        }
    }

    /// Convert radians to a value in this unit
    #[inline]
    pub fn from_radians(&self, radians: f64) -> f64 {
        match self {
            AngleUnit::Degrees => radians * 180.0 / PI,
            AngleUnit::Radians => radians,
            AngleUnit::PiMultiples => radians / PI,
        }
    }
}

/// An angle value tagged with the unit it was entered in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Angle {
    pub value: f64,
    pub unit: AngleUnit,
}

impl Angle {
    pub fn new(value: f64, unit: AngleUnit) -> Self {
        Self { value, unit }
    }

    pub fn degrees(value: f64) -> Self {
        Self::new(value, AngleUnit::Degrees)
    }

    /// Express `radians` in `unit`
    pub fn from_radians(radians: f64, unit: AngleUnit) -> Self {
        Self::new(unit.from_radians(radians), unit)
    }

    #[inline]
    pub fn radians(&self) -> f64 {
        self.unit.to_radians(self.value)
    }

    /// Same angle re-expressed in another unit
    pub fn in_unit(&self, unit: AngleUnit) -> Self {
        Self::from_radians(self.radians(), unit)
    }

    /// Value in degrees (what the sliders show)
    pub fn as_degrees(&self) -> f64 {
        AngleUnit::Degrees.from_radians(self.radians())
    }
}
