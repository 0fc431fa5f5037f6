//! Unit conversion between canonical metric values and display units.
//!
//! Depth, visibility and water temperature are always stored in meters and
//! degrees Celsius. The functions here are only called at the input/output
//! boundary.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Feet in one meter.
pub const FEET_PER_METER: f64 = 3.28084;

/// Temperature display unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TempUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

/// Distance display unit, used for depth and visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Meters,
    Feet,
}

impl TempUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            TempUnit::Celsius => "°C",
            TempUnit::Fahrenheit => "°F",
        }
    }
}

impl DistanceUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            DistanceUnit::Meters => "m",
            DistanceUnit::Feet => "ft",
        }
    }
}

impl fmt::Display for TempUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TempUnit::Celsius => write!(f, "celsius"),
            TempUnit::Fahrenheit => write!(f, "fahrenheit"),
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceUnit::Meters => write!(f, "meters"),
            DistanceUnit::Feet => write!(f, "feet"),
        }
    }
}

/// Rounds to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Converts a stored Celsius value to the display unit.
pub fn to_display_temp(celsius: f64, unit: TempUnit) -> f64 {
    match unit {
        TempUnit::Celsius => celsius,
        TempUnit::Fahrenheit => round1(celsius * 9.0 / 5.0 + 32.0),
    }
}

/// Converts a stored meter value to the display unit.
pub fn to_display_distance(meters: f64, unit: DistanceUnit) -> f64 {
    match unit {
        DistanceUnit::Meters => meters,
        DistanceUnit::Feet => round1(meters * FEET_PER_METER),
    }
}

/// Converts a temperature entered in `from` into Celsius.
pub fn to_metric_temp(value: f64, from: TempUnit) -> f64 {
    match from {
        TempUnit::Celsius => value,
        TempUnit::Fahrenheit => round1((value - 32.0) * 5.0 / 9.0),
    }
}

/// Converts a distance entered in `from` into meters.
pub fn to_metric_distance(value: f64, from: DistanceUnit) -> f64 {
    match from {
        DistanceUnit::Meters => value,
        DistanceUnit::Feet => round1(value / FEET_PER_METER),
    }
}
