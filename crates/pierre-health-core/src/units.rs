// ABOUTME: Unit systems, physical unit tokens, and metric-aware value conversion
// ABOUTME: Conversions are direct between two units, never chained through a third system
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Units
//!
//! Values leave the store in each metric's provider-native unit (the unit the
//! catalog assigns to [`UnitSystem::Metric`]) and are converted into whichever
//! system the caller has selected.
//!
//! ```rust
//! use pierre_health_core::{convert, MetricId, UnitSystem};
//!
//! let inches = convert(1.80, MetricId::Height, UnitSystem::Metric, UnitSystem::Imperial);
//! assert!((inches - 70.866).abs() < 1e-3);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::{descriptor, MetricId};
use crate::constants::conversion;
use crate::errors::ParseError;

/// Convention for expressing physical quantities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    /// SI-based units (meters, kilograms, degrees Celsius)
    #[default]
    Metric,
    /// US customary units (inches, pounds, miles, degrees Fahrenheit)
    Imperial,
}

impl UnitSystem {
    /// Both unit systems
    pub const ALL: [Self; 2] = [Self::Metric, Self::Imperial];

    /// The system raw store values are expressed in
    #[must_use]
    pub const fn provider_native() -> Self {
        Self::Metric
    }

    /// Lowercase identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitSystem {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" | "si" => Ok(Self::Metric),
            "imperial" | "us" => Ok(Self::Imperial),
            _ => Err(ParseError::new("unit system", s)),
        }
    }
}

/// Physical dimension of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Distances and body lengths
    Length,
    /// Body mass
    Mass,
    /// Energy expenditure
    Energy,
    /// Body temperature
    Temperature,
    /// Durations
    Time,
    /// Dimensionless counts (steps, flights)
    Count,
    /// Percentages and scores
    Percent,
    /// Heart rate
    Frequency,
    /// Oxygen uptake per body mass
    OxygenUptake,
}

/// Physical unit token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Meter
    Meter,
    /// Centimeter
    Centimeter,
    /// Kilometer
    Kilometer,
    /// International inch
    Inch,
    /// International foot
    Foot,
    /// Statute mile
    Mile,
    /// Kilogram
    Kilogram,
    /// Gram
    Gram,
    /// Avoirdupois pound
    Pound,
    /// Kilocalorie
    Kilocalorie,
    /// Kilojoule
    Kilojoule,
    /// Degree Celsius
    Celsius,
    /// Degree Fahrenheit
    Fahrenheit,
    /// Second
    Second,
    /// Minute
    Minute,
    /// Hour
    Hour,
    /// Plain count
    Count,
    /// Percentage (0-100)
    Percent,
    /// Beats per minute
    BeatsPerMinute,
    /// Milliliters of oxygen per kilogram per minute
    MillilitersPerKilogramMinute,
}

impl Unit {
    /// Physical dimension of this unit
    #[must_use]
    pub const fn dimension(self) -> Dimension {
        match self {
            Self::Meter
            | Self::Centimeter
            | Self::Kilometer
            | Self::Inch
            | Self::Foot
            | Self::Mile => Dimension::Length,
            Self::Kilogram | Self::Gram | Self::Pound => Dimension::Mass,
            Self::Kilocalorie | Self::Kilojoule => Dimension::Energy,
            Self::Celsius | Self::Fahrenheit => Dimension::Temperature,
            Self::Second | Self::Minute | Self::Hour => Dimension::Time,
            Self::Count => Dimension::Count,
            Self::Percent => Dimension::Percent,
            Self::BeatsPerMinute => Dimension::Frequency,
            Self::MillilitersPerKilogramMinute => Dimension::OxygenUptake,
        }
    }

    /// Display symbol
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Meter => "m",
            Self::Centimeter => "cm",
            Self::Kilometer => "km",
            Self::Inch => "in",
            Self::Foot => "ft",
            Self::Mile => "mi",
            Self::Kilogram => "kg",
            Self::Gram => "g",
            Self::Pound => "lb",
            Self::Kilocalorie => "kcal",
            Self::Kilojoule => "kJ",
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
            Self::Second => "s",
            Self::Minute => "min",
            Self::Hour => "h",
            Self::Count => "count",
            Self::Percent => "%",
            Self::BeatsPerMinute => "bpm",
            Self::MillilitersPerKilogramMinute => "mL/kg·min",
        }
    }

    /// Affine mapping `(factor, offset)` into the dimension's SI base unit
    ///
    /// `base = value * factor + offset`. Only temperatures carry an offset, so
    /// every other dimension converts with a single factor ratio.
    const fn to_base(self) -> (f64, f64) {
        match self {
            Self::Centimeter => (conversion::METERS_PER_CENTIMETER, 0.0),
            Self::Kilometer => (conversion::METERS_PER_KILOMETER, 0.0),
            Self::Inch => (conversion::METERS_PER_INCH, 0.0),
            Self::Foot => (conversion::METERS_PER_FOOT, 0.0),
            Self::Mile => (conversion::METERS_PER_MILE, 0.0),
            Self::Gram => (conversion::KILOGRAMS_PER_GRAM, 0.0),
            Self::Pound => (conversion::KILOGRAMS_PER_POUND, 0.0),
            Self::Kilocalorie => (conversion::JOULES_PER_KILOCALORIE, 0.0),
            Self::Kilojoule => (conversion::JOULES_PER_KILOJOULE, 0.0),
            Self::Celsius => (1.0, conversion::CELSIUS_KELVIN_OFFSET),
            Self::Fahrenheit => (
                conversion::KELVIN_PER_FAHRENHEIT,
                conversion::FAHRENHEIT_RANKINE_OFFSET * conversion::KELVIN_PER_FAHRENHEIT,
            ),
            Self::Minute => (conversion::SECONDS_PER_MINUTE, 0.0),
            Self::Hour => (conversion::SECONDS_PER_HOUR, 0.0),
            Self::Meter
            | Self::Kilogram
            | Self::Second
            | Self::Count
            | Self::Percent
            | Self::BeatsPerMinute
            | Self::MillilitersPerKilogramMinute => (1.0, 0.0),
        }
    }

    /// Convert `value` from this unit into `target`
    ///
    /// Returns the input untouched when the units are equal and `None` when
    /// they measure different dimensions. Linear units use one combined factor;
    /// only temperature passes through its absolute base.
    #[must_use]
    pub fn convert(self, value: f64, target: Self) -> Option<f64> {
        if self == target {
            return Some(value);
        }
        if self.dimension() != target.dimension() {
            return None;
        }

        let (from_factor, from_offset) = self.to_base();
        let (to_factor, to_offset) = target.to_base();

        if self.dimension() != Dimension::Temperature {
            return Some(value * (from_factor / to_factor));
        }

        // Celsius and Fahrenheit have a direct closed form, the kelvin path is the fallback
        match (self, target) {
            (Self::Celsius, Self::Fahrenheit) => Some(value * 9.0 / 5.0 + 32.0),
            (Self::Fahrenheit, Self::Celsius) => Some((value - 32.0) * 5.0 / 9.0),
            _ => Some(value.mul_add(from_factor, from_offset - to_offset) / to_factor),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A numeric value paired with its unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Numeric value
    pub value: f64,
    /// Unit the value is expressed in
    pub unit: Unit,
}

impl Measurement {
    /// Create a measurement
    #[must_use]
    pub const fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Express this measurement in another unit of the same dimension
    #[must_use]
    pub fn to_unit(self, unit: Unit) -> Option<Self> {
        self.unit
            .convert(self.value, unit)
            .map(|value| Self { value, unit })
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(precision) => write!(f, "{:.*} {}", precision, self.value, self.unit),
            None => write!(f, "{} {}", self.value, self.unit),
        }
    }
}

/// Convert a metric value between unit systems
///
/// Identity when `from == to` (bit-for-bit, no arithmetic) and for metrics whose
/// unit is the same in both systems. Otherwise converts directly from the
/// `from` unit to the `to` unit.
#[must_use]
pub fn convert(value: f64, metric: MetricId, from: UnitSystem, to: UnitSystem) -> f64 {
    if from == to {
        return value;
    }

    let descriptor = descriptor(metric);
    let source = descriptor.unit_for(from);
    let target = descriptor.unit_for(to);

    source.convert(value, target).unwrap_or_else(|| {
        warn!(
            metric = %metric,
            from = %source,
            to = %target,
            "Catalog units differ in dimension, returning value unconverted"
        );
        value
    })
}
