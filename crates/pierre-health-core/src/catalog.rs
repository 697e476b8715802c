// ABOUTME: Static metric catalog mapping each metric to its store type, sample kind, and units
// ABOUTME: Adding a metric is a variant plus one descriptor row; nothing else branches per metric
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Metric Catalog
//!
//! The catalog is a closed table: [`descriptor`] is an exhaustive `match`, so a
//! metric without a descriptor does not compile. The only runtime path to an
//! unknown metric is parsing an identifier string, which yields a
//! [`ParseError`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::provider_types;
use crate::errors::ParseError;
use crate::models::SleepStage;
use crate::units::{Unit, UnitSystem};

/// Opaque handle into the external store's type system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProviderType(&'static str);

impl ProviderType {
    /// Wrap a store type identifier
    #[must_use]
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    /// Raw identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// How a metric's data is queried and aggregated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleKind {
    /// Only the most recent sample matters (body measurements)
    PointSample,
    /// Values are summed over the interval (steps, distance, energy)
    CumulativeSum,
    /// Each sample is a discrete event returned as-is (sleep, workouts)
    EventList,
}

/// Abstract health metric identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricId {
    // Body measurements
    /// Body height
    Height,
    /// Body mass
    BodyMass,
    /// Body fat percentage
    BodyFatPercentage,
    /// Lean body mass
    LeanBodyMass,
    /// Waist circumference
    WaistCircumference,
    /// Body temperature
    BodyTemperature,
    /// Resting heart rate
    RestingHeartRate,
    /// Maximal oxygen uptake
    Vo2Max,
    /// Vendor-computed sleep score (no store counterpart)
    SleepScore,

    // Activity
    /// Step count
    StepCount,
    /// Walking and running distance
    WalkingRunningDistance,
    /// Cycling distance
    CyclingDistance,
    /// Active energy burned
    ActiveEnergy,
    /// Basal energy burned
    BasalEnergy,
    /// Flights of stairs climbed
    FlightsClimbed,
    /// Exercise minutes
    ExerciseTime,

    // Sleep stage durations
    /// Time in bed
    SleepInBed,
    /// Time asleep, stage unspecified
    SleepAsleep,
    /// Core sleep
    SleepCore,
    /// Deep sleep
    SleepDeep,
    /// REM sleep
    SleepRem,
    /// Awake during the sleep session
    SleepAwake,

    // Events
    /// Sleep analysis events
    SleepAnalysis,
    /// Workouts
    Workouts,
}

impl MetricId {
    /// Every registered metric
    pub const ALL: [Self; 24] = [
        Self::Height,
        Self::BodyMass,
        Self::BodyFatPercentage,
        Self::LeanBodyMass,
        Self::WaistCircumference,
        Self::BodyTemperature,
        Self::RestingHeartRate,
        Self::Vo2Max,
        Self::SleepScore,
        Self::StepCount,
        Self::WalkingRunningDistance,
        Self::CyclingDistance,
        Self::ActiveEnergy,
        Self::BasalEnergy,
        Self::FlightsClimbed,
        Self::ExerciseTime,
        Self::SleepInBed,
        Self::SleepAsleep,
        Self::SleepCore,
        Self::SleepDeep,
        Self::SleepRem,
        Self::SleepAwake,
        Self::SleepAnalysis,
        Self::Workouts,
    ];

    /// Snake-case identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Height => "height",
            Self::BodyMass => "body_mass",
            Self::BodyFatPercentage => "body_fat_percentage",
            Self::LeanBodyMass => "lean_body_mass",
            Self::WaistCircumference => "waist_circumference",
            Self::BodyTemperature => "body_temperature",
            Self::RestingHeartRate => "resting_heart_rate",
            Self::Vo2Max => "vo2_max",
            Self::SleepScore => "sleep_score",
            Self::StepCount => "step_count",
            Self::WalkingRunningDistance => "walking_running_distance",
            Self::CyclingDistance => "cycling_distance",
            Self::ActiveEnergy => "active_energy",
            Self::BasalEnergy => "basal_energy",
            Self::FlightsClimbed => "flights_climbed",
            Self::ExerciseTime => "exercise_time",
            Self::SleepInBed => "sleep_in_bed",
            Self::SleepAsleep => "sleep_asleep",
            Self::SleepCore => "sleep_core",
            Self::SleepDeep => "sleep_deep",
            Self::SleepRem => "sleep_rem",
            Self::SleepAwake => "sleep_awake",
            Self::SleepAnalysis => "sleep_analysis",
            Self::Workouts => "workouts",
        }
    }

    /// Catalog entry for this metric
    #[must_use]
    pub const fn descriptor(self) -> MetricDescriptor {
        descriptor(self)
    }

    /// Store type for this metric, `None` when the store has no counterpart
    #[must_use]
    pub const fn provider_type(self) -> Option<ProviderType> {
        descriptor(self).provider_type
    }

    /// Query strategy for this metric
    #[must_use]
    pub const fn sample_kind(self) -> SampleKind {
        descriptor(self).sample_kind
    }

    /// Sleep stage aggregated by this metric, for sleep-stage duration metrics
    #[must_use]
    pub const fn sleep_stage(self) -> Option<SleepStage> {
        match self {
            Self::SleepInBed => Some(SleepStage::InBed),
            Self::SleepAsleep => Some(SleepStage::Asleep),
            Self::SleepCore => Some(SleepStage::Core),
            Self::SleepDeep => Some(SleepStage::Deep),
            Self::SleepRem => Some(SleepStage::Rem),
            Self::SleepAwake => Some(SleepStage::Awake),
            _ => None,
        }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|metric| metric.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseError::new("metric", s))
    }
}

/// Static description of how a metric is stored and expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricDescriptor {
    /// Metric described
    pub metric: MetricId,
    /// Query strategy
    pub sample_kind: SampleKind,
    /// Store type, `None` when the store has no counterpart
    pub provider_type: Option<ProviderType>,
    metric_unit: Unit,
    imperial_unit: Unit,
}

impl MetricDescriptor {
    const fn new(
        metric: MetricId,
        sample_kind: SampleKind,
        provider_type: Option<&'static str>,
        metric_unit: Unit,
        imperial_unit: Unit,
    ) -> Self {
        let provider_type = match provider_type {
            Some(id) => Some(ProviderType::new(id)),
            None => None,
        };
        Self {
            metric,
            sample_kind,
            provider_type,
            metric_unit,
            imperial_unit,
        }
    }

    /// Unit this metric is expressed in under `system`
    #[must_use]
    pub const fn unit_for(&self, system: UnitSystem) -> Unit {
        match system {
            UnitSystem::Metric => self.metric_unit,
            UnitSystem::Imperial => self.imperial_unit,
        }
    }

    /// Unit raw store values are normalized into
    #[must_use]
    pub const fn native_unit(&self) -> Unit {
        self.unit_for(UnitSystem::provider_native())
    }

    /// Whether switching unit systems changes the numeric value
    #[must_use]
    pub fn has_physical_conversion(&self) -> bool {
        self.metric_unit != self.imperial_unit
    }
}

/// Look up the catalog entry for `metric`
#[must_use]
pub const fn descriptor(metric: MetricId) -> MetricDescriptor {
    use provider_types as pt;
    use MetricId as M;
    use SampleKind::{CumulativeSum, EventList, PointSample};

    match metric {
        M::Height => MetricDescriptor::new(
            metric,
            PointSample,
            Some(pt::HEIGHT),
            Unit::Meter,
            Unit::Inch,
        ),
        M::BodyMass => MetricDescriptor::new(
            metric,
            PointSample,
            Some(pt::BODY_MASS),
            Unit::Kilogram,
            Unit::Pound,
        ),
        M::BodyFatPercentage => MetricDescriptor::new(
            metric,
            PointSample,
            Some(pt::BODY_FAT_PERCENTAGE),
            Unit::Percent,
            Unit::Percent,
        ),
        M::LeanBodyMass => MetricDescriptor::new(
            metric,
            PointSample,
            Some(pt::LEAN_BODY_MASS),
            Unit::Kilogram,
            Unit::Pound,
        ),
        M::WaistCircumference => MetricDescriptor::new(
            metric,
            PointSample,
            Some(pt::WAIST_CIRCUMFERENCE),
            Unit::Centimeter,
            Unit::Inch,
        ),
        M::BodyTemperature => MetricDescriptor::new(
            metric,
            PointSample,
            Some(pt::BODY_TEMPERATURE),
            Unit::Celsius,
            Unit::Fahrenheit,
        ),
        M::RestingHeartRate => MetricDescriptor::new(
            metric,
            PointSample,
            Some(pt::RESTING_HEART_RATE),
            Unit::BeatsPerMinute,
            Unit::BeatsPerMinute,
        ),
        M::Vo2Max => MetricDescriptor::new(
            metric,
            PointSample,
            Some(pt::VO2_MAX),
            Unit::MillilitersPerKilogramMinute,
            Unit::MillilitersPerKilogramMinute,
        ),
        M::SleepScore => {
            MetricDescriptor::new(metric, PointSample, None, Unit::Percent, Unit::Percent)
        }
        M::StepCount => MetricDescriptor::new(
            metric,
            CumulativeSum,
            Some(pt::STEP_COUNT),
            Unit::Count,
            Unit::Count,
        ),
        M::WalkingRunningDistance => MetricDescriptor::new(
            metric,
            CumulativeSum,
            Some(pt::DISTANCE_WALKING_RUNNING),
            Unit::Meter,
            Unit::Mile,
        ),
        M::CyclingDistance => MetricDescriptor::new(
            metric,
            CumulativeSum,
            Some(pt::DISTANCE_CYCLING),
            Unit::Meter,
            Unit::Mile,
        ),
        M::ActiveEnergy => MetricDescriptor::new(
            metric,
            CumulativeSum,
            Some(pt::ACTIVE_ENERGY_BURNED),
            Unit::Kilocalorie,
            Unit::Kilocalorie,
        ),
        M::BasalEnergy => MetricDescriptor::new(
            metric,
            CumulativeSum,
            Some(pt::BASAL_ENERGY_BURNED),
            Unit::Kilocalorie,
            Unit::Kilocalorie,
        ),
        M::FlightsClimbed => MetricDescriptor::new(
            metric,
            CumulativeSum,
            Some(pt::FLIGHTS_CLIMBED),
            Unit::Count,
            Unit::Count,
        ),
        M::ExerciseTime => MetricDescriptor::new(
            metric,
            CumulativeSum,
            Some(pt::EXERCISE_TIME),
            Unit::Minute,
            Unit::Minute,
        ),
        M::SleepInBed => sleep_stage(metric, pt::SLEEP_IN_BED),
        M::SleepAsleep => sleep_stage(metric, pt::SLEEP_ASLEEP),
        M::SleepCore => sleep_stage(metric, pt::SLEEP_CORE),
        M::SleepDeep => sleep_stage(metric, pt::SLEEP_DEEP),
        M::SleepRem => sleep_stage(metric, pt::SLEEP_REM),
        M::SleepAwake => sleep_stage(metric, pt::SLEEP_AWAKE),
        M::SleepAnalysis => MetricDescriptor::new(
            metric,
            EventList,
            Some(pt::SLEEP_ANALYSIS),
            Unit::Hour,
            Unit::Hour,
        ),
        M::Workouts => {
            MetricDescriptor::new(metric, EventList, Some(pt::WORKOUT), Unit::Minute, Unit::Minute)
        }
    }
}

const fn sleep_stage(metric: MetricId, provider_type: &'static str) -> MetricDescriptor {
    MetricDescriptor::new(
        metric,
        SampleKind::CumulativeSum,
        Some(provider_type),
        Unit::Hour,
        Unit::Hour,
    )
}

/// Unit for `metric` under `system`
#[must_use]
pub const fn unit_for(metric: MetricId, system: UnitSystem) -> Unit {
    descriptor(metric).unit_for(system)
}
