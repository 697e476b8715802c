// ABOUTME: Sample and query result models returned by the health access layer
// ABOUTME: Sleep stages, workout kinds, samples, and unit-tagged query results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::units::{Unit, UnitSystem};

/// Stage recorded by a sleep-analysis event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepStage {
    /// In bed, not necessarily asleep
    InBed,
    /// Asleep, stage not reported
    Asleep,
    /// Awake during the session
    Awake,
    /// Core (light) sleep
    Core,
    /// Deep sleep
    Deep,
    /// REM sleep
    Rem,
}

/// Activity performed during a workout
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutKind {
    /// Running
    Run,
    /// Walking
    Walk,
    /// Cycling
    Ride,
    /// Swimming
    Swim,
    /// Hiking
    Hike,
    /// Strength training
    StrengthTraining,
    /// Yoga
    Yoga,
    /// High intensity interval training
    Hiit,
    /// Rowing
    Rowing,
    /// Store-specific activity without a dedicated variant
    Other(String),
}

/// Classification attached to event-kind samples
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SampleCategory {
    /// Sleep analysis stage
    Sleep(SleepStage),
    /// Workout activity
    Workout(WorkoutKind),
}

/// A single record read from the store
///
/// Values are left exactly as the store reported them; `unit` says how to read
/// `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// When the sample begins
    pub start: DateTime<Utc>,
    /// When the sample ends
    pub end: DateTime<Utc>,
    /// Raw numeric value
    pub value: f64,
    /// Unit of `value`
    pub unit: Unit,
    /// Event classification, for sleep and workout samples
    pub category: Option<SampleCategory>,
}

impl Sample {
    /// Time covered by the sample
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Sleep stage, when this is a sleep-analysis sample
    #[must_use]
    pub const fn sleep_stage(&self) -> Option<SleepStage> {
        match &self.category {
            Some(SampleCategory::Sleep(stage)) => Some(*stage),
            _ => None,
        }
    }
}

/// Payload of a query, shaped by the metric's sample kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum QueryValue {
    /// Latest sample value, absent when nothing was ever recorded
    Point(Option<f64>),
    /// Sum over the interval, zero when nothing was recorded
    Sum(f64),
    /// Events ordered by start time, newest first
    Samples(Vec<Sample>),
}

/// Query payload tagged with the unit system its numbers are expressed in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Query payload
    pub value: QueryValue,
    /// Unit system of every number in `value`
    pub unit_system: UnitSystem,
}

impl QueryResult {
    /// Result expressed in provider-native units
    #[must_use]
    pub const fn native(value: QueryValue) -> Self {
        Self {
            value,
            unit_system: UnitSystem::provider_native(),
        }
    }

    /// Scalar value for point and sum results
    #[must_use]
    pub const fn scalar(&self) -> Option<f64> {
        match self.value {
            QueryValue::Point(value) => value,
            QueryValue::Sum(value) => Some(value),
            QueryValue::Samples(_) => None,
        }
    }

    /// Consume into the sample list, empty for point and sum results
    #[must_use]
    pub fn into_samples(self) -> Vec<Sample> {
        match self.value {
            QueryValue::Samples(samples) => samples,
            QueryValue::Point(_) | QueryValue::Sum(_) => Vec::new(),
        }
    }
}
