// ABOUTME: Constants for unit conversion, provider type identifiers, and configuration keys
// ABOUTME: Centralizes exact conversion factors so no module hard-codes its own copy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Exact conversion factors into SI base units
///
/// Every factor here is exact by definition (international yard and pound
/// agreement, thermochemical calorie), so conversions built from them carry no
/// error beyond a single floating-point multiplication.
pub mod conversion {
    /// Meters per international inch
    pub const METERS_PER_INCH: f64 = 0.0254;
    /// Meters per international foot
    pub const METERS_PER_FOOT: f64 = 0.3048;
    /// Meters per statute mile
    pub const METERS_PER_MILE: f64 = 1_609.344;
    /// Meters per centimeter
    pub const METERS_PER_CENTIMETER: f64 = 0.01;
    /// Meters per kilometer
    pub const METERS_PER_KILOMETER: f64 = 1_000.0;
    /// Kilograms per avoirdupois pound
    pub const KILOGRAMS_PER_POUND: f64 = 0.453_592_37;
    /// Kilograms per gram
    pub const KILOGRAMS_PER_GRAM: f64 = 0.001;
    /// Joules per thermochemical kilocalorie
    pub const JOULES_PER_KILOCALORIE: f64 = 4_184.0;
    /// Joules per kilojoule
    pub const JOULES_PER_KILOJOULE: f64 = 1_000.0;
    /// Seconds per minute
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
    /// Seconds per hour
    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
    /// Kelvin offset of the Celsius scale
    pub const CELSIUS_KELVIN_OFFSET: f64 = 273.15;
    /// Kelvin per degree Fahrenheit
    pub const KELVIN_PER_FAHRENHEIT: f64 = 5.0 / 9.0;
    /// Fahrenheit reading at absolute zero, negated
    pub const FAHRENHEIT_RANKINE_OFFSET: f64 = 459.67;
}

/// Opaque type identifiers understood by the external health store
///
/// Each sleep stage has its own identifier; stores that only record a single
/// sleep-analysis category are expected to split it by stage on their side.
pub mod provider_types {
    /// Body height
    pub const HEIGHT: &str = "quantity.height";
    /// Body mass
    pub const BODY_MASS: &str = "quantity.body_mass";
    /// Body fat percentage
    pub const BODY_FAT_PERCENTAGE: &str = "quantity.body_fat_percentage";
    /// Lean body mass
    pub const LEAN_BODY_MASS: &str = "quantity.lean_body_mass";
    /// Waist circumference
    pub const WAIST_CIRCUMFERENCE: &str = "quantity.waist_circumference";
    /// Body temperature
    pub const BODY_TEMPERATURE: &str = "quantity.body_temperature";
    /// Resting heart rate
    pub const RESTING_HEART_RATE: &str = "quantity.resting_heart_rate";
    /// Maximal oxygen uptake
    pub const VO2_MAX: &str = "quantity.vo2_max";
    /// Step count
    pub const STEP_COUNT: &str = "quantity.step_count";
    /// Walking and running distance
    pub const DISTANCE_WALKING_RUNNING: &str = "quantity.distance_walking_running";
    /// Cycling distance
    pub const DISTANCE_CYCLING: &str = "quantity.distance_cycling";
    /// Active energy burned
    pub const ACTIVE_ENERGY_BURNED: &str = "quantity.active_energy_burned";
    /// Basal (resting) energy burned
    pub const BASAL_ENERGY_BURNED: &str = "quantity.basal_energy_burned";
    /// Flights of stairs climbed
    pub const FLIGHTS_CLIMBED: &str = "quantity.flights_climbed";
    /// Exercise minutes
    pub const EXERCISE_TIME: &str = "quantity.apple_exercise_time";
    /// Time in bed
    pub const SLEEP_IN_BED: &str = "category.sleep_analysis.in_bed";
    /// Time asleep, stage unspecified
    pub const SLEEP_ASLEEP: &str = "category.sleep_analysis.asleep";
    /// Core (light) sleep
    pub const SLEEP_CORE: &str = "category.sleep_analysis.core";
    /// Deep sleep
    pub const SLEEP_DEEP: &str = "category.sleep_analysis.deep";
    /// REM sleep
    pub const SLEEP_REM: &str = "category.sleep_analysis.rem";
    /// Awake periods during a sleep session
    pub const SLEEP_AWAKE: &str = "category.sleep_analysis.awake";
    /// Full sleep analysis event stream
    pub const SLEEP_ANALYSIS: &str = "category.sleep_analysis";
    /// Workouts
    pub const WORKOUT: &str = "workout";
}

/// Environment variable names read by configuration loaders
pub mod env_config {
    /// Initial unit system (`metric` or `imperial`)
    pub const UNIT_SYSTEM: &str = "HEALTH_UNIT_SYSTEM";
    /// Calendar used for day boundaries (`local`, `utc`, or `+HH:MM`)
    pub const TIMEZONE: &str = "HEALTH_TIMEZONE";
    /// Whether unauthorized metrics fail fast before reaching the store
    pub const ENFORCE_AUTHORIZATION: &str = "HEALTH_ENFORCE_AUTHORIZATION";
}

/// Service identity used in structured logs
pub mod service_names {
    /// Default service name
    pub const PIERRE_HEALTH: &str = "pierre-health";
}
