// ABOUTME: Unit tests for unit tokens, measurements, and unit-system conversion
// ABOUTME: Covers the identity law, round trips, unitless metrics, and known reference values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)]
#![allow(missing_docs)]

use pierre_health::units::{convert, Dimension, Measurement, Unit, UnitSystem};
use pierre_health::{HealthDataService, MetricId};

const SAMPLE_VALUES: [f64; 6] = [0.0, 1.0, 1.80, 72.5, 1234.567, -12.25];

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    let scale = expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance * scale,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_identity_law_is_exact_for_every_metric() {
    for metric in MetricId::ALL {
        for system in UnitSystem::ALL {
            for value in SAMPLE_VALUES {
                let converted = convert(value, metric, system, system);
                assert_eq!(
                    converted.to_bits(),
                    value.to_bits(),
                    "{metric} in {system} changed {value}"
                );
            }
        }
    }
}

#[test]
fn test_round_trip_within_tolerance() {
    for metric in MetricId::ALL {
        for value in SAMPLE_VALUES {
            let imperial = convert(value, metric, UnitSystem::Metric, UnitSystem::Imperial);
            let back = convert(imperial, metric, UnitSystem::Imperial, UnitSystem::Metric);
            assert_close(back, value, 1e-9);

            let metric_value = convert(value, metric, UnitSystem::Imperial, UnitSystem::Metric);
            let again = convert(metric_value, metric, UnitSystem::Metric, UnitSystem::Imperial);
            assert_close(again, value, 1e-9);
        }
    }
}

#[test]
fn test_unitless_metrics_are_invariant() {
    let unitless = [
        MetricId::StepCount,
        MetricId::FlightsClimbed,
        MetricId::ExerciseTime,
        MetricId::SleepDeep,
        MetricId::BodyFatPercentage,
        MetricId::RestingHeartRate,
        MetricId::ActiveEnergy,
    ];
    for metric in unitless {
        assert!(!metric.descriptor().has_physical_conversion());
        for value in SAMPLE_VALUES {
            assert_eq!(convert(value, metric, UnitSystem::Metric, UnitSystem::Imperial), value);
            assert_eq!(convert(value, metric, UnitSystem::Imperial, UnitSystem::Metric), value);
        }
    }
}

#[test]
fn test_height_reference_value() {
    let inches = convert(1.80, MetricId::Height, UnitSystem::Metric, UnitSystem::Imperial);
    assert_close(inches, 70.866_141_732_283_46, 1e-12);
    assert_eq!(format!("{inches:.2}"), "70.87");

    let via_service = HealthDataService::convert(
        1.80,
        MetricId::Height,
        UnitSystem::Metric,
        UnitSystem::Imperial,
    );
    assert_eq!(via_service.to_bits(), inches.to_bits());
}

#[test]
fn test_reference_conversions() {
    let pounds = convert(100.0, MetricId::BodyMass, UnitSystem::Metric, UnitSystem::Imperial);
    assert_close(pounds, 220.462_262_184_877_6, 1e-12);

    let miles = convert(
        1_609.344,
        MetricId::WalkingRunningDistance,
        UnitSystem::Metric,
        UnitSystem::Imperial,
    );
    assert_close(miles, 1.0, 1e-12);

    let waist = convert(
        2.54,
        MetricId::WaistCircumference,
        UnitSystem::Metric,
        UnitSystem::Imperial,
    );
    assert_close(waist, 1.0, 1e-12);

    let fahrenheit = convert(
        37.0,
        MetricId::BodyTemperature,
        UnitSystem::Metric,
        UnitSystem::Imperial,
    );
    assert_close(fahrenheit, 98.6, 1e-12);
    let celsius = convert(
        212.0,
        MetricId::BodyTemperature,
        UnitSystem::Imperial,
        UnitSystem::Metric,
    );
    assert_close(celsius, 100.0, 1e-12);
}

#[test]
fn test_unit_convert_rejects_other_dimensions() {
    assert_eq!(Unit::Meter.convert(1.0, Unit::Kilogram), None);
    assert_eq!(Unit::Count.convert(3.0, Unit::Percent), None);
    assert_eq!(Unit::Celsius.convert(20.0, Unit::Celsius), Some(20.0));
}

#[test]
fn test_unit_convert_within_dimension() {
    assert_close(Unit::Hour.convert(1.5, Unit::Minute).unwrap(), 90.0, 1e-12);
    assert_close(Unit::Kilometer.convert(1.0, Unit::Foot).unwrap(), 3_280.839_895_013_123, 1e-12);
    assert_close(Unit::Kilojoule.convert(4.184, Unit::Kilocalorie).unwrap(), 1.0, 1e-12);
    assert_close(Unit::Gram.convert(453.592_37, Unit::Pound).unwrap(), 1.0, 1e-12);
    assert_eq!(Unit::Foot.dimension(), Dimension::Length);
    assert_eq!(Unit::Fahrenheit.dimension(), Dimension::Temperature);
}

#[test]
fn test_measurement_conversion_and_display() {
    let height = Measurement::new(1.80, Unit::Meter);
    let inches = height.to_unit(Unit::Inch).unwrap();
    assert_eq!(inches.unit, Unit::Inch);
    assert_eq!(format!("{inches:.1}"), "70.9 in");
    assert_eq!(format!("{height}"), "1.8 m");
    assert!(height.to_unit(Unit::Pound).is_none());
}

#[test]
fn test_unit_system_parsing() {
    assert_eq!("metric".parse::<UnitSystem>().unwrap(), UnitSystem::Metric);
    assert_eq!(" Imperial ".parse::<UnitSystem>().unwrap(), UnitSystem::Imperial);
    assert_eq!("us".parse::<UnitSystem>().unwrap(), UnitSystem::Imperial);
    assert_eq!("si".parse::<UnitSystem>().unwrap(), UnitSystem::Metric);

    let err = "furlongs".parse::<UnitSystem>().unwrap_err();
    assert_eq!(err.to_string(), "Unknown unit system 'furlongs'");

    assert_eq!(UnitSystem::default(), UnitSystem::Metric);
    assert_eq!(UnitSystem::provider_native(), UnitSystem::Metric);
    assert_eq!(UnitSystem::Imperial.to_string(), "imperial");
}
