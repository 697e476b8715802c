// ABOUTME: Integration tests for the health data service façade
// ABOUTME: Covers unit-system conversion, authorization gating, error taxonomy, and concurrent access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use chrono::Duration;
use common::{
    authorized_service, height_at, hours_from_now, now, provider_type, service_over,
    service_with_config, start_of_today, steps_at, test_config,
};
use pierre_health::{
    ErrorCode, FixedClock, HealthError, InMemoryHealthStore, MetricId, QueryValue, SampleCategory,
    StoreError, StoreSample, TimeRange, Unit, UnitSystem, WorkoutKind,
};

#[tokio::test]
async fn test_steps_today_sum() {
    let (_, service) = authorized_service(vec![
        steps_at(hours_from_now(-3), 100.0),
        steps_at(hours_from_now(-2), 250.0),
        steps_at(hours_from_now(-1), 400.0),
    ])
    .await;

    assert_eq!(service.get(MetricId::StepCount, TimeRange::Today).await.unwrap(), Some(750.0));

    // Steps carry no unit, so imperial reports the same number
    service.set_unit_system(UnitSystem::Imperial);
    assert_eq!(service.steps(TimeRange::Today).await.unwrap(), 750.0);
}

#[tokio::test]
async fn test_height_in_imperial() {
    let (_, service) = authorized_service(vec![
        height_at(hours_from_now(-24 * 40), 1.75),
        height_at(hours_from_now(-24 * 3), 1.80),
    ])
    .await;

    let meters = service.height(TimeRange::Today).await.unwrap().unwrap();
    assert!((meters - 1.80).abs() < 1e-12);

    service.set_unit_system(UnitSystem::Imperial);
    let inches = service.height(TimeRange::Today).await.unwrap().unwrap();
    assert!((inches - 70.866_141_732_283_46).abs() < 1e-9);
    assert_eq!(format!("{inches:.2}"), "70.87");

    let measurement = service
        .get_measurement(MetricId::Height, TimeRange::Today)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(measurement.unit, Unit::Inch);
    assert!((measurement.value - inches).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_point_query_ignores_readings_after_the_interval() {
    let (_, service) = authorized_service(vec![
        height_at(start_of_today() - Duration::days(2), 1.70),
        height_at(hours_from_now(-1), 1.80),
    ])
    .await;

    let latest_yesterday = service.height(TimeRange::Yesterday).await.unwrap().unwrap();
    assert!((latest_yesterday - 1.70).abs() < 1e-12);
}

#[tokio::test]
async fn test_empty_cumulative_is_zero_and_empty_point_is_absent() {
    let (_, service) = authorized_service(Vec::new()).await;

    assert_eq!(service.get(MetricId::StepCount, TimeRange::Today).await.unwrap(), Some(0.0));
    assert_eq!(service.walking_running_distance(TimeRange::Yesterday).await.unwrap(), 0.0);
    assert_eq!(service.active_energy(TimeRange::last_days(7)).await.unwrap(), 0.0);

    assert_eq!(service.get(MetricId::BodyMass, TimeRange::Today).await.unwrap(), None);
    assert_eq!(service.body_mass(TimeRange::Today).await.unwrap(), None);
    assert!(service.sleep_analysis(TimeRange::Today).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_required_reports_data_unavailable() {
    let (_, service) = authorized_service(Vec::new()).await;

    let err = service
        .get_required(MetricId::BodyMass, TimeRange::Today)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        HealthError::DataUnavailable {
            metric: MetricId::BodyMass
        }
    ));
    assert_eq!(err.code(), ErrorCode::ResourceNotFound);

    // Sums are never unavailable
    assert_eq!(
        service.get_required(MetricId::StepCount, TimeRange::Today).await.unwrap(),
        0.0
    );
}

#[tokio::test]
async fn test_distance_converts_to_miles() {
    let distance = provider_type(MetricId::WalkingRunningDistance);
    let (_, service) = authorized_service(vec![
        StoreSample::new(distance, hours_from_now(-4), hours_from_now(-3), 1_609.344, Unit::Meter),
        StoreSample::new(
            distance,
            hours_from_now(-2),
            hours_from_now(-1),
            1.609_344,
            Unit::Kilometer,
        ),
    ])
    .await;

    service.set_unit_system(UnitSystem::Imperial);
    let miles = service.walking_running_distance(TimeRange::Today).await.unwrap();
    assert!((miles - 2.0).abs() < 1e-9);

    let result = service
        .fetch(MetricId::WalkingRunningDistance, TimeRange::Today)
        .await
        .unwrap();
    assert_eq!(result.unit_system, UnitSystem::Imperial);
    assert!(matches!(result.value, QueryValue::Sum(_)));
}

#[tokio::test]
async fn test_workouts_are_unconverted_and_newest_first() {
    let workout = provider_type(MetricId::Workouts);
    let (_, service) = authorized_service(vec![
        StoreSample::new(workout, hours_from_now(-6), hours_from_now(-5), 60.0, Unit::Minute)
            .with_category(SampleCategory::Workout(WorkoutKind::Run)),
        StoreSample::new(workout, hours_from_now(-3), hours_from_now(-2), 45.0, Unit::Minute)
            .with_category(SampleCategory::Workout(WorkoutKind::Yoga)),
        StoreSample::new(workout, hours_from_now(-50), hours_from_now(-49), 30.0, Unit::Minute)
            .with_category(SampleCategory::Workout(WorkoutKind::Swim)),
    ])
    .await;
    service.set_unit_system(UnitSystem::Imperial);

    let workouts = service.workouts(TimeRange::Today).await.unwrap();
    let kinds: Vec<_> = workouts.iter().map(|w| w.category.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            Some(SampleCategory::Workout(WorkoutKind::Yoga)),
            Some(SampleCategory::Workout(WorkoutKind::Run)),
        ]
    );
    assert_eq!(workouts[0].value, 45.0);
    assert_eq!(workouts[0].unit, Unit::Minute);

    let result = service.fetch(MetricId::Workouts, TimeRange::Today).await.unwrap();
    assert_eq!(result.unit_system, UnitSystem::Metric);

    let week = service.get_samples(MetricId::Workouts, TimeRange::last_days(7)).await.unwrap();
    assert_eq!(week.len(), 3);
}

#[tokio::test]
async fn test_unauthorized_get_fails_fast() {
    let store = Arc::new(InMemoryHealthStore::with_samples(vec![steps_at(
        hours_from_now(-1),
        10.0,
    )]));
    let service = service_over(store.clone());

    assert!(!service.is_authorized(MetricId::StepCount).await);
    let err = service.get(MetricId::StepCount, TimeRange::Today).await.unwrap_err();
    match &err {
        HealthError::NotAuthorized { metrics, source } => {
            assert_eq!(metrics, &vec![MetricId::StepCount]);
            assert!(source.is_none());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.code(), ErrorCode::AuthRequired);
    assert_eq!(store.request_count(), 0, "store must not be queried");

    service.request_authorization(&[MetricId::StepCount]).await.unwrap();
    assert!(service.is_authorized(MetricId::StepCount).await);
    assert!(!service.is_authorized(MetricId::Height).await);
    assert_eq!(service.steps(TimeRange::Today).await.unwrap(), 10.0);
}

#[tokio::test]
async fn test_authorization_denied() {
    let store = Arc::new(InMemoryHealthStore::new());
    store.deny(provider_type(MetricId::Height)).unwrap();
    let service = service_over(store);

    let err = service
        .request_authorization(&[MetricId::StepCount, MetricId::Height])
        .await
        .unwrap_err();
    match err {
        HealthError::NotAuthorized { metrics, source } => {
            assert_eq!(metrics, vec![MetricId::StepCount, MetricId::Height]);
            assert!(matches!(source, Some(StoreError::AuthorizationDenied { .. })));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!service.is_authorized(MetricId::StepCount).await);
}

#[tokio::test]
async fn test_authorization_rejects_unmapped_metrics_before_the_store() {
    let store = Arc::new(InMemoryHealthStore::new());
    let service = service_over(store.clone());

    let err = service
        .request_authorization(&[MetricId::StepCount, MetricId::SleepScore])
        .await
        .unwrap_err();
    assert!(matches!(err, HealthError::InvalidMetric { .. }));
    assert_eq!(store.request_count(), 0);

    assert!(service.request_authorization(&[]).await.unwrap());
    assert_eq!(store.request_count(), 0);
}

#[tokio::test]
async fn test_enforcement_can_be_disabled() {
    let store = Arc::new(InMemoryHealthStore::with_samples(vec![steps_at(
        hours_from_now(-1),
        12.0,
    )]));
    let service = service_with_config(store, test_config().with_enforce_authorization(false));
    assert!(!service.enforces_authorization());
    assert_eq!(service.steps(TimeRange::Today).await.unwrap(), 12.0);
}

#[tokio::test]
async fn test_store_side_revocation_is_a_query_failure() {
    let store = Arc::new(InMemoryHealthStore::new().enforcing_authorization());
    let service = service_over(store.clone());
    service.request_authorization(&[MetricId::StepCount]).await.unwrap();
    store.revoke(provider_type(MetricId::StepCount)).unwrap();

    let err = service.steps(TimeRange::Today).await.unwrap_err();
    assert!(matches!(
        err,
        HealthError::QueryFailed {
            metric: MetricId::StepCount,
            source: StoreError::NotAuthorized { .. }
        }
    ));
    assert_eq!(err.code(), ErrorCode::ExternalAuthFailed);
}

#[tokio::test]
async fn test_unavailable_store_is_retryable() {
    let (store, service) = authorized_service(Vec::new()).await;
    store
        .fail_with(StoreError::Unavailable {
            reason: "protected data while device is locked".to_owned(),
        })
        .unwrap();

    let err = service.height(TimeRange::Today).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::ExternalServiceUnavailable);
    assert!(err.is_retryable());
    assert_eq!(err.to_string(), "Query for height failed");
}

#[tokio::test]
async fn test_invalid_metric_cases() {
    let (store, service) = authorized_service(Vec::new()).await;
    let before = store.request_count();

    let unmapped = service.get(MetricId::SleepScore, TimeRange::Today).await.unwrap_err();
    assert!(matches!(unmapped, HealthError::InvalidMetric { .. }));

    let wrong_kind = service
        .get(MetricId::SleepAnalysis, TimeRange::Today)
        .await
        .unwrap_err();
    assert!(matches!(wrong_kind, HealthError::InvalidMetric { .. }));

    let not_events = service
        .get_samples(MetricId::StepCount, TimeRange::Today)
        .await
        .unwrap_err();
    assert!(matches!(not_events, HealthError::InvalidMetric { .. }));

    assert_eq!(store.request_count(), before);
}

#[tokio::test]
async fn test_each_sleep_stage_reads_its_own_samples() {
    let deep = provider_type(MetricId::SleepDeep);
    let rem = provider_type(MetricId::SleepRem);
    let (_, service) = authorized_service(vec![
        StoreSample::new(deep, hours_from_now(-10), hours_from_now(-9), 1.0, Unit::Hour),
        StoreSample::new(rem, hours_from_now(-9), hours_from_now(-8), 30.0, Unit::Minute),
        StoreSample::new(deep, hours_from_now(-8), hours_from_now(-7), 1_800.0, Unit::Second),
    ])
    .await;

    let deep_hours = service.get(MetricId::SleepDeep, TimeRange::Today).await.unwrap().unwrap();
    assert!((deep_hours - 1.5).abs() < 1e-9);
    let rem_hours = service.get(MetricId::SleepRem, TimeRange::Today).await.unwrap().unwrap();
    assert!((rem_hours - 0.5).abs() < 1e-9);
    assert_eq!(service.get(MetricId::SleepCore, TimeRange::Today).await.unwrap(), Some(0.0));
}

#[tokio::test]
async fn test_custom_and_inverted_ranges() {
    let (_, service) = authorized_service(vec![
        steps_at(hours_from_now(-30), 5.0),
        steps_at(hours_from_now(-2), 7.0),
    ])
    .await;

    let window = TimeRange::custom(hours_from_now(-31), hours_from_now(-29));
    assert_eq!(service.steps(window).await.unwrap(), 5.0);

    let inverted = TimeRange::custom(hours_from_now(-1), hours_from_now(-31));
    assert_eq!(service.steps(inverted).await.unwrap(), 0.0);
    assert!(service.resolve(inverted).is_empty());
}

#[tokio::test]
async fn test_clock_drives_relative_ranges() {
    let store = Arc::new(InMemoryHealthStore::with_samples(vec![steps_at(
        hours_from_now(-1),
        20.0,
    )]));
    let clock = Arc::new(FixedClock::new(now()));
    let service = service_over(store).with_clock(clock.clone());
    service.request_authorization(&[MetricId::StepCount]).await.unwrap();

    assert_eq!(service.steps(TimeRange::Today).await.unwrap(), 20.0);
    assert_eq!(service.resolve(TimeRange::Today).end, now());

    clock.advance(Duration::days(1));
    assert_eq!(service.steps(TimeRange::Today).await.unwrap(), 0.0);
    assert_eq!(service.steps(TimeRange::Yesterday).await.unwrap(), 20.0);

    clock.set(now());
    assert_eq!(service.steps(TimeRange::Today).await.unwrap(), 20.0);
}

#[tokio::test]
async fn test_unit_system_subscription() {
    let (_, service) = authorized_service(Vec::new()).await;
    let mut changes = service.subscribe_unit_system();
    assert_eq!(*changes.borrow(), UnitSystem::Metric);

    service.set_unit_system(UnitSystem::Imperial);
    changes.changed().await.unwrap();
    assert_eq!(*changes.borrow_and_update(), UnitSystem::Imperial);
    assert_eq!(service.unit_system(), UnitSystem::Imperial);
}

#[tokio::test]
async fn test_configured_starting_unit_system() {
    let store = Arc::new(InMemoryHealthStore::new());
    let service = service_with_config(store, test_config().with_unit_system(UnitSystem::Imperial));
    assert_eq!(service.unit_system(), UnitSystem::Imperial);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_unit_system_access() {
    let (_, service) = authorized_service(vec![height_at(hours_from_now(-1), 1.80)]).await;
    let service = Arc::new(service);

    let mut tasks = Vec::new();
    for i in 0..32 {
        let service = Arc::clone(&service);
        tasks.push(tokio::spawn(async move {
            let system = if i % 2 == 0 {
                UnitSystem::Metric
            } else {
                UnitSystem::Imperial
            };
            service.set_unit_system(system);
            let result = service.fetch(MetricId::Height, TimeRange::Today).await.unwrap();
            let value = result.scalar().unwrap();
            // Whatever system the query observed, the value matches it
            match result.unit_system {
                UnitSystem::Metric => assert!((value - 1.80).abs() < 1e-12),
                UnitSystem::Imperial => assert!((value - 70.866_141_732_283_46).abs() < 1e-9),
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    service.set_unit_system(UnitSystem::Metric);
    assert_eq!(service.unit_system(), UnitSystem::Metric);
}
