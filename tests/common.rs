// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides fixed instants, sample builders, and preconfigured services over the in-memory store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `pierre_health`

use std::sync::{Arc, Once};

use chrono::{DateTime, Duration, TimeZone, Utc};
use pierre_health::{
    constants::provider_types, Calendar, FixedClock, HealthConfig, HealthDataService,
    InMemoryHealthStore, MetricId, ProviderType, StoreSample, Unit,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// 2025-06-15 14:30:00 UTC, the instant every service test treats as "now"
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 14, 30, 0).unwrap()
}

/// 00:00 UTC on the day of [`now`]
pub fn start_of_today() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap()
}

/// Hours relative to [`now`] (negative for the past)
pub fn hours_from_now(hours: i64) -> DateTime<Utc> {
    now() + Duration::hours(hours)
}

pub fn provider_type(metric: MetricId) -> ProviderType {
    metric.provider_type().unwrap()
}

/// Step-count sample of `steps` over the ten minutes starting at `start`
pub fn steps_at(start: DateTime<Utc>, steps: f64) -> StoreSample {
    StoreSample::new(
        ProviderType::new(provider_types::STEP_COUNT),
        start,
        start + Duration::minutes(10),
        steps,
        Unit::Count,
    )
}

/// Instantaneous height reading
pub fn height_at(at: DateTime<Utc>, meters: f64) -> StoreSample {
    StoreSample::at(ProviderType::new(provider_types::HEIGHT), at, meters, Unit::Meter)
}

/// UTC calendar, authorization enforced, clock pinned at [`now`]
pub fn test_config() -> HealthConfig {
    HealthConfig::default().with_calendar(Calendar::Utc)
}

pub fn service_over(store: Arc<InMemoryHealthStore>) -> HealthDataService {
    service_with_config(store, test_config())
}

pub fn service_with_config(
    store: Arc<InMemoryHealthStore>,
    config: HealthConfig,
) -> HealthDataService {
    init_test_logging();
    HealthDataService::with_config(store, config).with_clock(Arc::new(FixedClock::new(now())))
}

/// Service over `samples` with every catalog metric already authorized
pub async fn authorized_service(
    samples: Vec<StoreSample>,
) -> (Arc<InMemoryHealthStore>, HealthDataService) {
    let store = Arc::new(InMemoryHealthStore::with_samples(samples));
    let service = service_over(store.clone());
    let mapped: Vec<MetricId> = MetricId::ALL
        .into_iter()
        .filter(|metric| metric.provider_type().is_some())
        .collect();
    service.request_authorization(&mapped).await.unwrap();
    (store, service)
}
