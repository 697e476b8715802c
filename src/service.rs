// ABOUTME: Health data service façade composing resolver, dispatcher, and unit conversion
// ABOUTME: Owns the active unit system and the set of store types granted for reading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Health Data Service
//!
//! Every query follows the same path:
//!
//! 1. reject metrics without a store mapping (`InvalidMetric`)
//! 2. reject metrics outside a prior authorization (`NotAuthorized`), when enforced
//! 3. resolve the time range against a single sampled "now"
//! 4. dispatch to the store and receive provider-native values
//! 5. convert point and sum values into the active unit system
//!
//! The active unit system lives in a `watch` channel: writes replace the value
//! atomically, readers always see a complete value, and interested tasks can
//! subscribe to changes.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use pierre_health::{HealthDataService, InMemoryHealthStore, MetricId, TimeRange, UnitSystem};
//!
//! # async fn demo() -> pierre_health::errors::HealthResult<()> {
//! let service = HealthDataService::new(Arc::new(InMemoryHealthStore::new()));
//! service.request_authorization(&[MetricId::Height, MetricId::StepCount]).await?;
//! service.set_unit_system(UnitSystem::Imperial);
//!
//! let height_in = service.height(TimeRange::Today).await?;
//! let steps = service.steps(TimeRange::last_days(7)).await?;
//! # let _ = (height_in, steps);
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use pierre_health_store::{HealthStore, QueryDispatcher};
use tokio::sync::{watch, RwLock};
use tracing::{info, warn};

use crate::catalog::{unit_for, MetricId, ProviderType, SampleKind};
use crate::clock::{Clock, SystemClock};
use crate::config::HealthConfig;
use crate::errors::{HealthError, HealthResult};
use crate::logging::{HealthLogger, HealthQueryOutcome};
use crate::models::{QueryResult, QueryValue, Sample};
use crate::time_range::{Calendar, DateInterval, TimeRange};
use crate::units::{self, Measurement, UnitSystem};

/// Typed access to health data in a caller-selected unit system
pub struct HealthDataService {
    dispatcher: QueryDispatcher,
    clock: Arc<dyn Clock>,
    calendar: Calendar,
    enforce_authorization: bool,
    unit_system: watch::Sender<UnitSystem>,
    authorized: RwLock<HashSet<ProviderType>>,
}

impl HealthDataService {
    /// Create a service over `store` with default configuration
    #[must_use]
    pub fn new(store: Arc<dyn HealthStore>) -> Self {
        Self::with_config(store, HealthConfig::default())
    }

    /// Create a service over `store` with explicit configuration
    #[must_use]
    pub fn with_config(store: Arc<dyn HealthStore>, config: HealthConfig) -> Self {
        info!(
            store = store.name(),
            unit_system = %config.unit_system,
            calendar = %config.calendar,
            enforce_authorization = config.enforce_authorization,
            "Health data service created"
        );
        Self {
            dispatcher: QueryDispatcher::new(store),
            clock: Arc::new(SystemClock),
            calendar: config.calendar,
            enforce_authorization: config.enforce_authorization,
            unit_system: watch::Sender::new(config.unit_system),
            authorized: RwLock::new(HashSet::new()),
        }
    }

    /// Replace the time source
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Calendar used for day boundaries
    #[must_use]
    pub const fn calendar(&self) -> Calendar {
        self.calendar
    }

    /// Whether queries require a prior authorization
    #[must_use]
    pub const fn enforces_authorization(&self) -> bool {
        self.enforce_authorization
    }

    // ================================================================================================
    // Unit system
    // ================================================================================================

    /// Active unit system
    #[must_use]
    pub fn unit_system(&self) -> UnitSystem {
        *self.unit_system.borrow()
    }

    /// Switch the active unit system
    ///
    /// Queries already past their conversion step keep the system they read.
    pub fn set_unit_system(&self, unit_system: UnitSystem) {
        let previous = self.unit_system.send_replace(unit_system);
        if previous != unit_system {
            info!(from = %previous, to = %unit_system, "Unit system changed");
        }
    }

    /// Receiver notified on every unit-system change
    #[must_use]
    pub fn subscribe_unit_system(&self) -> watch::Receiver<UnitSystem> {
        self.unit_system.subscribe()
    }

    /// Convert `value` of `metric` between unit systems
    #[must_use]
    pub fn convert(value: f64, metric: MetricId, from: UnitSystem, to: UnitSystem) -> f64 {
        units::convert(value, metric, from, to)
    }

    // ================================================================================================
    // Authorization
    // ================================================================================================

    /// Ask the store for read access to `metrics`
    ///
    /// # Errors
    ///
    /// - `HealthError::InvalidMetric` if any metric has no store mapping (no request is issued)
    /// - `HealthError::NotAuthorized` if the store denies or fails the request
    pub async fn request_authorization(&self, metrics: &[MetricId]) -> HealthResult<bool> {
        let mut types = HashSet::with_capacity(metrics.len());
        for &metric in metrics {
            types.insert(mapped_type(metric)?);
        }
        if types.is_empty() {
            return Ok(true);
        }

        let store = self.dispatcher.store();
        if let Err(source) = store.request_authorization(&types).await {
            warn!(store = store.name(), error = %source, "Health store authorization failed");
            return Err(HealthError::NotAuthorized {
                metrics: metrics.to_vec(),
                source: Some(source),
            });
        }

        let granted = types.len();
        self.authorized.write().await.extend(types);
        info!(store = store.name(), types = granted, "Health data read access granted");
        Ok(true)
    }

    /// Whether a successful authorization has covered `metric`
    pub async fn is_authorized(&self, metric: MetricId) -> bool {
        match metric.provider_type() {
            Some(provider_type) => self.authorized.read().await.contains(&provider_type),
            None => false,
        }
    }

    // ================================================================================================
    // Queries
    // ================================================================================================

    /// Resolve `range` against the current instant and configured calendar
    #[must_use]
    pub fn resolve(&self, range: TimeRange) -> DateInterval {
        self.calendar.resolve(&range, self.clock.now())
    }

    /// Fetch `metric` over `range`, converted into the active unit system
    ///
    /// Event lists keep the per-sample units reported by the store.
    ///
    /// # Errors
    ///
    /// - `HealthError::InvalidMetric` if the metric has no store mapping
    /// - `HealthError::NotAuthorized` if enforcement is on and the metric was never authorized
    /// - `HealthError::QueryFailed` if the store fails
    pub async fn fetch(&self, metric: MetricId, range: TimeRange) -> HealthResult<QueryResult> {
        let provider_type = mapped_type(metric)?;
        self.ensure_authorized(metric, provider_type).await?;

        let interval = self.resolve(range);
        let started = Instant::now();
        let fetched = self.dispatcher.fetch(metric, interval).await;
        let unit_system = self.unit_system();

        HealthLogger::log_query(&HealthQueryOutcome {
            metric,
            interval,
            unit_system,
            success: fetched.is_ok(),
            duration_ms: started.elapsed().as_millis() as u64,
        });

        Ok(express_in(metric, fetched?, unit_system))
    }

    /// Point or sum value of `metric` over `range`
    ///
    /// Returns `None` only for point metrics with no recorded sample; sums
    /// over an empty range are `Some(0.0)`.
    ///
    /// # Errors
    ///
    /// `HealthError::InvalidMetric` for event metrics, otherwise as [`Self::fetch`]
    pub async fn get(&self, metric: MetricId, range: TimeRange) -> HealthResult<Option<f64>> {
        Ok(self.fetch_scalar(metric, range).await?.scalar())
    }

    /// Like [`Self::get`], paired with the unit of the active system
    ///
    /// # Errors
    ///
    /// As [`Self::get`]
    pub async fn get_measurement(
        &self,
        metric: MetricId,
        range: TimeRange,
    ) -> HealthResult<Option<Measurement>> {
        let result = self.fetch_scalar(metric, range).await?;
        Ok(result
            .scalar()
            .map(|value| Measurement::new(value, unit_for(metric, result.unit_system))))
    }

    /// Like [`Self::get`], but a missing point value is an error
    ///
    /// # Errors
    ///
    /// `HealthError::DataUnavailable` when nothing was recorded, otherwise as [`Self::get`]
    pub async fn get_required(&self, metric: MetricId, range: TimeRange) -> HealthResult<f64> {
        self.get(metric, range)
            .await?
            .ok_or(HealthError::DataUnavailable { metric })
    }

    /// Events of `metric` over `range`, newest first
    ///
    /// # Errors
    ///
    /// `HealthError::InvalidMetric` for point and sum metrics, otherwise as [`Self::fetch`]
    pub async fn get_samples(
        &self,
        metric: MetricId,
        range: TimeRange,
    ) -> HealthResult<Vec<Sample>> {
        if metric.sample_kind() != SampleKind::EventList {
            return Err(HealthError::invalid_metric(
                metric,
                "only event metrics return sample lists",
            ));
        }
        Ok(self.fetch(metric, range).await?.into_samples())
    }

    async fn fetch_scalar(&self, metric: MetricId, range: TimeRange) -> HealthResult<QueryResult> {
        if metric.sample_kind() == SampleKind::EventList {
            return Err(HealthError::invalid_metric(
                metric,
                "event metrics are read as sample lists",
            ));
        }
        self.fetch(metric, range).await
    }

    async fn ensure_authorized(
        &self,
        metric: MetricId,
        provider_type: ProviderType,
    ) -> HealthResult<()> {
        if !self.enforce_authorization || self.authorized.read().await.contains(&provider_type) {
            return Ok(());
        }
        warn!(metric = %metric, "Query rejected: read access not granted");
        Err(HealthError::not_authorized(vec![metric]))
    }

    // ================================================================================================
    // Per-metric accessors
    // ================================================================================================

    /// Latest height (meters or inches)
    ///
    /// # Errors
    ///
    /// As [`Self::get`]
    pub async fn height(&self, range: TimeRange) -> HealthResult<Option<f64>> {
        self.get(MetricId::Height, range).await
    }

    /// Latest body mass (kilograms or pounds)
    ///
    /// # Errors
    ///
    /// As [`Self::get`]
    pub async fn body_mass(&self, range: TimeRange) -> HealthResult<Option<f64>> {
        self.get(MetricId::BodyMass, range).await
    }

    /// Step count
    ///
    /// # Errors
    ///
    /// As [`Self::get`]
    pub async fn steps(&self, range: TimeRange) -> HealthResult<f64> {
        self.sum(MetricId::StepCount, range).await
    }

    /// Walking and running distance (meters or miles)
    ///
    /// # Errors
    ///
    /// As [`Self::get`]
    pub async fn walking_running_distance(&self, range: TimeRange) -> HealthResult<f64> {
        self.sum(MetricId::WalkingRunningDistance, range).await
    }

    /// Active energy burned (kilocalories)
    ///
    /// # Errors
    ///
    /// As [`Self::get`]
    pub async fn active_energy(&self, range: TimeRange) -> HealthResult<f64> {
        self.sum(MetricId::ActiveEnergy, range).await
    }

    /// Sleep analysis events
    ///
    /// # Errors
    ///
    /// As [`Self::get_samples`]
    pub async fn sleep_analysis(&self, range: TimeRange) -> HealthResult<Vec<Sample>> {
        self.get_samples(MetricId::SleepAnalysis, range).await
    }

    /// Workouts
    ///
    /// # Errors
    ///
    /// As [`Self::get_samples`]
    pub async fn workouts(&self, range: TimeRange) -> HealthResult<Vec<Sample>> {
        self.get_samples(MetricId::Workouts, range).await
    }

    async fn sum(&self, metric: MetricId, range: TimeRange) -> HealthResult<f64> {
        Ok(self.get(metric, range).await?.unwrap_or_default())
    }
}

fn mapped_type(metric: MetricId) -> HealthResult<ProviderType> {
    metric.provider_type().ok_or_else(|| {
        HealthError::invalid_metric(metric, "no store type is mapped for this metric")
    })
}

fn express_in(metric: MetricId, result: QueryResult, target: UnitSystem) -> QueryResult {
    let from = result.unit_system;
    let value = match result.value {
        QueryValue::Point(value) => {
            QueryValue::Point(value.map(|v| units::convert(v, metric, from, target)))
        }
        QueryValue::Sum(value) => QueryValue::Sum(units::convert(value, metric, from, target)),
        samples @ QueryValue::Samples(_) => {
            return QueryResult {
                value: samples,
                unit_system: from,
            }
        }
    };
    QueryResult {
        value,
        unit_system: target,
    }
}
