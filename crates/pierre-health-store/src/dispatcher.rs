// ABOUTME: Selects and issues the store query strategy for each metric's sample kind
// ABOUTME: Normalizes raw values into provider-native units and wraps store failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Query Dispatcher
//!
//! | Sample kind | Store request | Empty result |
//! |-------------|---------------|--------------|
//! | `PointSample` | latest sample before the interval end, limit 1 | `Point(None)` |
//! | `CumulativeSum` | sum statistic, strict-start predicate | `Sum(0.0)` |
//! | `EventList` | all samples in the interval, newest first | `Samples(vec![])` |
//!
//! Values come back in the metric's provider-native unit. Converting into the
//! caller's unit system is the service's job.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::catalog::{MetricDescriptor, MetricId, ProviderType, SampleKind};
use crate::errors::{HealthError, HealthResult, StoreError};
use crate::models::{QueryResult, QueryValue, Sample};
use crate::store::{
    HealthStore, SampleQuery, SamplePredicate, SortOrder, StatisticsQuery, StoreSample,
};
use crate::time_range::DateInterval;
use crate::units::Unit;

/// Issues per-kind store queries for catalog metrics
#[derive(Clone)]
pub struct QueryDispatcher {
    store: Arc<dyn HealthStore>,
}

impl QueryDispatcher {
    /// Create a dispatcher over `store`
    #[must_use]
    pub fn new(store: Arc<dyn HealthStore>) -> Self {
        Self { store }
    }

    /// Underlying store
    #[must_use]
    pub fn store(&self) -> &Arc<dyn HealthStore> {
        &self.store
    }

    /// Fetch `metric` over `interval` in provider-native units
    ///
    /// # Errors
    ///
    /// - `HealthError::InvalidMetric` if the metric has no store type (no request is issued)
    /// - `HealthError::QueryFailed` wrapping any store failure
    pub async fn fetch(
        &self,
        metric: MetricId,
        interval: DateInterval,
    ) -> HealthResult<QueryResult> {
        let descriptor = metric.descriptor();
        let provider_type = descriptor.provider_type.ok_or_else(|| {
            HealthError::invalid_metric(metric, "no store type is mapped for this metric")
        })?;

        debug!(
            metric = %metric,
            provider_type = %provider_type,
            kind = ?descriptor.sample_kind,
            interval = %interval,
            store = self.store.name(),
            "Dispatching health query"
        );

        let outcome = match descriptor.sample_kind {
            SampleKind::PointSample => {
                self.fetch_latest(&descriptor, provider_type, interval).await
            }
            SampleKind::CumulativeSum => self.fetch_sum(&descriptor, provider_type, interval).await,
            SampleKind::EventList => self.fetch_events(provider_type, interval).await,
        };

        outcome.map(QueryResult::native).map_err(|source| {
            warn!(
                metric = %metric,
                provider_type = %provider_type,
                store = self.store.name(),
                error = %source,
                "Health store query failed"
            );
            HealthError::QueryFailed { metric, source }
        })
    }

    async fn fetch_latest(
        &self,
        descriptor: &MetricDescriptor,
        provider_type: ProviderType,
        interval: DateInterval,
    ) -> Result<QueryValue, StoreError> {
        let query = SampleQuery {
            provider_type,
            predicate: SamplePredicate::ending_before(interval.end),
            limit: Some(1),
            sort: SortOrder::StartDescending,
        };
        let samples = self.store.execute_sample_query(query).await?;

        samples
            .into_iter()
            .next()
            .map(|sample| normalize(sample.value, sample.unit, descriptor.native_unit()))
            .transpose()
            .map(QueryValue::Point)
    }

    async fn fetch_sum(
        &self,
        descriptor: &MetricDescriptor,
        provider_type: ProviderType,
        interval: DateInterval,
    ) -> Result<QueryValue, StoreError> {
        let native = descriptor.native_unit();
        let query = StatisticsQuery {
            provider_type,
            predicate: SamplePredicate::for_interval(interval).with_strict_start(),
            unit: native,
        };

        match self.store.execute_statistics_query(query).await? {
            Some(sum) => normalize(sum.value, sum.unit, native).map(QueryValue::Sum),
            None => Ok(QueryValue::Sum(0.0)),
        }
    }

    async fn fetch_events(
        &self,
        provider_type: ProviderType,
        interval: DateInterval,
    ) -> Result<QueryValue, StoreError> {
        let query = SampleQuery {
            provider_type,
            predicate: SamplePredicate::for_interval(interval),
            limit: None,
            sort: SortOrder::StartDescending,
        };
        let mut samples: Vec<Sample> = self
            .store
            .execute_sample_query(query)
            .await?
            .into_iter()
            .map(StoreSample::into_sample)
            .collect();

        // Newest first regardless of how carefully the store sorted
        samples.sort_by(|a, b| b.start.cmp(&a.start));
        Ok(QueryValue::Samples(samples))
    }
}

fn normalize(value: f64, unit: Unit, native: Unit) -> Result<f64, StoreError> {
    unit.convert(value, native)
        .ok_or(StoreError::IncompatibleUnit {
            expected: native,
            actual: unit,
        })
}
