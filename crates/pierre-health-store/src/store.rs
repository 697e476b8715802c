// ABOUTME: Narrow query interface to the external health store
// ABOUTME: Defines HealthStore plus the predicate, query, and raw sample shapes it consumes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Health Store Interface
//!
//! The store exposes exactly three operations: request read authorization,
//! fetch samples, and compute a sum statistic. Everything else (unit
//! normalization, strategy selection, error wrapping) happens above it.
//!
//! ## Implementing a Store
//!
//! ```rust,no_run
//! use std::collections::HashSet;
//!
//! use async_trait::async_trait;
//! use pierre_health_store::catalog::ProviderType;
//! use pierre_health_store::errors::StoreError;
//! use pierre_health_store::units::Measurement;
//! use pierre_health_store::{HealthStore, SampleQuery, StatisticsQuery, StoreSample};
//!
//! struct EmptyStore;
//!
//! #[async_trait]
//! impl HealthStore for EmptyStore {
//!     fn name(&self) -> &str {
//!         "empty"
//!     }
//!
//!     async fn request_authorization(
//!         &self,
//!         _types: &HashSet<ProviderType>,
//!     ) -> Result<(), StoreError> {
//!         Ok(())
//!     }
//!
//!     async fn execute_sample_query(
//!         &self,
//!         _query: SampleQuery,
//!     ) -> Result<Vec<StoreSample>, StoreError> {
//!         Ok(Vec::new())
//!     }
//!
//!     async fn execute_statistics_query(
//!         &self,
//!         _query: StatisticsQuery,
//!     ) -> Result<Option<Measurement>, StoreError> {
//!         Ok(None)
//!     }
//! }
//! ```

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::catalog::ProviderType;
use crate::errors::StoreError;
use crate::models::{Sample, SampleCategory};
use crate::time_range::DateInterval;
use crate::units::{Measurement, Unit};

/// Ordering applied to sample query results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Store-defined order
    #[default]
    Unsorted,
    /// Oldest start first
    StartAscending,
    /// Newest start first
    StartDescending,
}

/// Time predicate attached to store queries
///
/// Without strict flags a sample matches when it overlaps the bounds. With
/// `strict_start` the sample must begin at or after `start`; with `strict_end`
/// it must finish at or before `end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SamplePredicate {
    /// Lower bound, `None` for unbounded
    pub start: Option<DateTime<Utc>>,
    /// Upper bound (exclusive), `None` for unbounded
    pub end: Option<DateTime<Utc>>,
    /// Require samples to start inside the bounds
    pub strict_start: bool,
    /// Require samples to end inside the bounds
    pub strict_end: bool,
}

impl SamplePredicate {
    /// Match every sample
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
            strict_start: false,
            strict_end: false,
        }
    }

    /// Match samples starting before `end`, with no lower bound
    #[must_use]
    pub const fn ending_before(end: DateTime<Utc>) -> Self {
        Self {
            start: None,
            end: Some(end),
            strict_start: false,
            strict_end: false,
        }
    }

    /// Match samples overlapping `interval`
    #[must_use]
    pub const fn for_interval(interval: DateInterval) -> Self {
        Self {
            start: Some(interval.start),
            end: Some(interval.end),
            strict_start: false,
            strict_end: false,
        }
    }

    /// Require matching samples to start at or after the lower bound
    #[must_use]
    pub const fn with_strict_start(mut self) -> Self {
        self.strict_start = true;
        self
    }

    /// Require matching samples to end at or before the upper bound
    #[must_use]
    pub const fn with_strict_end(mut self) -> Self {
        self.strict_end = true;
        self
    }

    /// Whether a sample spanning `[start, end]` satisfies this predicate
    #[must_use]
    pub fn matches(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        let after_lower = match self.start {
            None => true,
            Some(lower) if self.strict_start => start >= lower,
            Some(lower) => end > lower || start >= lower,
        };
        let before_upper = match self.end {
            None => true,
            Some(upper) if self.strict_end => end <= upper,
            Some(upper) => start < upper,
        };
        after_lower && before_upper
    }
}

/// Request for raw samples of one type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleQuery {
    /// Store type to read
    pub provider_type: ProviderType,
    /// Time filter
    pub predicate: SamplePredicate,
    /// Maximum number of samples, `None` for unbounded
    pub limit: Option<usize>,
    /// Result ordering
    pub sort: SortOrder,
}

/// Request for the sum of one quantity type over a predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticsQuery {
    /// Store type to aggregate
    pub provider_type: ProviderType,
    /// Time filter
    pub predicate: SamplePredicate,
    /// Unit the sum should be reported in
    pub unit: Unit,
}

/// Sample record as owned by the store
///
/// Carries store bookkeeping (identifier, source, metadata) that the access
/// layer drops when converting into a [`Sample`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSample {
    /// Store-assigned identifier
    pub id: Uuid,
    /// Type the sample belongs to
    pub provider_type: ProviderType,
    /// Sample start
    pub start: DateTime<Utc>,
    /// Sample end
    pub end: DateTime<Utc>,
    /// Raw value
    pub value: f64,
    /// Unit of `value`
    pub unit: Unit,
    /// Category for sleep and workout samples
    pub category: Option<SampleCategory>,
    /// App or device that recorded the sample
    pub source_name: Option<String>,
    /// Free-form store metadata
    pub metadata: HashMap<String, String>,
}

impl StoreSample {
    /// Create a sample with a fresh identifier and no category or metadata
    #[must_use]
    pub fn new(
        provider_type: ProviderType,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        value: f64,
        unit: Unit,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            provider_type,
            start,
            end,
            value,
            unit,
            category: None,
            source_name: None,
            metadata: HashMap::new(),
        }
    }

    /// Instantaneous sample recorded at `at`
    #[must_use]
    pub fn at(provider_type: ProviderType, at: DateTime<Utc>, value: f64, unit: Unit) -> Self {
        Self::new(provider_type, at, at, value, unit)
    }

    /// Attach a category
    #[must_use]
    pub fn with_category(mut self, category: SampleCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Attach the recording source
    #[must_use]
    pub fn with_source(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = Some(source_name.into());
        self
    }

    /// Value as a unit-tagged measurement
    #[must_use]
    pub const fn measurement(&self) -> Measurement {
        Measurement::new(self.value, self.unit)
    }

    /// Copy the fields callers see into a [`Sample`], discarding the rest
    #[must_use]
    pub fn into_sample(self) -> Sample {
        Sample {
            start: self.start,
            end: self.end,
            value: self.value,
            unit: self.unit,
            category: self.category,
        }
    }
}

/// External health data store
///
/// Implementations must be `Send + Sync`; several queries may be in flight at
/// once. Dropping a returned future abandons the request.
#[async_trait]
pub trait HealthStore: Send + Sync {
    /// Store name for logs
    fn name(&self) -> &str;

    /// Ask the user for read access to `types`
    async fn request_authorization(&self, types: &HashSet<ProviderType>)
        -> Result<(), StoreError>;

    /// Fetch raw samples
    async fn execute_sample_query(&self, query: SampleQuery)
        -> Result<Vec<StoreSample>, StoreError>;

    /// Sum a quantity over the predicate, `None` when no samples match
    async fn execute_statistics_query(
        &self,
        query: StatisticsQuery,
    ) -> Result<Option<Measurement>, StoreError>;
}
