// ABOUTME: Unified error taxonomy for health data access
// ABOUTME: Defines HealthError, stable ErrorCode values, and identifier parse errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Health Error Handling
//!
//! Every asynchronous accessor either completes with a typed result or fails with
//! exactly one [`HealthError`] kind. Store-native failures are represented by
//! [`StoreError`] and only ever reach callers wrapped in
//! [`HealthError::QueryFailed`].

/// Errors reported by health store implementations
pub mod store;

pub use store::StoreError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::MetricId;

/// Result alias used throughout the health access layer
pub type HealthResult<T> = Result<T, HealthError>;

/// Stable error codes for health access failures
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication & Authorization (1000-1999)
    /// Read access has not been granted
    #[serde(rename = "AUTH_REQUIRED")]
    AuthRequired = 1000,

    // Validation (3000-3999)
    /// The metric cannot be served by the requested operation
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,

    // Resource Management (4000-4999)
    /// The query matched no data
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,

    // External Services (5000-5999)
    /// The store failed while executing a request
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// The store is not reachable
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable = 5001,
    /// The store rejected the request for authorization reasons
    #[serde(rename = "EXTERNAL_AUTH_FAILED")]
    ExternalAuthFailed = 5002,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::AuthRequired => "Read access to the requested health data has not been granted",
            Self::InvalidInput => "The requested metric is not available for this operation",
            Self::ResourceNotFound => "No health data was recorded for the requested range",
            Self::ExternalServiceError => "The health store failed to execute the query",
            Self::ExternalServiceUnavailable => "The health store is currently unavailable",
            Self::ExternalAuthFailed => "The health store rejected the request as unauthorized",
        }
    }
}

/// Health data access errors
#[derive(Debug, Error)]
pub enum HealthError {
    /// Authorization denied or not yet granted for the listed metrics
    #[error("Not authorized to read {}", join_metrics(.metrics))]
    NotAuthorized {
        /// Metrics lacking read access
        metrics: Vec<MetricId>,
        /// Store failure reported while requesting authorization, if any
        #[source]
        source: Option<StoreError>,
    },

    /// The metric has no usable provider mapping for this operation
    #[error("Invalid metric '{metric}': {reason}")]
    InvalidMetric {
        /// Metric identifier as supplied by the caller
        metric: String,
        /// Why the metric cannot be served
        reason: &'static str,
    },

    /// A semantically valid query matched no data
    #[error("No data available for {metric}")]
    DataUnavailable {
        /// Metric that had no recorded samples
        metric: MetricId,
    },

    /// The external store reported a failure executing a request
    #[error("Query for {metric} failed")]
    QueryFailed {
        /// Metric being queried
        metric: MetricId,
        /// Underlying store failure
        #[source]
        source: StoreError,
    },
}

impl HealthError {
    /// Create an invalid-metric error for a known metric
    #[must_use]
    pub fn invalid_metric(metric: MetricId, reason: &'static str) -> Self {
        Self::InvalidMetric {
            metric: metric.as_str().to_owned(),
            reason,
        }
    }

    /// Create a not-authorized error without an underlying store failure
    #[must_use]
    pub fn not_authorized(metrics: impl Into<Vec<MetricId>>) -> Self {
        Self::NotAuthorized {
            metrics: metrics.into(),
            source: None,
        }
    }

    /// Stable error code for this error
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotAuthorized { .. } => ErrorCode::AuthRequired,
            Self::InvalidMetric { .. } => ErrorCode::InvalidInput,
            Self::DataUnavailable { .. } => ErrorCode::ResourceNotFound,
            Self::QueryFailed { source, .. } => match source {
                StoreError::Unavailable { .. } => ErrorCode::ExternalServiceUnavailable,
                StoreError::NotAuthorized { .. } | StoreError::AuthorizationDenied { .. } => {
                    ErrorCode::ExternalAuthFailed
                }
                _ => ErrorCode::ExternalServiceError,
            },
        }
    }

    /// Whether a caller-side retry might succeed
    ///
    /// The access layer never retries on its own.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::QueryFailed { source, .. } => source.is_retryable(),
            _ => false,
        }
    }
}

fn join_metrics(metrics: &[MetricId]) -> String {
    metrics
        .iter()
        .map(|metric| metric.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Failure to parse a textual identifier into a typed value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind} '{value}'")]
pub struct ParseError {
    /// What was being parsed (e.g. "unit system")
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
}

impl ParseError {
    /// Create a parse error for the given kind and raw input
    #[must_use]
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

impl From<ParseError> for HealthError {
    fn from(err: ParseError) -> Self {
        Self::InvalidMetric {
            metric: err.value,
            reason: "not a registered metric identifier",
        }
    }
}
