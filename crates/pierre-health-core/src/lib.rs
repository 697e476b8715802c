// ABOUTME: Core types for the Pierre health access layer
// ABOUTME: Foundation crate with errors, units, metric catalog, time ranges, and sample models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Health Core
//!
//! Foundation crate for reading health data out of an external store. Nothing in
//! here performs I/O: the types describe *what* to ask the store for and *how* to
//! interpret the answer.
//!
//! ## Modules
//!
//! - **errors**: `HealthError` taxonomy, `StoreError`, and stable `ErrorCode`s
//! - **units**: `UnitSystem`, physical `Unit` tokens, and the metric-aware converter
//! - **catalog**: `MetricId` and the static `MetricDescriptor` table
//! - **time_range**: `TimeRange` resolution into absolute `DateInterval`s
//! - **models**: samples and query results returned to callers
//! - **constants**: conversion factors, provider type identifiers, environment keys

/// Error taxonomy shared by the store and service layers
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Unit systems, physical units, and value conversion
pub mod units;

/// Static metric catalog
pub mod catalog;

/// Relative and absolute time ranges
pub mod time_range;

/// Sample and query result models
pub mod models;

pub use catalog::{descriptor, MetricDescriptor, MetricId, ProviderType, SampleKind};
pub use errors::{ErrorCode, HealthError, HealthResult, ParseError, StoreError};
pub use models::{QueryResult, QueryValue, Sample, SampleCategory, SleepStage, WorkoutKind};
pub use time_range::{resolve, Calendar, DateInterval, TimeRange};
pub use units::{convert, Dimension, Measurement, Unit, UnitSystem};
