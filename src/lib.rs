// ABOUTME: Main library entry point for the Pierre health data access layer
// ABOUTME: Typed metric queries over an injected health store, normalized into a chosen unit system
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Health
//!
//! A typed access layer over an external health-data store. It exposes a
//! catalogue of metrics (body measurements, activity, sleep stages, workouts),
//! turns relative time ranges into absolute intervals, picks the right store
//! query for each metric kind, and converts results into the metric or
//! imperial unit system.
//!
//! ## Architecture
//!
//! - **Catalog**: one descriptor per metric (store type, sample kind, units)
//! - **Units**: lossless conversion between unit systems
//! - **Time ranges**: `Today`, `Yesterday`, `LastDays(n)`, `Custom` resolved to half-open intervals
//! - **Store**: the `HealthStore` trait, a callback bridge, and the per-kind dispatcher
//! - **Service**: [`HealthDataService`], the façade callers use
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use pierre_health::config::HealthConfig;
//! use pierre_health::{HealthDataService, InMemoryHealthStore, MetricId, TimeRange};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     pierre_health::logging::init_from_env()?;
//!
//!     let store = Arc::new(InMemoryHealthStore::new());
//!     let service = HealthDataService::with_config(store, HealthConfig::from_env());
//!     service.request_authorization(&[MetricId::StepCount]).await?;
//!
//!     let steps = service.steps(TimeRange::Today).await?;
//!     println!("steps today: {steps}");
//!     Ok(())
//! }
//! ```

// Core modules shared with the store crate
pub use pierre_health_core::catalog;
pub use pierre_health_core::constants;
pub use pierre_health_core::errors;
pub use pierre_health_core::models;
pub use pierre_health_core::time_range;
pub use pierre_health_core::units;

/// Store trait, callback bridge, dispatcher, and in-memory store
pub use pierre_health_store as store;

/// Time source abstraction
pub mod clock;
/// Service configuration
pub mod config;
/// Structured logging setup
pub mod logging;
/// Health data service façade
pub mod service;

pub use catalog::{MetricDescriptor, MetricId, ProviderType, SampleKind};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::HealthConfig;
pub use errors::{ErrorCode, HealthError, HealthResult, StoreError};
pub use models::{QueryResult, QueryValue, Sample, SampleCategory, SleepStage, WorkoutKind};
pub use pierre_health_store::{
    CallbackHealthStore, CallbackStoreAdapter, Completion, HealthStore, InMemoryHealthStore,
    QueryDispatcher, SampleQuery, SamplePredicate, SortOrder, StatisticsQuery, StoreSample,
};
pub use service::HealthDataService;
pub use time_range::{Calendar, DateInterval, TimeRange};
pub use units::{Measurement, Unit, UnitSystem};
