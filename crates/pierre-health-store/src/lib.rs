// ABOUTME: Health store abstraction and query layer for the Pierre health access layer
// ABOUTME: Store trait, callback bridge, per-kind query dispatcher, and in-memory store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health store integration.
//!
//! The external store is reached only through [`HealthStore`]. Callback-style
//! stores plug in through [`CallbackStoreAdapter`]; [`QueryDispatcher`] turns a
//! metric and an interval into the right store request.

// Re-export core modules so store code can keep `use crate::errors::*` etc.
pub use pierre_health_core::catalog;
pub use pierre_health_core::constants;
pub use pierre_health_core::errors;
pub use pierre_health_core::models;
pub use pierre_health_core::time_range;
pub use pierre_health_core::units;

/// Adapter from completion-callback stores to async futures
pub mod callback;
/// Per-sample-kind query strategies
pub mod dispatcher;
/// In-memory store for development and testing
pub mod memory;
/// Store trait and query shapes
pub mod store;

pub use callback::{bridge, CallbackHealthStore, CallbackStoreAdapter, Completion};
pub use dispatcher::QueryDispatcher;
pub use memory::InMemoryHealthStore;
pub use store::{
    HealthStore, SampleQuery, SamplePredicate, SortOrder, StatisticsQuery, StoreSample,
};
