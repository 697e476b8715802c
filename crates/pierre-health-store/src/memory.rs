// ABOUTME: In-memory health store for development, demos, and tests
// ABOUTME: Evaluates predicates, sorting, limits, authorization, and injected failures in process
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// RwLock poisoning errors are converted to StoreError::Internal
// for proper error propagation through the dispatcher

//! # In-Memory Health Store
//!
//! A [`HealthStore`] backed by a `Vec` of samples. Unlike a platform store it:
//!
//! - Requires no user-facing permission prompt
//! - Supports sample injection while in use
//! - Can be told to deny authorization or fail every query
//! - Counts requests so callers can assert that nothing reached the store
//!
//! ## Thread Safety
//!
//! All state sits behind `RwLock`s and atomics; one instance can serve many
//! concurrent queries.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::catalog::ProviderType;
use crate::errors::StoreError;
use crate::store::{HealthStore, SampleQuery, SortOrder, StatisticsQuery, StoreSample};
use crate::units::Measurement;

const DEFAULT_NAME: &str = "in-memory";

/// Health store holding its samples in memory
#[derive(Debug)]
pub struct InMemoryHealthStore {
    name: String,
    samples: RwLock<Vec<StoreSample>>,
    granted: RwLock<HashSet<ProviderType>>,
    denied: RwLock<HashSet<ProviderType>>,
    failure: RwLock<Option<StoreError>>,
    enforce_authorization: bool,
    request_count: AtomicUsize,
}

impl Default for InMemoryHealthStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryHealthStore {
    /// Create an empty store that serves every type without authorization
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: DEFAULT_NAME.to_owned(),
            samples: RwLock::new(Vec::new()),
            granted: RwLock::new(HashSet::new()),
            denied: RwLock::new(HashSet::new()),
            failure: RwLock::new(None),
            enforce_authorization: false,
            request_count: AtomicUsize::new(0),
        }
    }

    /// Create a store pre-loaded with `samples`
    #[must_use]
    pub fn with_samples(samples: Vec<StoreSample>) -> Self {
        let store = Self::new();
        *store.samples.write().unwrap_or_else(PoisonError::into_inner) = samples;
        store
    }

    /// Rename the store (shows up in logs)
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Reject queries for types that were never granted through authorization
    #[must_use]
    pub const fn enforcing_authorization(mut self) -> Self {
        self.enforce_authorization = true;
        self
    }

    /// Add a sample
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Internal` if the sample lock is poisoned
    pub fn insert(&self, sample: StoreSample) -> Result<(), StoreError> {
        self.samples
            .write()
            .map_err(|e| StoreError::Internal(format!("sample lock poisoned: {e}")))?
            .push(sample);
        Ok(())
    }

    /// Make authorization requests that include `provider_type` fail
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Internal` if the authorization lock is poisoned
    pub fn deny(&self, provider_type: ProviderType) -> Result<(), StoreError> {
        self.denied
            .write()
            .map_err(|e| StoreError::Internal(format!("authorization lock poisoned: {e}")))?
            .insert(provider_type);
        Ok(())
    }

    /// Withdraw a previously granted type, as a user revoking access would
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Internal` if the authorization lock is poisoned
    pub fn revoke(&self, provider_type: ProviderType) -> Result<(), StoreError> {
        self.granted
            .write()
            .map_err(|e| StoreError::Internal(format!("authorization lock poisoned: {e}")))?
            .remove(&provider_type);
        info!(store = %self.name, provider_type = %provider_type, "Authorization revoked");
        Ok(())
    }

    /// Fail every subsequent request with `error` until cleared
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Internal` if the failure lock is poisoned
    pub fn fail_with(&self, error: StoreError) -> Result<(), StoreError> {
        let mut failure = self
            .failure
            .write()
            .map_err(|e| StoreError::Internal(format!("failure lock poisoned: {e}")))?;
        *failure = Some(error);
        Ok(())
    }

    /// Stop injecting failures
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Internal` if the failure lock is poisoned
    pub fn clear_failure(&self) -> Result<(), StoreError> {
        *self
            .failure
            .write()
            .map_err(|e| StoreError::Internal(format!("failure lock poisoned: {e}")))? = None;
        Ok(())
    }

    /// Number of requests received so far
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Whether `provider_type` has been granted
    #[must_use]
    pub fn is_granted(&self, provider_type: ProviderType) -> bool {
        self.granted
            .read()
            .is_ok_and(|granted| granted.contains(&provider_type))
    }

    fn begin_request(&self) -> Result<(), StoreError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        let failure = self
            .failure
            .read()
            .map_err(|e| StoreError::Internal(format!("failure lock poisoned: {e}")))?;
        failure.as_ref().map_or(Ok(()), |error| Err(error.clone()))
    }

    fn check_granted(&self, provider_type: ProviderType) -> Result<(), StoreError> {
        if !self.enforce_authorization {
            return Ok(());
        }
        let granted = self
            .granted
            .read()
            .map_err(|e| StoreError::Internal(format!("authorization lock poisoned: {e}")))?;
        if granted.contains(&provider_type) {
            Ok(())
        } else {
            Err(StoreError::NotAuthorized { provider_type })
        }
    }

    fn matching_samples(&self, query: &SampleQuery) -> Result<Vec<StoreSample>, StoreError> {
        let samples = self
            .samples
            .read()
            .map_err(|e| StoreError::Internal(format!("sample lock poisoned: {e}")))?;

        let mut matching: Vec<StoreSample> = samples
            .iter()
            .filter(|sample| {
                sample.provider_type == query.provider_type
                    && query.predicate.matches(sample.start, sample.end)
            })
            .cloned()
            .collect();
        drop(samples);

        match query.sort {
            SortOrder::Unsorted => {}
            SortOrder::StartAscending => matching.sort_by(|a, b| a.start.cmp(&b.start)),
            SortOrder::StartDescending => matching.sort_by(|a, b| b.start.cmp(&a.start)),
        }
        if let Some(limit) = query.limit {
            matching.truncate(limit);
        }
        Ok(matching)
    }
}

#[async_trait]
impl HealthStore for InMemoryHealthStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn request_authorization(
        &self,
        types: &HashSet<ProviderType>,
    ) -> Result<(), StoreError> {
        self.begin_request()?;

        let denied = self
            .denied
            .read()
            .map_err(|e| StoreError::Internal(format!("authorization lock poisoned: {e}")))?;
        if let Some(rejected) = types.iter().find(|t| denied.contains(*t)) {
            return Err(StoreError::AuthorizationDenied {
                reason: format!("read access to {rejected} was declined"),
            });
        }
        drop(denied);

        self.granted
            .write()
            .map_err(|e| StoreError::Internal(format!("authorization lock poisoned: {e}")))?
            .extend(types.iter().copied());
        info!(store = %self.name, types = types.len(), "Authorization granted");
        Ok(())
    }

    async fn execute_sample_query(
        &self,
        query: SampleQuery,
    ) -> Result<Vec<StoreSample>, StoreError> {
        self.begin_request()?;
        self.check_granted(query.provider_type)?;

        let samples = self.matching_samples(&query)?;
        debug!(
            store = %self.name,
            provider_type = %query.provider_type,
            returned = samples.len(),
            "Served sample query"
        );
        Ok(samples)
    }

    async fn execute_statistics_query(
        &self,
        query: StatisticsQuery,
    ) -> Result<Option<Measurement>, StoreError> {
        self.begin_request()?;
        self.check_granted(query.provider_type)?;

        let sample_query = SampleQuery {
            provider_type: query.provider_type,
            predicate: query.predicate,
            limit: None,
            sort: SortOrder::Unsorted,
        };
        let samples = self.matching_samples(&sample_query)?;
        if samples.is_empty() {
            return Ok(None);
        }

        let mut sum = 0.0;
        for sample in &samples {
            sum += sample
                .unit
                .convert(sample.value, query.unit)
                .ok_or(StoreError::IncompatibleUnit {
                    expected: query.unit,
                    actual: sample.unit,
                })?;
        }
        Ok(Some(Measurement::new(sum, query.unit)))
    }
}
