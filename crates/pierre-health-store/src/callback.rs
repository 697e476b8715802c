// ABOUTME: Bridges completion-callback store APIs into cancellable futures
// ABOUTME: One generic bridge shared by authorization, sample, and statistics requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Callback Bridge
//!
//! Platform stores usually report results through a completion handler rather
//! than a future. [`bridge`] hands such an API a [`Completion`] and awaits it.
//! Dropping the awaiting future closes the completion's channel, so the store
//! can see the request was abandoned and stop working on it.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::oneshot;
use tracing::debug;

use crate::catalog::ProviderType;
use crate::errors::StoreError;
use crate::store::{HealthStore, SampleQuery, StatisticsQuery, StoreSample};
use crate::units::Measurement;

/// Single-use completion handle passed to callback-style stores
#[derive(Debug)]
pub struct Completion<T> {
    sender: oneshot::Sender<Result<T, StoreError>>,
}

impl<T> Completion<T> {
    /// Deliver the result
    ///
    /// Returns `false` when the caller has already gone away; the result is
    /// dropped in that case.
    pub fn complete(self, result: Result<T, StoreError>) -> bool {
        self.sender.send(result).is_ok()
    }

    /// Deliver a successful result
    pub fn succeed(self, value: T) -> bool {
        self.complete(Ok(value))
    }

    /// Deliver a failure
    pub fn fail(self, error: StoreError) -> bool {
        self.complete(Err(error))
    }

    /// Whether the awaiting side was dropped
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.sender.is_closed()
    }

    /// Wait until the awaiting side is dropped
    pub async fn cancelled(&mut self) {
        self.sender.closed().await;
    }
}

/// Run a callback-style operation and await its completion
///
/// `start` is invoked on first poll with the completion handle. A handle that
/// is dropped without completing resolves to [`StoreError::Abandoned`].
///
/// # Errors
///
/// Returns whatever error the store delivers, or `StoreError::Abandoned`.
pub async fn bridge<T, F>(start: F) -> Result<T, StoreError>
where
    F: FnOnce(Completion<T>),
{
    let (sender, receiver) = oneshot::channel();
    start(Completion { sender });
    receiver.await.unwrap_or(Err(StoreError::Abandoned))
}

/// Health store whose operations report through completion handles
pub trait CallbackHealthStore: Send + Sync {
    /// Store name for logs
    fn name(&self) -> &str;

    /// Begin an authorization request
    fn start_authorization(&self, types: HashSet<ProviderType>, completion: Completion<()>);

    /// Begin a sample query
    fn start_sample_query(&self, query: SampleQuery, completion: Completion<Vec<StoreSample>>);

    /// Begin a statistics query
    fn start_statistics_query(
        &self,
        query: StatisticsQuery,
        completion: Completion<Option<Measurement>>,
    );
}

/// Exposes a [`CallbackHealthStore`] as an async [`HealthStore`]
#[derive(Debug)]
pub struct CallbackStoreAdapter<S> {
    inner: S,
}

impl<S: CallbackHealthStore> CallbackStoreAdapter<S> {
    /// Wrap a callback-style store
    #[must_use]
    pub const fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Wrapped store
    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: CallbackHealthStore> HealthStore for CallbackStoreAdapter<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn request_authorization(
        &self,
        types: &HashSet<ProviderType>,
    ) -> Result<(), StoreError> {
        let types = types.clone();
        bridge(|completion| self.inner.start_authorization(types, completion)).await
    }

    async fn execute_sample_query(
        &self,
        query: SampleQuery,
    ) -> Result<Vec<StoreSample>, StoreError> {
        debug!(
            store = self.inner.name(),
            provider_type = %query.provider_type,
            "Bridging sample query"
        );
        bridge(|completion| self.inner.start_sample_query(query, completion)).await
    }

    async fn execute_statistics_query(
        &self,
        query: StatisticsQuery,
    ) -> Result<Option<Measurement>, StoreError> {
        debug!(
            store = self.inner.name(),
            provider_type = %query.provider_type,
            "Bridging statistics query"
        );
        bridge(|completion| self.inner.start_statistics_query(query, completion)).await
    }
}
