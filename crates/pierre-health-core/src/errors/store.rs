// ABOUTME: Store-native error type reported by HealthStore implementations
// ABOUTME: Never surfaced directly; the dispatcher wraps it into HealthError::QueryFailed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

use crate::catalog::ProviderType;
use crate::units::Unit;

/// Failures reported by an external health store
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The user declined the authorization request
    #[error("Authorization denied: {reason}")]
    AuthorizationDenied {
        /// Store-provided reason
        reason: String,
    },

    /// Read access for the type is missing or was revoked
    #[error("Not authorized to read {provider_type}")]
    NotAuthorized {
        /// Type that was queried
        provider_type: ProviderType,
    },

    /// The store is not available (locked device, not installed, shutting down)
    #[error("Health store unavailable: {reason}")]
    Unavailable {
        /// Store-provided reason
        reason: String,
    },

    /// The store does not know the requested type
    #[error("Type '{provider_type}' is not registered with the store")]
    TypeNotRegistered {
        /// Unknown type
        provider_type: ProviderType,
    },

    /// A returned value cannot be expressed in the requested unit
    #[error("Store returned a value in {actual} where {expected} was expected")]
    IncompatibleUnit {
        /// Unit the metric is defined in
        expected: Unit,
        /// Unit the store reported
        actual: Unit,
    },

    /// The store dropped a request without ever completing it
    #[error("Request was abandoned before completion")]
    Abandoned,

    /// Any other store failure
    #[error("Health store error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Whether retrying the same request later might succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable { .. } | Self::Abandoned)
    }
}
