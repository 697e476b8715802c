// ABOUTME: Runtime configuration for the health data service
// ABOUTME: Loads unit system, calendar, and authorization policy from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Service configuration
//!
//! | Variable | Values | Default |
//! |----------|--------|---------|
//! | `HEALTH_UNIT_SYSTEM` | `metric`, `imperial` | `metric` |
//! | `HEALTH_TIMEZONE` | `local`, `utc`, `+HH:MM` | `local` |
//! | `HEALTH_ENFORCE_AUTHORIZATION` | `true`, `false`, `1`, `0` | `true` |
//!
//! Invalid values are logged and replaced by the default.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::env_config;
use crate::time_range::Calendar;
use crate::units::UnitSystem;

/// Configuration for [`HealthDataService`](crate::HealthDataService)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Unit system active when the service starts
    #[serde(default)]
    pub unit_system: UnitSystem,
    /// Calendar used to place day boundaries for `Today` and `Yesterday`
    #[serde(default)]
    pub calendar: Calendar,
    /// Reject queries for metrics not covered by a prior authorization
    #[serde(default = "default_enforce_authorization")]
    pub enforce_authorization: bool,
}

const fn default_enforce_authorization() -> bool {
    true
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            unit_system: UnitSystem::default(),
            calendar: Calendar::default(),
            enforce_authorization: default_enforce_authorization(),
        }
    }
}

impl HealthConfig {
    /// Load configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let config = Self {
            unit_system: parse_var(env_config::UNIT_SYSTEM).unwrap_or(defaults.unit_system),
            calendar: parse_var(env_config::TIMEZONE).unwrap_or(defaults.calendar),
            enforce_authorization: env::var(env_config::ENFORCE_AUTHORIZATION)
                .ok()
                .and_then(|raw| parse_bool(env_config::ENFORCE_AUTHORIZATION, &raw))
                .unwrap_or(defaults.enforce_authorization),
        };

        debug!(
            unit_system = %config.unit_system,
            calendar = %config.calendar,
            enforce_authorization = config.enforce_authorization,
            "Health configuration loaded"
        );
        config
    }

    /// Override the starting unit system
    #[must_use]
    pub const fn with_unit_system(mut self, unit_system: UnitSystem) -> Self {
        self.unit_system = unit_system;
        self
    }

    /// Override the calendar
    #[must_use]
    pub const fn with_calendar(mut self, calendar: Calendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Turn authorization enforcement on or off
    #[must_use]
    pub const fn with_enforce_authorization(mut self, enforce: bool) -> Self {
        self.enforce_authorization = enforce;
        self
    }
}

fn parse_var<T>(key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, value = %raw, error = %e, "Ignoring invalid configuration value");
            None
        }
    }
}

fn parse_bool(key: &str, raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            warn!(key, value = %raw, "Ignoring invalid boolean configuration value");
            None
        }
    }
}
