//! Scheduler Configuration
//!
//! Serde-friendly settings for building an
//! [`IntervalFactorScheduler`](crate::IntervalFactorScheduler), with defaults
//! and environment overrides:
//!
//! - `CADENCE_MINIMUM_INTERVAL_SECS`: interval floor in seconds
//! - `CADENCE_VARIANCE_FACTOR`: jitter breadth, conventionally `[0, 1]`
//! - `CADENCE_SEED`: fixed seed for reproducible jitter

use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default interval floor: one hour
pub const DEFAULT_MINIMUM_INTERVAL_SECS: i64 = 3600;

/// Default jitter breadth: growth bonus scaled by `[0.8, 1.2)`
pub const DEFAULT_VARIANCE_FACTOR: f64 = 0.4;

pub const ENV_MINIMUM_INTERVAL_SECS: &str = "CADENCE_MINIMUM_INTERVAL_SECS";
pub const ENV_VARIANCE_FACTOR: &str = "CADENCE_VARIANCE_FACTOR";
pub const ENV_SEED: &str = "CADENCE_SEED";

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Errors from loading or validating a [`SchedulerConfig`]
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The interval floor is below zero
    #[error("Minimum interval must not be negative: {0}s")]
    NegativeMinimumInterval(i64),

    /// The interval floor does not fit in a duration
    #[error("Minimum interval out of range: {0}s")]
    MinimumIntervalOutOfRange(i64),

    /// The variance factor is negative, NaN or infinite
    #[error("Invalid variance factor: {0}")]
    InvalidVarianceFactor(f64),

    /// An environment variable could not be parsed
    #[error("Invalid value for {name}: {value:?}")]
    InvalidEnvVar { name: String, value: String },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

// ============================================================================
// CONFIG
// ============================================================================

/// Settings for an interval factor scheduler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchedulerConfig {
    /// Interval floor in seconds
    pub minimum_interval_secs: i64,
    /// Jitter breadth applied to interval growth
    pub variance_factor: f64,
    /// Fixed seed for the variance source (entropy when `None`)
    pub seed: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            minimum_interval_secs: DEFAULT_MINIMUM_INTERVAL_SECS,
            variance_factor: DEFAULT_VARIANCE_FACTOR,
            seed: None,
        }
    }
}

impl SchedulerConfig {
    /// Defaults overridden by any `CADENCE_*` variables in the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable name
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(secs) = parse_var(&lookup, ENV_MINIMUM_INTERVAL_SECS)? {
            config.minimum_interval_secs = secs;
        }
        if let Some(variance) = parse_var(&lookup, ENV_VARIANCE_FACTOR)? {
            config.variance_factor = variance;
        }
        if let Some(seed) = parse_var(&lookup, ENV_SEED)? {
            config.seed = Some(seed);
        }

        Ok(config)
    }

    /// Interval floor as a duration
    pub fn minimum_interval(&self) -> Result<Duration> {
        Duration::try_seconds(self.minimum_interval_secs)
            .ok_or(ConfigError::MinimumIntervalOutOfRange(self.minimum_interval_secs))
    }

    /// Check the settings before building a scheduler
    ///
    /// A variance factor above 1.0 is allowed but logged; the jitter formula
    /// still computes with it.
    pub fn validate(&self) -> Result<()> {
        if self.minimum_interval_secs < 0 {
            return Err(ConfigError::NegativeMinimumInterval(self.minimum_interval_secs));
        }
        self.minimum_interval()?;

        if !self.variance_factor.is_finite() || self.variance_factor < 0.0 {
            return Err(ConfigError::InvalidVarianceFactor(self.variance_factor));
        }
        if self.variance_factor > 1.0 {
            tracing::warn!(
                variance_factor = self.variance_factor,
                "Variance factor above 1.0 lets the growth bonus jitter below zero"
            );
        }

        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                value,
            }),
    }
}

// ============================================================================
// TESTS
// ============================================================================
