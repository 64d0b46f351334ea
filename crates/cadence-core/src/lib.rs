//! # Cadence Core
//!
//! Factor-based interval scheduling for spaced repetition.
//!
//! Given an item's current [`IntervalSchedule`], the time it was answered and a
//! recall factor, [`IntervalFactorScheduler::advance`] produces the next
//! schedule:
//!
//! - **Shrink / hold**: factors up to 1.0 scale the previous interval directly
//! - **Growth bonus**: the part of the factor above 1.0, jittered by a
//!   [`VarianceSource`] and scaled by how much of the previous interval had
//!   elapsed at answer time
//! - **Floor**: the result never drops below the configured minimum interval
//!
//! ## Quick Start
//!
//! ```rust
//! use cadence_core::{IntervalFactorScheduler, IntervalSchedule};
//! use chrono::{Duration, Utc};
//!
//! let scheduler = IntervalFactorScheduler::new(Duration::hours(1), 0.4);
//!
//! // A new item answered an hour ago, due now
//! let now = Utc::now();
//! let schedule = IntervalSchedule::new(now - Duration::hours(1), Duration::hours(1));
//!
//! // Recalled well: the interval grows to somewhere in [1.8h, 2.2h)
//! let next = scheduler.advance(&schedule, now, 2.0);
//! assert!(next.interval() >= Duration::minutes(108));
//! assert_eq!(next.due(), now + next.interval());
//! ```
//!
//! Persistence and the choice of factor are left to the caller.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod config;
pub mod interval;
pub mod schedule;
pub mod variance;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use config::{ConfigError, SchedulerConfig};
pub use interval::{IntervalBounds, IntervalCalculation, IntervalFactorScheduler};
pub use schedule::{IntervalSchedule, Schedule};
pub use variance::{ConstVariance, FnVariance, RngVariance, VarianceSource};
