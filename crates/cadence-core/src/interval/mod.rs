//! Interval Factor Scheduling
//!
//! Advances a schedule by scaling its previous interval with a recall factor:
//!
//! - `factor < 1.0`: shrink by `factor`, regardless of answer timing
//! - `factor == 1.0`: hold the interval
//! - `factor > 1.0`: grow by the portion above 1.0, jittered and scaled by
//!   how much of the previous interval had elapsed (late answers earn no more
//!   than on-time ones)
//!
//! The result is floored at the scheduler's minimum interval.

mod algorithm;
mod scheduler;

pub use algorithm::{
    IntervalCalculation, as_seconds_f64, calculate, early_answer_multiplier, next_interval,
    random_factor, scale_interval,
};

pub use scheduler::{IntervalBounds, IntervalFactorScheduler};
