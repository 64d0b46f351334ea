//! Interval Factor Scheduler
//!
//! Holds the floor, the variance factor and the variance source, and advances
//! schedules with them.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use super::algorithm::{self, IntervalCalculation};
use crate::config::{Result, SchedulerConfig};
use crate::schedule::IntervalSchedule;
use crate::variance::{RngVariance, VarianceSource};

/// Randomness draws used by [`IntervalFactorScheduler::interval_bounds`]
const LOW_SAMPLE: f64 = 0.0;
const MID_SAMPLE: f64 = 0.5;
const HIGH_SAMPLE: f64 = 1.0;

/// Range of intervals the jitter can produce for one answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalBounds {
    /// Interval with the lowest randomness draw
    pub low: Duration,
    /// Interval with a jitter factor of exactly 1.0
    pub mid: Duration,
    /// Interval with the highest randomness draw
    pub high: Duration,
}

/// Factor-based interval scheduler
///
/// Recall factors below 1.0 shrink the interval, 1.0 holds it, and above 1.0
/// grow it by a jittered bonus scaled by how much of the previous interval had
/// elapsed. The result never drops below `minimum_interval`.
///
/// `advance` takes `&self`; a scheduler over a `Send + Sync` variance source
/// can be shared between threads.
#[derive(Debug)]
pub struct IntervalFactorScheduler<V: VarianceSource = RngVariance> {
    minimum_interval: Duration,
    variance_factor: f64,
    variance: V,
}

impl IntervalFactorScheduler<RngVariance> {
    /// Create a scheduler with an entropy-seeded variance source
    ///
    /// `minimum_interval` should be non-negative. `variance_factor` is
    /// conventionally in `[0, 1]`; neither is checked here.
    pub fn new(minimum_interval: Duration, variance_factor: f64) -> Self {
        Self::with_variance(minimum_interval, variance_factor, RngVariance::from_entropy())
    }

    /// Validate `config` and build a scheduler from it
    ///
    /// A configured seed gives a reproducible variance source; without one the
    /// source is seeded from entropy.
    pub fn from_config(config: &SchedulerConfig) -> Result<Self> {
        config.validate()?;

        let variance = match config.seed {
            Some(seed) => RngVariance::seed_from_u64(seed),
            None => RngVariance::from_entropy(),
        };

        Ok(Self::with_variance(
            config.minimum_interval()?,
            config.variance_factor,
            variance,
        ))
    }
}

impl<V: VarianceSource> IntervalFactorScheduler<V> {
    /// Create a scheduler over an explicit variance source
    pub fn with_variance(minimum_interval: Duration, variance_factor: f64, variance: V) -> Self {
        Self {
            minimum_interval,
            variance_factor,
            variance,
        }
    }

    pub fn minimum_interval(&self) -> Duration {
        self.minimum_interval
    }

    pub fn variance_factor(&self) -> f64 {
        self.variance_factor
    }

    pub fn variance(&self) -> &V {
        &self.variance
    }

    /// Advance `schedule` for an answer at `answered_at` with recall `factor`
    ///
    /// Draws one value from the variance source. The returned schedule has
    /// `last_answered == answered_at` and `due == answered_at + interval`.
    pub fn advance(
        &self,
        schedule: &IntervalSchedule,
        answered_at: DateTime<Utc>,
        factor: f64,
    ) -> IntervalSchedule {
        self.advance_detailed(schedule, answered_at, factor).0
    }

    /// [`advance`](Self::advance), also returning every term of the calculation
    pub fn advance_detailed(
        &self,
        schedule: &IntervalSchedule,
        answered_at: DateTime<Utc>,
        factor: f64,
    ) -> (IntervalSchedule, IntervalCalculation) {
        let sample = self.variance.sample();
        let calc = self.calculate(schedule, answered_at, factor, sample);

        debug!(
            factor,
            effective_factor = calc.effective_factor,
            early_answer_multiplier = calc.early_answer_multiplier,
            previous_secs = schedule.interval.num_seconds(),
            next_secs = calc.interval.num_seconds(),
            floored = calc.floored,
            "Advanced interval schedule"
        );

        (IntervalSchedule::new(answered_at, calc.interval), calc)
    }

    /// Intervals `advance` could produce for this answer, lowest to highest
    ///
    /// Does not draw from the variance source. For a negative variance factor
    /// `low` and `high` swap roles.
    pub fn interval_bounds(
        &self,
        schedule: &IntervalSchedule,
        answered_at: DateTime<Utc>,
        factor: f64,
    ) -> IntervalBounds {
        let interval_for = |sample| self.calculate(schedule, answered_at, factor, sample).interval;

        IntervalBounds {
            low: interval_for(LOW_SAMPLE),
            mid: interval_for(MID_SAMPLE),
            high: interval_for(HIGH_SAMPLE),
        }
    }

    fn calculate(
        &self,
        schedule: &IntervalSchedule,
        answered_at: DateTime<Utc>,
        factor: f64,
        sample: f64,
    ) -> IntervalCalculation {
        let elapsed = answered_at.signed_duration_since(schedule.last_answered());
        algorithm::calculate(
            schedule.interval,
            elapsed,
            factor,
            self.variance_factor,
            sample,
            self.minimum_interval,
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
