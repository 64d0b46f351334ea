//! Review Fixtures
//!
//! A mutable description of one answer event that builds the schedule being
//! advanced and runs the scheduler on it. Tests tweak one field at a time and
//! re-run.

use cadence_core::{
    ConstVariance, IntervalFactorScheduler, IntervalSchedule, Schedule, VarianceSource,
};
use chrono::{DateTime, Duration, TimeZone, Utc};

/// Fixed reference time so results do not depend on the wall clock
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap()
}

/// One answer event against a schedule
///
/// The schedule being advanced ends at `due` and started `interval` earlier.
pub struct ReviewCase {
    pub minimum_interval: Duration,
    pub variance_factor: f64,
    pub variance: Box<dyn VarianceSource>,
    pub factor: f64,
    pub answered: DateTime<Utc>,
    pub due: DateTime<Utc>,
    pub interval: Duration,
}

impl Default for ReviewCase {
    /// One-hour floor, 0.4 variance, jitter factor 1.0, factor 2.0, answered on time
    fn default() -> Self {
        let now = base_time();
        Self {
            minimum_interval: Duration::hours(1),
            variance_factor: 0.4,
            variance: Box::new(ConstVariance(0.5)),
            factor: 2.0,
            answered: now,
            due: now,
            interval: Duration::hours(1),
        }
    }
}

impl ReviewCase {
    /// Use a constant draw for the next runs
    pub fn with_draw(mut self, draw: f64) -> Self {
        self.variance = Box::new(ConstVariance(draw));
        self
    }

    pub fn scheduler(&self) -> IntervalFactorScheduler<&dyn VarianceSource> {
        IntervalFactorScheduler::with_variance(
            self.minimum_interval,
            self.variance_factor,
            self.variance.as_ref(),
        )
    }

    pub fn current_schedule(&self) -> IntervalSchedule {
        IntervalSchedule::from_parts(
            Schedule::new(self.due - self.interval, self.due),
            self.interval,
        )
    }

    pub fn next_schedule(&self) -> IntervalSchedule {
        self.scheduler()
            .advance(&self.current_schedule(), self.answered, self.factor)
    }

    pub fn next_interval(&self) -> Duration {
        self.next_schedule().interval()
    }

    /// Answer after `fraction` of the current interval had elapsed
    pub fn answer_at_fraction(&mut self, numerator: i32, denominator: i32) {
        self.answered = self.current_schedule().last_answered() + self.interval * numerator / denominator;
    }
}
