//! Interval Factor Algorithm
//!
//! Pure functions behind [`IntervalFactorScheduler`](super::IntervalFactorScheduler).
//! Nothing here draws randomness or reads the clock; the caller passes both in.
//!
//! ## Formula
//!
//! ```text
//! base      = min(factor, 1)
//! bonus     = max(0, factor - 1)
//! jitter    = sample * variance + (1 - variance / 2)
//! early     = 0                         if previous == 0
//!           = min(1, elapsed / previous) otherwise
//! effective = base + bonus * early * jitter
//! next      = max(minimum, trunc(previous_ns * effective))
//! ```

use chrono::Duration;

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

// ============================================================================
// CALCULATION RESULT
// ============================================================================

/// Every intermediate term of one interval calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalCalculation {
    /// `min(factor, 1)`
    pub base_factor: f64,
    /// `max(0, factor - 1)`
    pub bonus_factor: f64,
    /// Jitter applied to the bonus, centered on 1.0
    pub random_factor: f64,
    /// Fraction of the previous interval elapsed at answer time, capped at 1.0
    pub early_answer_multiplier: f64,
    /// Factor the previous interval was scaled by
    pub effective_factor: f64,
    /// Resulting interval, after the minimum floor
    pub interval: Duration,
    /// Whether the minimum floor replaced the scaled interval
    pub floored: bool,
}

// ============================================================================
// TERMS
// ============================================================================

/// Jitter centered on 1.0 with total spread `variance_factor`
///
/// With a uniform `sample` in `[0, 1)` and `variance_factor = 0.4` the result
/// is uniform over `[0.8, 1.2)`. Out-of-range variance factors are not clamped.
pub fn random_factor(sample: f64, variance_factor: f64) -> f64 {
    sample * variance_factor + (1.0 - variance_factor / 2.0)
}

/// Fraction of `previous` that had elapsed when the answer came, capped at 1.0
///
/// A zero previous interval yields 0.0, so it never earns a growth bonus.
pub fn early_answer_multiplier(elapsed: Duration, previous: Duration) -> f64 {
    if previous.is_zero() {
        return 0.0;
    }
    (as_seconds_f64(elapsed) / as_seconds_f64(previous)).min(1.0)
}

/// A duration as fractional seconds: whole seconds plus sub-second nanoseconds
pub fn as_seconds_f64(duration: Duration) -> f64 {
    duration.num_seconds() as f64 + f64::from(duration.subsec_nanos()) / NANOS_PER_SEC
}

/// Scale `previous` by `factor`, truncating toward zero at nanosecond precision
///
/// Intervals and products outside the `i64` nanosecond range saturate. A NaN
/// product (e.g. a NaN factor) scales to zero.
pub fn scale_interval(previous: Duration, factor: f64) -> Duration {
    let scaled = saturating_nanos(previous) as f64 * factor;
    if scaled.is_nan() {
        tracing::warn!(factor, "Interval scaling produced NaN, using zero interval");
        return Duration::zero();
    }
    // `as` truncates toward zero and saturates at the i64 bounds
    Duration::nanoseconds(scaled as i64)
}

fn saturating_nanos(duration: Duration) -> i64 {
    duration.num_nanoseconds().unwrap_or(if duration < Duration::zero() {
        i64::MIN
    } else {
        i64::MAX
    })
}

// ============================================================================
// FULL CALCULATION
// ============================================================================

/// Run the whole calculation and keep every intermediate term
///
/// - `previous`: interval of the schedule being advanced
/// - `elapsed`: answer time minus the schedule's last answer
/// - `sample`: randomness draw in `[0, 1)`
pub fn calculate(
    previous: Duration,
    elapsed: Duration,
    factor: f64,
    variance_factor: f64,
    sample: f64,
    minimum: Duration,
) -> IntervalCalculation {
    // f64::min/max would drop a NaN factor; keep it so it reaches the floor
    let (base_factor, bonus_factor) = if factor.is_nan() {
        (factor, factor)
    } else {
        (factor.min(1.0), (factor - 1.0).max(0.0))
    };
    let random_factor = random_factor(sample, variance_factor);
    let early_answer_multiplier = early_answer_multiplier(elapsed, previous);

    let effective_factor = base_factor + bonus_factor * early_answer_multiplier * random_factor;

    let scaled = scale_interval(previous, effective_factor);
    let floored = scaled < minimum;
    let interval = if floored { minimum } else { scaled };

    IntervalCalculation {
        base_factor,
        bonus_factor,
        random_factor,
        early_answer_multiplier,
        effective_factor,
        interval,
        floored,
    }
}

/// Next interval only; see [`calculate`]
pub fn next_interval(
    previous: Duration,
    elapsed: Duration,
    factor: f64,
    variance_factor: f64,
    sample: f64,
    minimum: Duration,
) -> Duration {
    calculate(previous, elapsed, factor, variance_factor, sample, minimum).interval
}

// ============================================================================
// TESTS
// ============================================================================
