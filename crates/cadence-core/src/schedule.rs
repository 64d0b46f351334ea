//! Schedule Data Model
//!
//! Two plain value records describe the timing state of a reviewed item:
//!
//! - [`Schedule`]: when the item was last answered and when it is next due
//! - [`IntervalSchedule`]: a [`Schedule`] plus the interval that produced `due`
//!
//! Both are immutable values. The scheduler never mutates a schedule handed to
//! it; every computation returns a fresh [`IntervalSchedule`].

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// SCHEDULE
// ============================================================================

/// When an item was last answered and when it is next due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Timestamp of the most recent answer
    pub last_answered: DateTime<Utc>,
    /// Timestamp at which the item is next due for review
    pub due: DateTime<Utc>,
}

impl Schedule {
    /// Create a schedule from its two timestamps
    pub fn new(last_answered: DateTime<Utc>, due: DateTime<Utc>) -> Self {
        Self { last_answered, due }
    }

    /// Whether the item is due at `now`
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.due
    }

    /// How far past its due date the item is at `now` (zero when not yet due)
    pub fn overdue_by(&self, now: DateTime<Utc>) -> Duration {
        (now - self.due).max(Duration::zero())
    }
}

// ============================================================================
// INTERVAL SCHEDULE
// ============================================================================

/// A [`Schedule`] together with the interval that produced its due date
///
/// Schedules returned by the scheduler always satisfy
/// `due == last_answered + interval`. Schedules built with
/// [`IntervalSchedule::from_parts`] are taken as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalSchedule {
    #[serde(flatten)]
    pub schedule: Schedule,
    /// Duration that, added to `last_answered`, gives `due`
    #[serde(with = "duration_nanos")]
    pub interval: Duration,
}

impl IntervalSchedule {
    /// Start a schedule at `last_answered`, due one `interval` later
    ///
    /// This is the usual way to seed a brand-new item. Near the edge of the
    /// representable range `due` is clamped and `interval` shortened to match.
    pub fn new(last_answered: DateTime<Utc>, interval: Duration) -> Self {
        let due = saturating_add(last_answered, interval);
        Self {
            schedule: Schedule::new(last_answered, due),
            interval: due - last_answered,
        }
    }

    /// Wrap an existing schedule and interval without checking consistency
    pub fn from_parts(schedule: Schedule, interval: Duration) -> Self {
        Self { schedule, interval }
    }

    pub fn last_answered(&self) -> DateTime<Utc> {
        self.schedule.last_answered
    }

    pub fn due(&self) -> DateTime<Utc> {
        self.schedule.due
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the item is due at `now`
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.schedule.is_due(now)
    }
}

impl From<IntervalSchedule> for Schedule {
    fn from(value: IntervalSchedule) -> Self {
        value.schedule
    }
}

/// `time + delta`, clamped to the representable range instead of panicking
pub(crate) fn saturating_add(time: DateTime<Utc>, delta: Duration) -> DateTime<Utc> {
    time.checked_add_signed(delta).unwrap_or(if delta < Duration::zero() {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

/// Serde adapter encoding a [`Duration`] as signed integer nanoseconds
mod duration_nanos {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer, ser};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let nanos = value
            .num_nanoseconds()
            .ok_or_else(|| ser::Error::custom("interval exceeds the nanosecond range"))?;
        serializer.serialize_i64(nanos)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        i64::deserialize(deserializer).map(Duration::nanoseconds)
    }
}

// ============================================================================
// TESTS
// ============================================================================
