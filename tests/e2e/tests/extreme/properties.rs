//! Scheduling Property Tests
//!
//! Invariants checked over grids of intervals, factors, answer times and
//! variance draws, including boundary and hostile inputs.

use cadence_core::interval::calculate;
use cadence_core::{ConstVariance, IntervalFactorScheduler, IntervalSchedule, RngVariance};
use cadence_e2e_tests::mocks::{ReviewCase, base_time};
use chrono::Duration;

const FACTORS: [f64; 9] = [-1.0, 0.0, 0.25, 0.6, 1.0, 1.2, 2.0, 3.5, 10.0];
const DRAWS: [f64; 5] = [0.0, 0.1, 0.5, 0.9, 0.999_999];

fn intervals() -> Vec<Duration> {
    vec![
        Duration::zero(),
        Duration::nanoseconds(1),
        Duration::seconds(7),
        Duration::minutes(30),
        Duration::hours(1),
        Duration::hours(2),
        Duration::days(9),
        Duration::days(400),
    ]
}

fn offsets() -> Vec<Duration> {
    vec![
        -Duration::days(3),
        -Duration::minutes(1),
        Duration::zero(),
        Duration::seconds(1),
        Duration::hours(5),
        Duration::days(3000),
    ]
}

#[test]
fn test_floor_is_never_breached() {
    let minimum = Duration::hours(1);
    for draw in DRAWS {
        let scheduler = IntervalFactorScheduler::with_variance(minimum, 0.4, ConstVariance(draw));
        for interval in intervals() {
            let schedule = IntervalSchedule::new(base_time(), interval);
            for offset in offsets() {
                for factor in FACTORS {
                    let next = scheduler.advance(&schedule, schedule.due() + offset, factor);
                    assert!(
                        next.interval() >= minimum,
                        "interval {:?} factor {} offset {:?} gave {:?}",
                        interval,
                        factor,
                        offset,
                        next.interval()
                    );
                }
            }
        }
    }
}

#[test]
fn test_output_is_self_consistent() {
    let scheduler =
        IntervalFactorScheduler::with_variance(Duration::minutes(1), 0.4, RngVariance::seed_from_u64(5));
    for interval in intervals() {
        let schedule = IntervalSchedule::new(base_time(), interval);
        for offset in offsets() {
            let answered = schedule.due() + offset;
            for factor in FACTORS {
                let next = scheduler.advance(&schedule, answered, factor);
                assert_eq!(next.last_answered(), answered);
                assert_eq!(next.due(), answered + next.interval());
                assert!(next.due() >= next.last_answered());
            }
        }
    }
}

#[test]
fn test_shrink_is_independent_of_timing() {
    for interval in intervals() {
        for factor in [0.0, 0.3, 0.6, 0.99, 1.0] {
            let mut case = ReviewCase {
                minimum_interval: Duration::seconds(1),
                factor,
                interval,
                ..Default::default()
            };
            let reference = case.next_interval();
            for offset in offsets() {
                case.answered = case.due + offset;
                assert_eq!(case.next_interval(), reference, "factor {}", factor);
            }
        }
    }
}

#[test]
fn test_late_answers_match_on_time() {
    for interval in intervals() {
        for factor in [1.1, 2.0, 4.0] {
            for draw in DRAWS {
                let mut case = ReviewCase {
                    minimum_interval: Duration::zero(),
                    factor,
                    interval,
                    ..Default::default()
                }
                .with_draw(draw);

                let on_time = case.next_interval();
                for late in [Duration::nanoseconds(1), Duration::hours(300), Duration::days(36_500)] {
                    case.answered = case.due + late;
                    assert_eq!(case.next_interval(), on_time);
                }
            }
        }
    }
}

#[test]
fn test_jitter_spread_matches_variance() {
    for interval in [Duration::hours(1), Duration::hours(2), Duration::days(3)] {
        for factor in [1.5, 2.0, 3.0] {
            let base = ReviewCase {
                interval,
                factor,
                ..Default::default()
            };
            let high = base.with_draw(1.0);
            let high_interval = high.next_interval();
            let low_interval = high.with_draw(0.0).next_interval();

            let spread = (high_interval - low_interval).num_nanoseconds().unwrap() as f64;
            let expected = interval.num_nanoseconds().unwrap() as f64 * (factor - 1.0) * 0.4;
            assert!(
                (spread - expected).abs() <= 2.0,
                "spread {} expected {}",
                spread,
                expected
            );
        }
    }
}

#[test]
fn test_growth_is_monotonic_in_elapsed_time() {
    let mut case = ReviewCase {
        minimum_interval: Duration::zero(),
        interval: Duration::hours(6),
        ..Default::default()
    };

    let mut previous = Duration::zero();
    for step in 0..=12 {
        case.answer_at_fraction(step, 12);
        let next = case.next_interval();
        assert!(next >= previous);
        previous = next;
    }
    assert_eq!(previous, Duration::hours(12));
}

#[test]
fn test_bonus_terms_collapse_for_zero_interval() {
    let calc = calculate(Duration::zero(), Duration::hours(4), 5.0, 0.4, 0.7, Duration::minutes(2));
    assert_eq!(calc.early_answer_multiplier, 0.0);
    assert_eq!(calc.effective_factor, 1.0);
    assert!(calc.floored);
    assert_eq!(calc.interval, Duration::minutes(2));
}

#[test]
fn test_extreme_values_do_not_panic() {
    let scheduler = IntervalFactorScheduler::with_variance(Duration::seconds(1), 0.4, ConstVariance(0.5));
    let huge = Duration::days(365 * 200);
    let schedule = IntervalSchedule::new(base_time(), huge);

    for factor in [f64::MAX, f64::INFINITY, f64::NAN, f64::MIN, 1e300] {
        let next = scheduler.advance(&schedule, schedule.due(), factor);
        assert!(next.interval() >= Duration::seconds(1));
        assert!(next.due() >= next.last_answered());
    }
}
