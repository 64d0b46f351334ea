//! Variance Sources
//!
//! The scheduler jitters interval growth with a random draw in `[0, 1)`.
//! Where that draw comes from is injected through [`VarianceSource`]:
//!
//! - [`RngVariance`]: a `StdRng` seeded from OS entropy (or a fixed seed)
//! - [`ConstVariance`]: always the same value, for tests and previews
//! - [`FnVariance`]: any `Fn() -> f64` closure, built with [`from_fn`]
//!
//! Sources take `&self` and must be `Send + Sync`, so a single scheduler can be
//! shared between threads. Sources with internal state serialize their own
//! access.

use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces pseudorandom values in the half-open range `[0, 1)`
pub trait VarianceSource: Send + Sync {
    /// Draw the next value
    fn sample(&self) -> f64;
}

impl<V: VarianceSource + ?Sized> VarianceSource for &V {
    fn sample(&self) -> f64 {
        (**self).sample()
    }
}

impl<V: VarianceSource + ?Sized> VarianceSource for Arc<V> {
    fn sample(&self) -> f64 {
        (**self).sample()
    }
}

impl<V: VarianceSource + ?Sized> VarianceSource for Box<V> {
    fn sample(&self) -> f64 {
        (**self).sample()
    }
}

// ============================================================================
// CONSTANT SOURCE
// ============================================================================

/// A source that always returns the wrapped value
///
/// `ConstVariance(0.5)` makes the jitter factor exactly `1.0` for any
/// variance factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstVariance(pub f64);

impl VarianceSource for ConstVariance {
    fn sample(&self) -> f64 {
        self.0
    }
}

// ============================================================================
// CLOSURE SOURCE
// ============================================================================

/// A source backed by a closure
///
/// Wrapped rather than implemented for `F: Fn() -> f64` directly, which would
/// overlap the `&V` and `Box<V>` impls (both are `Fn` when `V` is).
#[derive(Clone, Copy)]
pub struct FnVariance<F>(pub F);

/// Use `f` as a variance source
pub fn from_fn<F>(f: F) -> FnVariance<F>
where
    F: Fn() -> f64 + Send + Sync,
{
    FnVariance(f)
}

impl<F> VarianceSource for FnVariance<F>
where
    F: Fn() -> f64 + Send + Sync,
{
    fn sample(&self) -> f64 {
        (self.0)()
    }
}

// ============================================================================
// RNG SOURCE
// ============================================================================

/// A `StdRng` behind a mutex
#[derive(Debug)]
pub struct RngVariance {
    rng: Mutex<StdRng>,
}

impl RngVariance {
    /// Seed from the operating system's entropy source
    pub fn from_entropy() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Seed deterministically; equal seeds give equal sequences
    pub fn seed_from_u64(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl Default for RngVariance {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl VarianceSource for RngVariance {
    fn sample(&self) -> f64 {
        // A panic mid-draw cannot leave StdRng in an invalid state
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.r#gen::<f64>()
    }
}

// ============================================================================
// TESTS
// ============================================================================
