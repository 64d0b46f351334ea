//! Test doubles and fixtures

mod fixtures;

pub use fixtures::{ReviewCase, base_time};
pub use variance::SequenceVariance;
