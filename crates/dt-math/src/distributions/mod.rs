//! Probability distributions, delegating to the `statrs` crate.

/// Student's t-distribution.
pub mod student_t;

pub use student_t::StudentTDistribution;
