//! # dt-math
//!
//! Descriptive statistics, the Student-t distribution (via statrs), and the
//! two-sample significance test used by the pattern detectors.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Probability distributions.
pub mod distributions;

/// Two-sample hypothesis tests.
pub mod hypothesis;

/// Statistics accumulators.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::StudentTDistribution;
pub use hypothesis::{welch_t_test, TTestResult, SIGNIFICANCE_LEVEL};
pub use statistics::{Statistics, Summary};
