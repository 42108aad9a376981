//! # diettrack
//!
//! Temporal pattern detection for daily diet and training records: a Polish
//! holiday calendar, calendar-feature enrichment, weekend, holiday and
//! day-of-week pattern detectors backed by Welch's t-test, and derived body
//! composition and energy-balance metrics.
//!
//! This crate is a **façade** that re-exports the workspace crates.
//! Application code should depend on this crate rather than the individual
//! `dt-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! diettrack = "0.1"
//! ```
//!
//! ```rust
//! use diettrack::patterns::{AnalysisConfig, DailyEntry, InMemoryStore, PatternDetectionEngine};
//! use diettrack::time::Date;
//!
//! let as_of = Date::from_ymd(2026, 3, 31).unwrap();
//! let store = InMemoryStore::from_entries((0..28).map(|i| {
//!     let day = as_of - i;
//!     let kcal = if day.weekday().is_weekend() { 2600.0 } else { 2000.0 };
//!     DailyEntry::new(day).with_calories_in(kcal)
//! }))
//! .unwrap();
//!
//! let engine = PatternDetectionEngine::new(store)
//!     .with_config(AnalysisConfig::default().with_as_of(as_of));
//! let weekend = engine.detect_weekend_pattern(27).unwrap();
//! assert!(weekend.detected);
//! assert!((weekend.calories.unwrap().difference - 600.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core aliases and error definitions.
pub use dt_core as core;

/// Date, weekday and holiday calendar types.
pub use dt_time as time;

/// Statistics, the Student-t distribution and Welch's t-test.
pub use dt_math as math;

/// Temporal enrichment, pattern detection and derived metrics.
pub use dt_patterns as patterns;
