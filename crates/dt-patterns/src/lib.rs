//! # dt-patterns
//!
//! Temporal feature enrichment and behavioural pattern detection.
//!
//! Daily diary entries are enriched with calendar attributes (weekend,
//! holiday, long weekend, ...) by [`TemporalFeatureEngine`], and
//! [`PatternDetectionEngine`] compares groups of days read from a
//! [`RecordStore`] with Welch's t-test.  [`MetricsEngine`] derives body
//! composition, net energy balance and rolling averages from the same store.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Analysis configuration.
pub mod config;

/// `DailyEntry`, one diary row per day.
pub mod entry;

/// Body composition, net balance and rolling averages.
pub mod metrics;

/// Weekend, holiday and day-of-week pattern detectors.
pub mod patterns;

/// Record store contract and an in-memory store.
pub mod store;

/// Calendar attributes of dated records.
pub mod temporal;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use config::AnalysisConfig;
pub use entry::DailyEntry;
pub use metrics::{DailyMetrics, MetricsEngine, MetricsSummary, RollingAverages};
pub use patterns::{
    ComprehensiveAnalysis, DayOfWeekPattern, HolidayPattern, PatternDetectionEngine,
    PatternStatus, TemporalSummary, WeekendPattern, MIN_GROUP_SIZE,
};
pub use store::{InMemoryStore, RecordStore};
pub use temporal::{EnrichedRecord, PeriodType, TemporalFeatureEngine, TemporalFeatures};
