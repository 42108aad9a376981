//! Behavioural pattern detection.
//!
//! [`PatternDetectionEngine`] reads a trailing window of records from a
//! [`RecordStore`], enriches them with calendar attributes and compares groups
//! of days:
//!
//! - weekend against working days ([`detect_weekend_pattern`]),
//! - holidays against all other days ([`detect_holiday_pattern`]),
//! - the seven days of the week ([`detect_day_of_week_pattern`]).
//!
//! A comparison where some group has fewer than [`MIN_GROUP_SIZE`] intake
//! samples is not evaluated; the result reports
//! [`PatternStatus::InsufficientData`] instead of an error.
//!
//! [`detect_weekend_pattern`]: PatternDetectionEngine::detect_weekend_pattern
//! [`detect_holiday_pattern`]: PatternDetectionEngine::detect_holiday_pattern
//! [`detect_day_of_week_pattern`]: PatternDetectionEngine::detect_day_of_week_pattern

mod day_of_week;
mod holiday;
/// Serializable detector results.
pub mod results;
mod weekend;

use dt_core::errors::Result;
use dt_core::Real;
use dt_time::{Date, HolidayCalendar, PolishHolidayCalendar};
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::store::{fetch_validated, RecordStore};
use crate::temporal::{EnrichedRecord, TemporalFeatureEngine};

pub use results::{
    ComprehensiveAnalysis, DayOfWeekPattern, DayRef, DayStats, GroupComparison, GroupStats,
    HolidayPattern, LongWeekendStats, PatternStatus, TemporalSummary, WeekendPattern,
};

/// Minimum number of intake samples per compared group.
pub const MIN_GROUP_SIZE: usize = 2;

/// Detects weekend, holiday and day-of-week effects in stored records.
///
/// The engine holds no mutable state; every call reads the store afresh.
#[derive(Debug, Clone)]
pub struct PatternDetectionEngine<S, C = PolishHolidayCalendar> {
    store: S,
    temporal: TemporalFeatureEngine<C>,
    config: AnalysisConfig,
}

impl<S: RecordStore> PatternDetectionEngine<S> {
    /// An engine over `store` using the Polish holiday calendar and the
    /// default configuration.
    pub fn new(store: S) -> Self {
        Self::with_calendar(store, PolishHolidayCalendar)
    }
}

impl<S: RecordStore, C: HolidayCalendar> PatternDetectionEngine<S, C> {
    /// An engine over `store` using `calendar`.
    pub fn with_calendar(store: S, calendar: C) -> Self {
        Self {
            store,
            temporal: TemporalFeatureEngine::with_calendar(calendar),
            config: AnalysisConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    /// The engine's configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// The underlying record store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The holiday calendar used for enrichment.
    pub fn calendar(&self) -> &C {
        self.temporal.calendar()
    }

    /// The window `[as_of - days, as_of]`.
    fn window(&self, days: u32) -> Result<(Date, Date)> {
        self.config.window(days)
    }

    /// Validated, enriched records of the trailing `days`-day window,
    /// ascending by date.
    ///
    /// # Errors
    /// [`Error::Precondition`](dt_core::Error::Precondition) if `days` is 0,
    /// [`Error::Validation`](dt_core::Error::Validation) naming the window
    /// position of the first malformed entry, or any error of the store.
    pub fn enriched_records(&self, days: u32) -> Result<Vec<EnrichedRecord>> {
        let (since, until) = self.window(days)?;
        let entries = fetch_validated(&self.store, since, until)?;
        debug!(%since, %until, records = entries.len(), "fetched analysis window");
        self.temporal.enrich(&entries)
    }

    /// Run every detector over `days` plus the window summary.
    ///
    /// The holiday detector looks back
    /// [`holiday_window(days)`](AnalysisConfig::holiday_window) days,
    /// `min(2 * days, holiday_max_days)`, since holidays are sparse.
    pub fn get_comprehensive_analysis(&self, days: u32) -> Result<ComprehensiveAnalysis> {
        let records = self.enriched_records(days)?;
        let holiday_days = self.config.holiday_window(days);
        Ok(ComprehensiveAnalysis {
            weekend_pattern: weekend::analyse(&records, days)?,
            holiday_pattern: self.detect_holiday_pattern(holiday_days)?,
            day_of_week_pattern: day_of_week::analyse(&records, days)?,
            temporal_summary: temporal_summary(&records, days),
        })
    }

    /// [`get_comprehensive_analysis`](Self::get_comprehensive_analysis) over
    /// the configured [`default_days`](AnalysisConfig::default_days).
    pub fn get_comprehensive_analysis_default(&self) -> Result<ComprehensiveAnalysis> {
        self.get_comprehensive_analysis(self.config.default_days)
    }

    /// Day counts and coverage of the `days`-day window.
    pub fn temporal_summary(&self, days: u32) -> Result<TemporalSummary> {
        Ok(temporal_summary(&self.enriched_records(days)?, days))
    }
}

fn temporal_summary(records: &[EnrichedRecord], days: u32) -> TemporalSummary {
    let count = |pred: fn(&EnrichedRecord) -> bool| records.iter().filter(|r| pred(r)).count();
    TemporalSummary {
        total_days: records.len(),
        calendar_days: days,
        weekend_days: count(|r| r.features.is_weekend),
        workweek_days: count(|r| r.features.is_workweek),
        holiday_days: count(|r| r.features.is_holiday),
        long_weekend_days: count(|r| r.features.is_long_weekend),
        coverage_pct: if days == 0 {
            0.0
        } else {
            (records.len() as Real / f64::from(days) * 100.0).min(100.0)
        },
    }
}

/// A subset of enriched records selected by a predicate.
struct Group<'a> {
    records: Vec<&'a EnrichedRecord>,
}

impl<'a> Group<'a> {
    fn select(records: &'a [EnrichedRecord], pred: impl Fn(&EnrichedRecord) -> bool) -> Self {
        Self {
            records: records.iter().filter(|r| pred(r)).collect(),
        }
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    /// Recorded finite intake values.
    fn intake(&self) -> Vec<Real> {
        self.records
            .iter()
            .filter_map(|r| r.entry.cal_in_kcal)
            .filter(|x| x.is_finite())
            .collect()
    }

    /// Exercise values, missing counted as 0.
    fn exercise(&self) -> Vec<Real> {
        self.records.iter().map(|r| r.entry.exercise_kcal()).collect()
    }

    /// Net balance of records with a finite intake.
    fn net(&self) -> Vec<Real> {
        self.records
            .iter()
            .filter_map(|r| r.entry.net_kcal())
            .filter(|x| x.is_finite())
            .collect()
    }
}

/// Intake, exercise and net-balance comparisons of `subject` against
/// `baseline`; the intake comparison carries Welch's t-test.
///
/// Both groups must already hold at least [`MIN_GROUP_SIZE`] intake samples.
fn compare_groups(
    subject: &Group<'_>,
    baseline: &Group<'_>,
) -> Result<(
    Option<GroupComparison>,
    Option<GroupComparison>,
    Option<GroupComparison>,
)> {
    let (si, bi) = (subject.intake(), baseline.intake());
    let calories = match GroupComparison::between(&si, &bi) {
        Some(c) => Some(c.with_test(dt_math::welch_t_test(&si, &bi)?)),
        None => None,
    };
    let exercise = GroupComparison::between(&subject.exercise(), &baseline.exercise());
    let net_balance = GroupComparison::between(&subject.net(), &baseline.net());
    Ok((calories, exercise, net_balance))
}
