//! Result types returned by the pattern detectors.
//!
//! Every result serializes to JSON through serde.  A consumer must be able to
//! tell "not enough data" from "no significant difference" from "significant
//! difference", which is what [`PatternStatus`] carries.

use dt_core::{Kcal, Percent, Real};
use dt_math::{Statistics, Summary, TTestResult};
use dt_time::{HolidayEntry, Weekday};
use serde::{Deserialize, Serialize};

/// Three-state outcome of a detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternStatus {
    /// Some compared group is below the minimum size.
    InsufficientData,
    /// Groups were compared; the difference is not significant.
    NotSignificant,
    /// Groups were compared; the difference is significant.
    Significant,
}

impl PatternStatus {
    /// Status of a comparison that passed the group-size guard.
    pub fn from_test(test: Option<&TTestResult>) -> Self {
        match test {
            Some(t) if t.significant => PatternStatus::Significant,
            _ => PatternStatus::NotSignificant,
        }
    }
}

impl std::fmt::Display for PatternStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PatternStatus::InsufficientData => "insufficient data",
            PatternStatus::NotSignificant => "not significant",
            PatternStatus::Significant => "significant",
        })
    }
}

/// Count, mean and standard deviation of one group's values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    /// Number of samples.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: Real,
    /// `None` for a single sample.
    pub std_dev: Option<Real>,
}

impl GroupStats {
    /// Statistics of `values`, or `None` if there are none.
    pub fn from_samples(values: &[Real]) -> Option<Self> {
        let s: Statistics = values.iter().copied().collect();
        Some(Self {
            count: s.samples(),
            mean: s.mean()?,
            std_dev: s.std_dev(),
        })
    }
}

/// A subject group measured against a baseline group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupComparison {
    /// The group under study (weekend, holidays).
    pub subject: GroupStats,
    /// The group it is measured against.
    pub baseline: GroupStats,
    /// `subject.mean - baseline.mean`.
    pub difference: Real,
    /// Difference relative to the baseline mean; `None` when that mean is 0.
    pub difference_pct: Option<Percent>,
    /// Welch's t-test of subject against baseline, when it was run.
    pub test: Option<TTestResult>,
}

impl GroupComparison {
    /// Compare two groups without a significance test.  `None` if either
    /// group is empty.
    pub fn between(subject: &[Real], baseline: &[Real]) -> Option<Self> {
        let subject = GroupStats::from_samples(subject)?;
        let baseline = GroupStats::from_samples(baseline)?;
        let difference = subject.mean - baseline.mean;
        Some(Self {
            subject,
            baseline,
            difference,
            difference_pct: (baseline.mean != 0.0).then(|| difference / baseline.mean * 100.0),
            test: None,
        })
    }

    /// Attach a test outcome.
    pub fn with_test(mut self, test: TTestResult) -> Self {
        self.test = Some(test);
        self
    }

    /// `p_value < SIGNIFICANCE_LEVEL` of the attached test.
    pub fn is_significant(&self) -> bool {
        self.test.is_some_and(|t| t.significant)
    }
}

/// Weekend against working-day behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekendPattern {
    /// Whether the groups were compared.
    pub detected: bool,
    /// Outcome of the comparison.
    pub status: PatternStatus,
    /// Why the pattern was not evaluated.
    pub reason: Option<String>,
    /// Lookback of the window in days.
    pub period_days: u32,
    /// Weekend records in the window.
    pub weekend_days: usize,
    /// Working-day (non-holiday weekday) records in the window.
    pub weekday_days: usize,
    /// Intake, weekend against weekdays, with the t-test.
    pub calories: Option<GroupComparison>,
    /// Exercise calories (missing counts as 0).
    pub exercise: Option<GroupComparison>,
    /// Intake minus exercise.
    pub net_balance: Option<GroupComparison>,
    /// Human-readable summary.
    pub summary: String,
}

/// Intake on long-weekend days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongWeekendStats {
    /// Long-weekend records in the window.
    pub days: usize,
    /// Intake on those days; `None` when none has an intake.
    pub calories: Option<GroupStats>,
}

/// Holiday against all other days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayPattern {
    /// Whether the groups were compared.
    pub detected: bool,
    /// Outcome of the comparison.
    pub status: PatternStatus,
    /// Why the pattern was not evaluated.
    pub reason: Option<String>,
    /// Lookback of the window in days.
    pub period_days: u32,
    /// Records on holidays.
    pub holiday_days: usize,
    /// Records on non-holiday days.
    pub normal_days: usize,
    /// Intake, holidays against other days, with the t-test.
    pub calories: Option<GroupComparison>,
    /// Exercise calories (missing counts as 0).
    pub exercise: Option<GroupComparison>,
    /// Intake minus exercise.
    pub net_balance: Option<GroupComparison>,
    /// Present when at least two long-weekend records exist.
    pub long_weekends: Option<LongWeekendStats>,
    /// Distinct holiday names that have a record, in date order.
    pub holidays_observed: Vec<String>,
    /// Calendar holidays falling inside the window, with or without records.
    pub holidays_in_window: Vec<HolidayEntry>,
    /// Human-readable summary.
    pub summary: String,
}

/// Statistics of one day of the week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayStats {
    /// 0 = Monday … 6 = Sunday.
    pub day_of_week: u8,
    /// English day name.
    pub name: String,
    /// Polish day name.
    pub local_name: String,
    /// Records falling on this day.
    pub count: usize,
    /// Intake: count, mean, std, min, max.
    pub calories: Option<Summary>,
    /// Exercise calories (missing counts as 0).
    pub exercise: Option<Summary>,
}

impl DayStats {
    /// Whether this day has enough intake samples for best/worst selection.
    pub fn participates(&self, min_samples: usize) -> bool {
        self.calories.is_some_and(|c| c.count >= min_samples)
    }
}

/// A day of the week identified as best or worst.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRef {
    /// 0 = Monday … 6 = Sunday.
    pub day_of_week: u8,
    /// English day name.
    pub name: String,
    /// Polish day name.
    pub local_name: String,
    /// Mean intake on this day.
    pub avg_calories: Kcal,
}

impl DayRef {
    pub(crate) fn new(day: Weekday, avg_calories: Kcal) -> Self {
        Self {
            day_of_week: day.index(),
            name: day.name().to_string(),
            local_name: day.local_name().to_string(),
            avg_calories,
        }
    }
}

/// Intake by day of the week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayOfWeekPattern {
    /// Whether best and worst days were compared.
    pub detected: bool,
    /// Outcome of the comparison.
    pub status: PatternStatus,
    /// Why the pattern was not evaluated.
    pub reason: Option<String>,
    /// Lookback of the window in days.
    pub period_days: u32,
    /// Always seven entries, Monday first.
    pub days: Vec<DayStats>,
    /// Day with the lowest mean intake.
    pub best_day: Option<DayRef>,
    /// Day with the highest mean intake.
    pub worst_day: Option<DayRef>,
    /// Welch's t-test of the worst day's intake against the best day's.
    pub test: Option<TTestResult>,
    /// Human-readable summary.
    pub summary: String,
}

impl DayOfWeekPattern {
    /// `worst_day.avg_calories - best_day.avg_calories`.
    pub fn spread(&self) -> Option<Kcal> {
        Some(self.worst_day.as_ref()?.avg_calories - self.best_day.as_ref()?.avg_calories)
    }
}

/// Day counts of an analysis window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TemporalSummary {
    /// Records in the window.
    pub total_days: usize,
    /// Nominal window length.
    pub calendar_days: u32,
    /// Records on Saturdays and Sundays.
    pub weekend_days: usize,
    /// Records on non-holiday weekdays.
    pub workweek_days: usize,
    /// Records on holidays.
    pub holiday_days: usize,
    /// Records inside a long weekend.
    pub long_weekend_days: usize,
    /// `min(total_days / calendar_days * 100, 100)`.
    pub coverage_pct: Percent,
}

/// Every detector over one window, plus the window's day counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveAnalysis {
    /// Weekend against working days.
    pub weekend_pattern: WeekendPattern,
    /// Holidays against other days, over the extended holiday lookback.
    pub holiday_pattern: HolidayPattern,
    /// Intake by day of the week.
    pub day_of_week_pattern: DayOfWeekPattern,
    /// Day counts and coverage of the window.
    pub temporal_summary: TemporalSummary,
}

/// Format a p-value for summaries.
pub(crate) fn format_p(p: Real) -> String {
    if p < 1e-4 {
        "p < 0.0001".to_string()
    } else {
        format!("p = {p:.4}")
    }
}

/// Sentence comparing the intake of `subject` with `baseline`.
pub(crate) fn intake_sentence(subject: &str, baseline: &str, c: &GroupComparison) -> String {
    let direction = if c.difference >= 0.0 { "higher" } else { "lower" };
    let pct = c
        .difference_pct
        .map(|p| format!(" ({:.1}%)", p.abs()))
        .unwrap_or_default();
    let significance = match &c.test {
        Some(t) if t.significant => format!(" (statistically significant, {})", format_p(t.p_value)),
        Some(t) => format!(" (not statistically significant, {})", format_p(t.p_value)),
        None => String::new(),
    };
    format!(
        "{subject} calorie intake is {:.0} kcal{pct} {direction} than {baseline}{significance}",
        c.difference.abs()
    )
}
