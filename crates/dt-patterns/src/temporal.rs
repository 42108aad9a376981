//! Temporal feature enrichment.
//!
//! [`TemporalFeatureEngine`] attaches calendar attributes (weekday, weekend,
//! holiday, long weekend, distance to holidays, ...) to daily entries.  The
//! input is never modified; enrichment always produces a new sequence.

use std::collections::BTreeMap;

use dt_core::errors::Result;
use dt_math::{Statistics, Summary};
use dt_time::{Date, HolidayCalendar, PolishHolidayCalendar, Weekday};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entry::DailyEntry;

/// Coarse classification of a day for grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PeriodType {
    /// A working day.
    Workweek,
    /// Saturday or Sunday.
    Weekend,
    /// A public holiday.
    Holiday,
    /// A non-holiday day inside a long weekend.
    LongWeekend,
}

impl PeriodType {
    /// All period types, in display order.
    pub const ALL: [PeriodType; 4] = [
        PeriodType::Workweek,
        PeriodType::Weekend,
        PeriodType::Holiday,
        PeriodType::LongWeekend,
    ];
}

impl std::fmt::Display for PeriodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PeriodType::Workweek => "Workweek",
            PeriodType::Weekend => "Weekend",
            PeriodType::Holiday => "Holiday",
            PeriodType::LongWeekend => "Long Weekend",
        })
    }
}

/// Calendar attributes of one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalFeatures {
    /// 0 = Monday … 6 = Sunday.
    pub day_of_week: u8,
    /// Localized (Polish) day name.
    pub day_name: String,
    /// English day name.
    pub day_name_en: String,
    /// Saturday or Sunday under the calendar.
    pub is_weekend: bool,
    /// A weekday that is not a holiday.
    pub is_workweek: bool,
    /// A public holiday.
    pub is_holiday: bool,
    /// Holiday name, empty when the day is not a holiday.
    pub holiday_name: String,
    /// Part of a run of three or more days off that contains a holiday.
    pub is_long_weekend: bool,
    /// Classification used for grouping.
    pub period_type: PeriodType,
    /// Days until the next holiday; `None` for calendars without holidays.
    pub days_to_next_holiday: Option<u32>,
    /// Days since the previous holiday; `None` for calendars without
    /// holidays.
    pub days_since_last_holiday: Option<u32>,
    /// ISO week number.
    pub week_of_year: u32,
    /// Month (1–12).
    pub month: u32,
    /// Quarter (1–4).
    pub quarter: u32,
    /// Calendar year.
    pub year: i32,
}

impl TemporalFeatures {
    /// Compute the attributes of `date` under `calendar`.
    pub fn for_date<C: HolidayCalendar + ?Sized>(calendar: &C, date: Date) -> Result<Self> {
        let weekday = date.weekday();
        let holiday = calendar.holiday(date);
        let is_weekend = calendar.is_weekend(date);
        let is_holiday = holiday.is_some();
        let is_long_weekend = calendar.is_long_weekend(date);

        let period_type = if is_holiday {
            PeriodType::Holiday
        } else if is_long_weekend {
            PeriodType::LongWeekend
        } else if is_weekend {
            PeriodType::Weekend
        } else {
            PeriodType::Workweek
        };

        Ok(Self {
            day_of_week: weekday.index(),
            day_name: weekday.local_name().to_string(),
            day_name_en: weekday.name().to_string(),
            is_weekend,
            is_workweek: !is_weekend && !is_holiday,
            is_holiday,
            holiday_name: holiday.map(|h| h.name).unwrap_or_default(),
            is_long_weekend,
            period_type,
            days_to_next_holiday: calendar.days_to_next_holiday(date).ok(),
            days_since_last_holiday: calendar.days_since_last_holiday(date).ok(),
            week_of_year: date.iso_week(),
            month: date.month(),
            quarter: date.quarter(),
            year: date.year(),
        })
    }

    /// The day of the week.
    pub fn weekday(&self) -> Weekday {
        Weekday::from_index(self.day_of_week).unwrap_or(Weekday::Monday)
    }
}

/// A daily entry together with its calendar attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    /// The stored measurements.
    #[serde(flatten)]
    pub entry: DailyEntry,
    /// Attributes derived from the entry's date.
    #[serde(flatten)]
    pub features: TemporalFeatures,
}

impl EnrichedRecord {
    /// Date of the underlying entry.
    pub fn date(&self) -> Date {
        self.entry.date
    }
}

/// Intake, exercise and net-balance statistics of one period type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// The period these statistics cover.
    pub period_type: PeriodType,
    /// Records of this period type.
    pub days: usize,
    /// Intake; `None` when no record has one.
    pub calories: Option<Summary>,
    /// Exercise calories (missing counts as 0).
    pub exercise: Option<Summary>,
    /// Intake minus exercise.
    pub net_balance: Option<Summary>,
}

/// A holiday that has a record in the analysed data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedHoliday {
    /// Date of the holiday.
    pub date: Date,
    /// Holiday name.
    pub name: String,
}

/// Day counts by calendar class and the holidays present in the data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayAnalysis {
    /// Records analysed.
    pub total_days: usize,
    /// Records on holidays.
    pub holiday_days: usize,
    /// Records inside a long weekend.
    pub long_weekend_days: usize,
    /// Records on non-holiday weekdays.
    pub workweek_days: usize,
    /// Records on Saturdays and Sundays.
    pub weekend_days: usize,
    /// Holidays with a record, in date order.
    pub holidays: Vec<ObservedHoliday>,
}

/// Adds calendar attributes to daily entries.
#[derive(Debug, Clone, Default)]
pub struct TemporalFeatureEngine<C = PolishHolidayCalendar> {
    calendar: C,
}

impl TemporalFeatureEngine {
    /// An engine using the Polish holiday calendar.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: HolidayCalendar> TemporalFeatureEngine<C> {
    /// An engine using `calendar`.
    pub fn with_calendar(calendar: C) -> Self {
        Self { calendar }
    }

    /// The holiday calendar in use.
    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    /// Calendar attributes of a single date.
    pub fn features(&self, date: Date) -> Result<TemporalFeatures> {
        TemporalFeatures::for_date(&self.calendar, date)
    }

    /// Enrich typed entries, preserving their order.
    pub fn enrich(&self, entries: &[DailyEntry]) -> Result<Vec<EnrichedRecord>> {
        entries
            .iter()
            .map(|e| {
                Ok(EnrichedRecord {
                    entry: e.clone(),
                    features: self.features(e.date)?,
                })
            })
            .collect()
    }

    /// Enrich loosely-typed rows whose date lives in `date_field`.
    ///
    /// Every row is validated before any enrichment happens; the first
    /// invalid row aborts the call with an error naming its position.
    pub fn add_temporal_features(
        &self,
        rows: &[Map<String, Value>],
        date_field: &str,
    ) -> Result<Vec<EnrichedRecord>> {
        let entries = rows
            .iter()
            .enumerate()
            .map(|(i, row)| DailyEntry::from_row(i, row, date_field))
            .collect::<Result<Vec<_>>>()?;
        self.enrich(&entries)
    }

    /// Statistics per period type, for the period types present in
    /// `records`.
    pub fn period_summary(&self, records: &[EnrichedRecord]) -> Vec<PeriodSummary> {
        let mut groups: BTreeMap<PeriodType, Vec<&EnrichedRecord>> = BTreeMap::new();
        for r in records {
            groups.entry(r.features.period_type).or_default().push(r);
        }
        groups
            .into_iter()
            .map(|(period_type, rs)| PeriodSummary {
                period_type,
                days: rs.len(),
                calories: rs
                    .iter()
                    .filter_map(|r| r.entry.cal_in_kcal)
                    .collect::<Statistics>()
                    .summary(),
                exercise: rs
                    .iter()
                    .map(|r| r.entry.exercise_kcal())
                    .collect::<Statistics>()
                    .summary(),
                net_balance: rs
                    .iter()
                    .filter_map(|r| r.entry.net_kcal())
                    .collect::<Statistics>()
                    .summary(),
            })
            .collect()
    }

    /// Day counts by calendar class plus the holidays found in `records`.
    pub fn holiday_analysis(&self, records: &[EnrichedRecord]) -> HolidayAnalysis {
        let count = |pred: fn(&TemporalFeatures) -> bool| {
            records.iter().filter(|r| pred(&r.features)).count()
        };
        HolidayAnalysis {
            total_days: records.len(),
            holiday_days: count(|f| f.is_holiday),
            long_weekend_days: count(|f| f.is_long_weekend),
            workweek_days: count(|f| f.is_workweek),
            weekend_days: count(|f| f.is_weekend),
            holidays: records
                .iter()
                .filter(|r| r.features.is_holiday)
                .map(|r| ObservedHoliday {
                    date: r.date(),
                    name: r.features.holiday_name.clone(),
                })
                .collect(),
        }
    }
}
