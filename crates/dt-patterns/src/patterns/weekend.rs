//! Weekend against working-day comparison.

use dt_core::errors::Result;
use dt_time::HolidayCalendar;
use tracing::{info, warn};

use super::results::{intake_sentence, PatternStatus, WeekendPattern};
use super::{compare_groups, Group, PatternDetectionEngine, MIN_GROUP_SIZE};
use crate::store::RecordStore;
use crate::temporal::EnrichedRecord;

/// Exercise differences at or below this are not mentioned in summaries.
const EXERCISE_MENTION_KCAL: f64 = 50.0;

impl<S: RecordStore, C: HolidayCalendar> PatternDetectionEngine<S, C> {
    /// Compare intake, exercise and net balance on weekends against working
    /// days over the trailing `days` days.
    ///
    /// Holidays falling on weekdays belong to neither group.  Intake is
    /// compared with Welch's t-test.
    pub fn detect_weekend_pattern(&self, days: u32) -> Result<WeekendPattern> {
        analyse(&self.enriched_records(days)?, days)
    }
}

pub(super) fn analyse(records: &[EnrichedRecord], days: u32) -> Result<WeekendPattern> {
    let weekend = Group::select(records, |r| r.features.is_weekend);
    let weekday = Group::select(records, |r| r.features.is_workweek);
    let (n_weekend, n_weekday) = (weekend.intake().len(), weekday.intake().len());

    if n_weekend < MIN_GROUP_SIZE || n_weekday < MIN_GROUP_SIZE {
        let reason = format!(
            "insufficient data for weekend comparison: need ≥{MIN_GROUP_SIZE} days per group, \
             have weekend={n_weekend}, weekday={n_weekday}"
        );
        warn!(days, n_weekend, n_weekday, "weekend pattern skipped");
        return Ok(WeekendPattern {
            detected: false,
            status: PatternStatus::InsufficientData,
            summary: format!("No weekend pattern: {reason}."),
            reason: Some(reason),
            period_days: days,
            weekend_days: weekend.len(),
            weekday_days: weekday.len(),
            calories: None,
            exercise: None,
            net_balance: None,
        });
    }

    let (calories, exercise, net_balance) = compare_groups(&weekend, &weekday)?;
    let status = PatternStatus::from_test(calories.as_ref().and_then(|c| c.test.as_ref()));

    let mut parts = Vec::new();
    if let Some(c) = &calories {
        parts.push(intake_sentence("Weekend", "weekdays", c));
    }
    if let Some(e) = exercise.as_ref().filter(|e| e.difference.abs() > EXERCISE_MENTION_KCAL) {
        let direction = if e.difference > 0.0 { "more" } else { "less" };
        parts.push(format!(
            "Weekend exercise is {:.0} kcal {direction} than weekdays",
            e.difference.abs()
        ));
    }

    info!(
        days,
        %status,
        difference = calories.as_ref().map(|c| c.difference),
        "weekend pattern evaluated"
    );
    Ok(WeekendPattern {
        detected: true,
        status,
        reason: None,
        period_days: days,
        weekend_days: weekend.len(),
        weekday_days: weekday.len(),
        calories,
        exercise,
        net_balance,
        summary: parts.join(". ") + ".",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::TemporalFeatureEngine;
    use crate::DailyEntry;
    use dt_time::Date;

    fn records(entries: &[DailyEntry]) -> Vec<EnrichedRecord> {
        TemporalFeatureEngine::new().enrich(entries).unwrap()
    }

    #[test]
    fn exercise_sentence_only_for_large_differences() {
        // two weeks of March 2026, no holidays
        let start = Date::from_ymd(2026, 3, 2).unwrap();
        let entries: Vec<_> = (0..14)
            .map(|i| {
                let d = start + i;
                let weekend = d.weekday().is_weekend();
                DailyEntry::new(d)
                    .with_calories_in((if weekend { 2400.0 } else { 2000.0 }) + (i % 2) as f64)
                    .with_exercise(if weekend { 600.0 } else { 200.0 })
            })
            .collect();
        let p = analyse(&records(&entries), 14).unwrap();
        assert!(p.detected);
        assert_eq!(p.weekend_days, 4);
        assert_eq!(p.weekday_days, 10);
        assert!(p.summary.contains("Weekend exercise is 400 kcal more than weekdays"));
        let net = p.net_balance.unwrap();
        assert!((net.difference - 0.0).abs() < 1.0);
    }

    #[test]
    fn non_finite_intake_does_not_count_toward_group_size() {
        // Sat 14 .. Wed 18 March 2026
        let start = Date::from_ymd(2026, 3, 14).unwrap();
        let entries = [
            DailyEntry::new(start).with_calories_in(2400.0),
            DailyEntry::new(start + 1).with_calories_in(f64::NAN),
            DailyEntry::new(start + 2).with_calories_in(2000.0),
            DailyEntry::new(start + 3).with_calories_in(2050.0),
            DailyEntry::new(start + 4).with_calories_in(1950.0),
        ];
        let p = analyse(&records(&entries), 4).unwrap();
        assert!(!p.detected);
        assert_eq!(p.status, PatternStatus::InsufficientData);
        assert_eq!(p.weekend_days, 2);
        assert!(p.reason.unwrap().ends_with("have weekend=1, weekday=3"));
    }

    #[test]
    fn weekday_holidays_are_excluded() {
        // Jan 1 and Jan 6 2026 fall on weekdays
        let start = Date::from_ymd(2026, 1, 1).unwrap();
        let entries: Vec<_> = (0..14)
            .map(|i| DailyEntry::new(start + i).with_calories_in(2000.0 + i as f64))
            .collect();
        let p = analyse(&records(&entries), 14).unwrap();
        assert_eq!(p.weekend_days + p.weekday_days, 12);
    }
}
