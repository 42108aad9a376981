//! Holiday against all other days.

use dt_core::errors::Result;
use dt_time::{HolidayCalendar, HolidayEntry};
use tracing::{debug, info, warn};

use super::results::{intake_sentence, GroupStats, HolidayPattern, LongWeekendStats, PatternStatus};
use super::{compare_groups, Group, PatternDetectionEngine, MIN_GROUP_SIZE};
use crate::store::RecordStore;
use crate::temporal::EnrichedRecord;

impl<S: RecordStore, C: HolidayCalendar> PatternDetectionEngine<S, C> {
    /// Compare holidays against all other days over the trailing `days`
    /// days, and report long-weekend intake and the holidays in the window.
    pub fn detect_holiday_pattern(&self, days: u32) -> Result<HolidayPattern> {
        let (since, until) = self.window(days)?;
        let in_window = self.calendar().holidays_between(since, until)?;
        debug!(%since, %until, holidays = in_window.len(), "holiday window");
        analyse(&self.enriched_records(days)?, days, in_window)
    }
}

fn analyse(
    records: &[EnrichedRecord],
    days: u32,
    holidays_in_window: Vec<HolidayEntry>,
) -> Result<HolidayPattern> {
    let holiday = Group::select(records, |r| r.features.is_holiday);
    let normal = Group::select(records, |r| !r.features.is_holiday);
    let long_weekend = Group::select(records, |r| r.features.is_long_weekend);

    let long_weekends = (long_weekend.len() >= MIN_GROUP_SIZE).then(|| LongWeekendStats {
        days: long_weekend.len(),
        calories: GroupStats::from_samples(&long_weekend.intake()),
    });

    let mut holidays_observed: Vec<String> = Vec::new();
    for r in &holiday.records {
        if !holidays_observed.contains(&r.features.holiday_name) {
            holidays_observed.push(r.features.holiday_name.clone());
        }
    }

    let (n_holiday, n_normal) = (holiday.intake().len(), normal.intake().len());
    if n_holiday < MIN_GROUP_SIZE || n_normal < MIN_GROUP_SIZE {
        let reason = format!(
            "insufficient data for holiday comparison: need ≥{MIN_GROUP_SIZE} days per group, \
             have holiday={n_holiday}, other={n_normal}"
        );
        warn!(days, n_holiday, n_normal, "holiday pattern skipped");
        return Ok(HolidayPattern {
            detected: false,
            status: PatternStatus::InsufficientData,
            summary: format!("No holiday pattern: {reason}."),
            reason: Some(reason),
            period_days: days,
            holiday_days: holiday.len(),
            normal_days: normal.len(),
            calories: None,
            exercise: None,
            net_balance: None,
            long_weekends,
            holidays_observed,
            holidays_in_window,
        });
    }

    let (calories, exercise, net_balance) = compare_groups(&holiday, &normal)?;
    let status = PatternStatus::from_test(calories.as_ref().and_then(|c| c.test.as_ref()));

    let mut parts = Vec::new();
    if let Some(c) = &calories {
        parts.push(intake_sentence("Holiday", "normal days", c));
    }
    if let Some(lw) = &long_weekends {
        match &lw.calories {
            Some(c) => parts.push(format!(
                "Long weekends: {} days observed, avg {:.0} kcal",
                lw.days, c.mean
            )),
            None => parts.push(format!("Long weekends: {} days observed", lw.days)),
        }
    }

    info!(
        days,
        %status,
        observed = holidays_observed.len(),
        "holiday pattern evaluated"
    );
    Ok(HolidayPattern {
        detected: true,
        status,
        reason: None,
        period_days: days,
        holiday_days: holiday.len(),
        normal_days: normal.len(),
        calories,
        exercise,
        net_balance,
        long_weekends,
        holidays_observed,
        holidays_in_window,
        summary: parts.join(". ") + ".",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::TemporalFeatureEngine;
    use crate::DailyEntry;
    use dt_time::Date;

    #[test]
    fn christmas_season() {
        // Dec 20 2025 .. Jan 10 2026
        let start = Date::from_ymd(2025, 12, 20).unwrap();
        let entries: Vec<_> = (0..22)
            .map(|i| {
                let d = start + i;
                let kcal = if [25, 26, 1, 6].contains(&d.day_of_month()) { 3200.0 } else { 2100.0 };
                DailyEntry::new(d).with_calories_in(kcal + (i % 3) as f64 * 10.0)
            })
            .collect();
        let records = TemporalFeatureEngine::new().enrich(&entries).unwrap();
        let p = analyse(&records, 22, Vec::new()).unwrap();

        assert!(p.detected);
        assert_eq!(p.holiday_days, 4);
        assert_eq!(p.normal_days, 18);
        assert_eq!(
            p.holidays_observed,
            ["Christmas Day", "Second Day of Christmas", "New Year's Day", "Epiphany"]
        );
        let c = p.calories.as_ref().unwrap();
        assert!(c.difference > 1000.0);
        assert_eq!(p.status, PatternStatus::Significant);
        assert!(p.long_weekends.is_some());
        assert!(p.summary.starts_with("Holiday calorie intake is"));
        assert!(p.summary.contains("Long weekends:"));
    }

    #[test]
    fn no_holidays_is_insufficient() {
        let start = Date::from_ymd(2026, 3, 2).unwrap();
        let entries: Vec<_> = (0..14)
            .map(|i| DailyEntry::new(start + i).with_calories_in(2000.0))
            .collect();
        let records = TemporalFeatureEngine::new().enrich(&entries).unwrap();
        let p = analyse(&records, 14, Vec::new()).unwrap();
        assert!(!p.detected);
        assert_eq!(p.status, PatternStatus::InsufficientData);
        assert_eq!(
            p.reason.as_deref(),
            Some("insufficient data for holiday comparison: need ≥2 days per group, have holiday=0, other=14")
        );
        assert!(p.calories.is_none());
        assert!(p.long_weekends.is_none());
    }
}
