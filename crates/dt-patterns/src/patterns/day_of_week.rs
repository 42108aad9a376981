//! Per-weekday intake and exercise.

use dt_core::errors::Result;
use dt_math::{welch_t_test, Statistics};
use dt_time::{HolidayCalendar, Weekday};
use tracing::{debug, info, warn};

use super::results::{format_p, DayOfWeekPattern, DayRef, DayStats, PatternStatus};
use super::{Group, PatternDetectionEngine, MIN_GROUP_SIZE};
use crate::store::RecordStore;
use crate::temporal::EnrichedRecord;

impl<S: RecordStore, C: HolidayCalendar> PatternDetectionEngine<S, C> {
    /// Group the trailing `days` days by day of the week and identify the
    /// days with the lowest (best) and highest (worst) mean intake.
    ///
    /// All seven days are always reported.  Only days with at least
    /// [`MIN_GROUP_SIZE`] intake samples compete for best and worst; ties go
    /// to the earlier day of the week.
    pub fn detect_day_of_week_pattern(&self, days: u32) -> Result<DayOfWeekPattern> {
        analyse(&self.enriched_records(days)?, days)
    }
}

pub(super) fn analyse(records: &[EnrichedRecord], days: u32) -> Result<DayOfWeekPattern> {
    let groups: Vec<(Weekday, Group<'_>)> = Weekday::ALL
        .iter()
        .map(|&wd| (wd, Group::select(records, |r| r.features.day_of_week == wd.index())))
        .collect();

    let stats: Vec<DayStats> = groups
        .iter()
        .map(|(wd, g)| DayStats {
            day_of_week: wd.index(),
            name: wd.name().to_string(),
            local_name: wd.local_name().to_string(),
            count: g.len(),
            calories: g.intake().into_iter().collect::<Statistics>().summary(),
            exercise: g.exercise().into_iter().collect::<Statistics>().summary(),
        })
        .collect();
    debug!(
        counts = ?stats.iter().map(|d| d.count).collect::<Vec<_>>(),
        "day-of-week groups"
    );

    let mut best: Option<(usize, f64)> = None;
    let mut worst: Option<(usize, f64)> = None;
    for (i, day) in stats.iter().enumerate() {
        let Some(mean) = day.calories.filter(|_| day.participates(MIN_GROUP_SIZE)).map(|c| c.mean)
        else {
            continue;
        };
        if best.map_or(true, |(_, m)| mean < m) {
            best = Some((i, mean));
        }
        if worst.map_or(true, |(_, m)| mean > m) {
            worst = Some((i, mean));
        }
    }
    let participating = stats.iter().filter(|d| d.participates(MIN_GROUP_SIZE)).count();

    let (Some((bi, best_mean)), Some((wi, worst_mean)), true) = (best, worst, participating >= 2)
    else {
        let reason = format!(
            "insufficient data for day-of-week comparison: need ≥2 days with ≥{MIN_GROUP_SIZE} \
             records each, have {participating}"
        );
        warn!(days, participating, "day-of-week pattern skipped");
        return Ok(DayOfWeekPattern {
            detected: false,
            status: PatternStatus::InsufficientData,
            summary: format!("No day-of-week pattern: {reason}."),
            reason: Some(reason),
            period_days: days,
            days: stats,
            best_day: None,
            worst_day: None,
            test: None,
        });
    };

    let test = welch_t_test(&groups[wi].1.intake(), &groups[bi].1.intake())?;
    let status = PatternStatus::from_test(Some(&test));
    let best_day = DayRef::new(groups[bi].0, best_mean);
    let worst_day = DayRef::new(groups[wi].0, worst_mean);

    let significance = if test.significant {
        "statistically significant"
    } else {
        "not statistically significant"
    };
    let summary = format!(
        "Best day: {} ({:.0} kcal avg). Worst day: {} ({:.0} kcal avg). \
         Difference: {:.0} kcal ({significance}, {}).",
        best_day.name,
        best_mean,
        worst_day.name,
        worst_mean,
        worst_mean - best_mean,
        format_p(test.p_value)
    );

    info!(
        days,
        best = best_day.name.as_str(),
        worst = worst_day.name.as_str(),
        %status,
        "day-of-week pattern evaluated"
    );
    Ok(DayOfWeekPattern {
        detected: true,
        status,
        reason: None,
        period_days: days,
        days: stats,
        best_day: Some(best_day),
        worst_day: Some(worst_day),
        test: Some(test),
        summary,
    })
}
