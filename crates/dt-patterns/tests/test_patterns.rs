//! Integration tests for the pattern detection engine.
//!
//! Every scenario pins the reference date so results do not depend on the
//! day the suite runs.

use approx::assert_abs_diff_eq;
use dt_patterns::{
    AnalysisConfig, DailyEntry, InMemoryStore, PatternDetectionEngine, PatternStatus,
    TemporalFeatureEngine,
};
use dt_core::Error;
use dt_time::{Date, HolidayCalendar, PolishHolidayCalendar, WeekendsOnly};
use proptest::prelude::*;

const BASE_KCAL: f64 = 2000.0;

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn config(as_of: Date) -> AnalysisConfig {
    AnalysisConfig::default().with_as_of(as_of)
}

/// `n` consecutive days ending at `as_of`, intake from `kcal`.
fn store_with(as_of: Date, n: i64, kcal: impl Fn(Date) -> f64) -> InMemoryStore {
    InMemoryStore::from_entries((0..n).map(|i| {
        let d = as_of - i;
        DailyEntry::new(d).with_calories_in(kcal(d)).with_exercise(250.0)
    }))
    .unwrap()
}

#[test]
fn weekend_surplus_is_detected_and_significant() {
    let as_of = date(2026, 3, 31);
    let store = store_with(as_of, 60, |d| {
        if d.weekday().is_weekend() {
            BASE_KCAL + 500.0
        } else {
            BASE_KCAL
        }
    });
    let engine = PatternDetectionEngine::new(store).with_config(config(as_of));
    let p = engine.detect_weekend_pattern(59).unwrap();

    assert!(p.detected);
    assert_eq!(p.status, PatternStatus::Significant);
    assert_eq!(p.weekend_days + p.weekday_days, 60);
    let c = p.calories.as_ref().unwrap();
    assert_abs_diff_eq!(c.difference, 500.0, epsilon = 1e-9);
    assert_abs_diff_eq!(c.difference_pct.unwrap(), 25.0, epsilon = 1e-9);
    let t = c.test.unwrap();
    assert!(t.significant && t.p_value < 0.05);
    assert!(p.summary.starts_with("Weekend calorie intake is 500 kcal (25.0%) higher than weekdays"));
    assert!(p.summary.contains("statistically significant"));
}

#[test]
fn noisy_weekend_surplus_is_significant() {
    let as_of = date(2026, 3, 31);
    let store = store_with(as_of, 60, |d| {
        let noise = f64::from(d.day_of_month() % 5) * 40.0 - 80.0;
        let base = if d.weekday().is_weekend() { BASE_KCAL + 500.0 } else { BASE_KCAL };
        base + noise
    });
    let engine = PatternDetectionEngine::with_calendar(store, WeekendsOnly).with_config(config(as_of));
    let p = engine.detect_weekend_pattern(59).unwrap();
    assert!(p.detected);
    let c = p.calories.unwrap();
    assert!((c.difference - 500.0).abs() < 60.0);
    assert!(c.is_significant());
    assert!(c.test.unwrap().t_statistic.is_finite());
}

#[test]
fn one_day_per_group_is_insufficient() {
    let as_of = date(2026, 3, 16); // Monday
    let store = InMemoryStore::from_entries([
        DailyEntry::new(as_of - 1).with_calories_in(2400.0),
        DailyEntry::new(as_of).with_calories_in(2000.0),
    ])
    .unwrap();
    let engine = PatternDetectionEngine::new(store).with_config(config(as_of));
    let p = engine.detect_weekend_pattern(30).unwrap();

    assert!(!p.detected);
    assert_eq!(p.status, PatternStatus::InsufficientData);
    assert_eq!(
        p.reason.as_deref(),
        Some(
            "insufficient data for weekend comparison: need ≥2 days per group, \
             have weekend=1, weekday=1"
        )
    );
    assert!(p.calories.is_none());
}

/// Sat 14 .. Wed 18 March 2026 with the Sunday intake replaced by `sunday`.
fn five_days_with_sunday(sunday: f64) -> PatternDetectionEngine<InMemoryStore> {
    let sat = date(2026, 3, 14);
    let store = InMemoryStore::from_entries([
        DailyEntry::new(sat).with_calories_in(2400.0),
        DailyEntry::new(sat + 1).with_calories_in(sunday),
        DailyEntry::new(sat + 2).with_calories_in(2000.0),
        DailyEntry::new(sat + 3).with_calories_in(2050.0),
        DailyEntry::new(sat + 4).with_calories_in(1950.0),
    ])
    .unwrap();
    PatternDetectionEngine::new(store).with_config(config(sat + 4))
}

#[test]
fn nan_intake_in_store_is_a_validation_error() {
    let engine = five_days_with_sunday(f64::NAN);
    assert!(matches!(
        engine.detect_weekend_pattern(4),
        Err(Error::Validation { index: 1, .. })
    ));
    assert!(matches!(
        engine.get_comprehensive_analysis(4),
        Err(Error::Validation { .. })
    ));
}

#[test]
fn negative_intake_in_store_is_a_validation_error() {
    let engine = five_days_with_sunday(-50_000.0);
    let err = engine.detect_weekend_pattern(4).unwrap_err();
    assert!(matches!(err, Error::Validation { index: 1, .. }));
    assert!(err.to_string().contains("cal_in_kcal must be a non-negative number"));
    assert!(engine.detect_day_of_week_pattern(4).is_err());
}

#[test]
fn valid_sunday_makes_the_same_window_comparable() {
    let p = five_days_with_sunday(2600.0).detect_weekend_pattern(4).unwrap();
    assert!(p.detected);
    assert_abs_diff_eq!(p.calories.unwrap().difference, 500.0, epsilon = 1e-9);
}

#[test]
fn empty_store_reports_insufficient_data_everywhere() {
    let engine = PatternDetectionEngine::new(InMemoryStore::new())
        .with_config(config(date(2026, 3, 31)));
    let a = engine.get_comprehensive_analysis(90).unwrap();
    assert_eq!(a.weekend_pattern.status, PatternStatus::InsufficientData);
    assert_eq!(a.holiday_pattern.status, PatternStatus::InsufficientData);
    assert_eq!(a.day_of_week_pattern.status, PatternStatus::InsufficientData);
    assert_eq!(a.temporal_summary.total_days, 0);
    assert_eq!(a.temporal_summary.coverage_pct, 0.0);
}

#[test]
fn tuesday_best_saturday_worst() {
    let as_of = date(2026, 3, 29);
    let store = store_with(as_of, 28, |d| {
        let by_day = [2100.0, 1700.0, 2000.0, 2050.0, 2200.0, 2900.0, 2400.0];
        by_day[usize::from(d.weekday().index())] + f64::from(d.day_of_month() % 2) * 20.0
    });
    let engine = PatternDetectionEngine::new(store).with_config(config(as_of));
    let p = engine.detect_day_of_week_pattern(27).unwrap();

    assert!(p.detected);
    let best = p.best_day.as_ref().unwrap();
    let worst = p.worst_day.as_ref().unwrap();
    assert_eq!(best.name, "Tuesday");
    assert_eq!(best.local_name, "Wtorek");
    assert_eq!(worst.name, "Saturday");
    assert_eq!(worst.day_of_week, 5);
    assert_eq!(p.status, PatternStatus::Significant);
    assert!(p.summary.starts_with("Best day: Tuesday"));
}

#[test]
fn holiday_pattern_over_easter_and_may() {
    // Easter 2026 is April 5; the May holidays are May 1 and May 3
    let as_of = date(2026, 5, 10);
    let cal = PolishHolidayCalendar;
    let store = store_with(as_of, 60, |d| {
        if cal.is_holiday(d) {
            3000.0 + f64::from(d.day_of_month())
        } else {
            BASE_KCAL + f64::from(d.day_of_month() % 3) * 10.0
        }
    });
    let engine = PatternDetectionEngine::new(store).with_config(config(as_of));
    let p = engine.detect_holiday_pattern(59).unwrap();

    assert!(p.detected);
    assert_eq!(p.holiday_days, 4);
    assert_eq!(
        p.holidays_observed,
        ["Easter Sunday", "Easter Monday", "Labour Day", "Constitution Day"]
    );
    let window: Vec<_> = p.holidays_in_window.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(window, ["Easter Sunday", "Easter Monday", "Labour Day", "Constitution Day"]);
    assert_eq!(p.status, PatternStatus::Significant);
    assert!(p.long_weekends.is_some());
}

#[test]
fn comprehensive_analysis_has_every_part() {
    let as_of = date(2026, 6, 30);
    let store = store_with(as_of, 200, |d| BASE_KCAL + f64::from(d.day_of_year() % 7) * 15.0);
    let engine = PatternDetectionEngine::new(store).with_config(config(as_of));
    let a = engine.get_comprehensive_analysis(60).unwrap();

    assert_eq!(a.weekend_pattern.period_days, 60);
    assert_eq!(a.holiday_pattern.period_days, 120);
    assert_eq!(a.day_of_week_pattern.period_days, 60);
    assert_eq!(a.day_of_week_pattern.days.len(), 7);
    assert_eq!(a.temporal_summary.calendar_days, 60);
    assert_eq!(a.temporal_summary.total_days, 61);
    assert_eq!(a.temporal_summary.coverage_pct, 100.0);

    let json = serde_json::to_value(&a).unwrap();
    for key in ["weekend_pattern", "holiday_pattern", "day_of_week_pattern", "temporal_summary"] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert_eq!(json["weekend_pattern"]["detected"], true);
    assert_eq!(json["temporal_summary"]["coverage_pct"], 100.0);
}

#[test]
fn row_based_enrichment_matches_typed_enrichment() {
    let rows: Vec<serde_json::Map<String, serde_json::Value>> = (0..10)
        .map(|i| {
            let d = date(2026, 4, 1) + i;
            serde_json::json!({"when": d.to_string(), "cal_in_kcal": 2000 + i})
                .as_object()
                .unwrap()
                .clone()
        })
        .collect();
    let engine = TemporalFeatureEngine::new();
    let from_rows = engine.add_temporal_features(&rows, "when").unwrap();
    let typed: Vec<_> = (0..10)
        .map(|i| DailyEntry::new(date(2026, 4, 1) + i).with_calories_in((2000 + i) as f64))
        .collect();
    assert_eq!(from_rows, engine.enrich(&typed).unwrap());
    assert!(from_rows[4].features.is_holiday); // Easter Sunday
}

proptest! {
    #[test]
    fn day_of_week_counts_partition_records(
        offset in 0i64..3000,
        days in 1u32..120,
        present in proptest::collection::vec(any::<bool>(), 120),
    ) {
        let as_of = date(2020, 6, 1) + offset;
        let store = InMemoryStore::from_entries(
            present
                .iter()
                .enumerate()
                .filter(|(_, p)| **p)
                .map(|(i, _)| DailyEntry::new(as_of - i as i64).with_calories_in(1800.0 + i as f64)),
        )
        .unwrap();
        let engine = PatternDetectionEngine::new(store).with_config(config(as_of));
        let records = engine.enriched_records(days).unwrap();
        let p = engine.detect_day_of_week_pattern(days).unwrap();
        prop_assert_eq!(p.days.len(), 7);
        prop_assert_eq!(p.days.iter().map(|d| d.count).sum::<usize>(), records.len());
    }

    #[test]
    fn coverage_stays_within_bounds(n in 0i64..400, days in 1u32..365) {
        let as_of = date(2026, 12, 31);
        let store = store_with(as_of, n, |_| BASE_KCAL);
        let engine = PatternDetectionEngine::new(store).with_config(config(as_of));
        let s = engine.temporal_summary(days).unwrap();
        prop_assert!((0.0..=100.0).contains(&s.coverage_pct));
        prop_assert!(s.weekend_days + s.workweek_days <= s.total_days);
    }
}
