//! Derived body-composition and energy-balance metrics.
//!
//! [`MetricsEngine`] reads a window of entries from a [`RecordStore`] and
//! derives, per entry:
//!
//! - fat and lean mass from weight and body fat,
//! - the net energy balance `intake - BMR - exercise`,
//! - trailing 7, 14 and 30-entry averages of weight and net balance.
//!
//! [`MetricsEngine::summary_stats`] condenses a window into a
//! [`MetricsSummary`].  Rolling averages are taken over entries, not calendar
//! days, and need [`MIN_ROLLING_COVERAGE`] of their window to hold a value.

use dt_core::errors::Result;
use dt_core::{Kcal, Percent, Real};
use dt_math::Statistics;
use dt_time::Date;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::entry::DailyEntry;
use crate::store::{fetch_validated, RecordStore};

/// Window lengths, in entries, of the rolling averages.
pub const ROLLING_WINDOWS: [usize; 3] = [7, 14, 30];

/// Fraction of a rolling window that must hold values for an average.
pub const MIN_ROLLING_COVERAGE: Real = 0.7;

/// Trailing averages over the last 7, 14 and 30 entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RollingAverages {
    /// Over the last 7 entries.
    pub avg_7d: Option<Real>,
    /// Over the last 14 entries.
    pub avg_14d: Option<Real>,
    /// Over the last 30 entries.
    pub avg_30d: Option<Real>,
}

/// One entry with its derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetrics {
    /// The stored measurements.
    #[serde(flatten)]
    pub entry: DailyEntry,
    /// `weight * bodyfat / 100`.
    pub fat_mass_kg: Option<Real>,
    /// `weight - fat_mass`.
    pub lean_mass_kg: Option<Real>,
    /// `intake - bmr - exercise`; `None` without an intake.
    pub net_kcal: Option<Kcal>,
    /// Rolling averages of the body weight.
    pub weight_avg_kg: RollingAverages,
    /// Rolling averages of the net balance.
    pub net_avg_kcal: RollingAverages,
}

/// Weight over a window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightSummary {
    /// Latest recorded weight.
    pub current_kg: Real,
    /// Earliest recorded weight.
    pub start_kg: Real,
    /// `current_kg - start_kg`.
    pub change_kg: Real,
    /// Mean weight.
    pub avg_kg: Real,
    /// Lowest weight.
    pub min_kg: Real,
    /// Highest weight.
    pub max_kg: Real,
    /// Sample standard deviation; `None` for a single weigh-in.
    pub std_dev_kg: Option<Real>,
}

/// Summary statistics of a window of derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    /// Lookback of the window in days.
    pub period_days: u32,
    /// `min(entries / period_days * 100, 100)`.
    pub data_coverage_pct: Percent,
    /// `None` when no entry has a weight.
    pub weight: Option<WeightSummary>,
    /// Latest recorded body fat.
    pub bodyfat_current_pct: Option<Percent>,
    /// Mean body fat.
    pub bodyfat_avg_pct: Option<Percent>,
    /// Latest fat mass.
    pub fat_mass_current_kg: Option<Real>,
    /// Mean fat mass.
    pub fat_mass_avg_kg: Option<Real>,
    /// Mean net balance.
    pub net_avg_kcal: Option<Kcal>,
    /// Mean intake.
    pub cal_in_avg_kcal: Option<Kcal>,
    /// Mean recorded exercise.
    pub cal_out_sport_avg_kcal: Option<Kcal>,
    /// Basal metabolic rate used for the net balance.
    pub bmr_kcal: Kcal,
    /// `bmr_kcal` plus mean exercise.
    pub cal_out_total_avg_kcal: Kcal,
    /// 7-entry weight average at the end of the window.
    pub weight_7d_avg_kg: Option<Real>,
    /// 14-entry weight average at the end of the window.
    pub weight_14d_avg_kg: Option<Real>,
}

/// Fat and lean mass in kg, when both weight and body fat are known.
pub fn body_composition(weight_kg: Option<Real>, bodyfat_pct: Option<Percent>) -> Option<(Real, Real)> {
    let (w, bf) = (weight_kg?, bodyfat_pct?);
    let fat = w * bf / 100.0;
    Some((fat, w - fat))
}

/// Net energy balance of `entry`: intake minus `bmr_kcal` minus exercise.
pub fn net_energy(entry: &DailyEntry, bmr_kcal: Kcal) -> Option<Kcal> {
    entry.cal_in_kcal.map(|i| i - bmr_kcal - entry.exercise_kcal())
}

/// Values required inside a rolling window of `window` entries.
pub fn min_periods(window: usize) -> usize {
    ((window as Real * MIN_ROLLING_COVERAGE) as usize).max(1)
}

/// Trailing mean over the last `window` positions at each position.
///
/// A position gets a mean only when at least [`min_periods`]`(window)` of
/// the values in its window are present.
pub fn rolling_mean(values: &[Option<Real>], window: usize) -> Vec<Option<Real>> {
    let required = min_periods(window);
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let s: Statistics = values[start..=i].iter().flatten().copied().collect();
            if s.samples() >= required {
                s.mean()
            } else {
                None
            }
        })
        .collect()
}

fn rolling_averages(values: &[Option<Real>]) -> Vec<RollingAverages> {
    let [w7, w14, w30] = ROLLING_WINDOWS.map(|w| rolling_mean(values, w));
    (0..values.len())
        .map(|i| RollingAverages {
            avg_7d: w7[i],
            avg_14d: w14[i],
            avg_30d: w30[i],
        })
        .collect()
}

/// Derive the metrics of `entries`, ordered by date.
pub fn compute_metrics(entries: &[DailyEntry], bmr_kcal: Kcal) -> Vec<DailyMetrics> {
    let mut entries = entries.to_vec();
    entries.sort_by_key(|e| e.date);

    let weights: Vec<Option<Real>> = entries.iter().map(|e| e.weight_kg).collect();
    let nets: Vec<Option<Kcal>> = entries.iter().map(|e| net_energy(e, bmr_kcal)).collect();
    let weight_avg = rolling_averages(&weights);
    let net_avg = rolling_averages(&nets);

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let composition = body_composition(entry.weight_kg, entry.bodyfat_pct);
            DailyMetrics {
                fat_mass_kg: composition.map(|(fat, _)| fat),
                lean_mass_kg: composition.map(|(_, lean)| lean),
                net_kcal: nets[i],
                weight_avg_kg: weight_avg[i],
                net_avg_kcal: net_avg[i],
                entry,
            }
        })
        .collect()
}

/// Summarise derived metrics of a `period_days`-day window.  `None` when
/// `metrics` is empty.
pub fn summarize(metrics: &[DailyMetrics], period_days: u32, bmr_kcal: Kcal) -> Option<MetricsSummary> {
    let last = metrics.last()?;
    let recorded = |f: fn(&DailyMetrics) -> Option<Real>| metrics.iter().filter_map(f);
    let mean = |f: fn(&DailyMetrics) -> Option<Real>| recorded(f).collect::<Statistics>().mean();

    let weight_stats: Statistics = recorded(|m| m.entry.weight_kg).collect();
    let weight = match (
        recorded(|m| m.entry.weight_kg).next(),
        recorded(|m| m.entry.weight_kg).last(),
    ) {
        (Some(start), Some(current)) => Some(WeightSummary {
            current_kg: current,
            start_kg: start,
            change_kg: current - start,
            avg_kg: weight_stats.mean()?,
            min_kg: weight_stats.minimum()?,
            max_kg: weight_stats.maximum()?,
            std_dev_kg: weight_stats.std_dev(),
        }),
        _ => None,
    };

    let cal_out_sport_avg_kcal = mean(|m| m.entry.cal_out_sport_kcal);
    Some(MetricsSummary {
        period_days,
        data_coverage_pct: if period_days == 0 {
            0.0
        } else {
            (metrics.len() as Real / f64::from(period_days) * 100.0).min(100.0)
        },
        weight,
        bodyfat_current_pct: recorded(|m| m.entry.bodyfat_pct).last(),
        bodyfat_avg_pct: mean(|m| m.entry.bodyfat_pct),
        fat_mass_current_kg: recorded(|m| m.fat_mass_kg).last(),
        fat_mass_avg_kg: mean(|m| m.fat_mass_kg),
        net_avg_kcal: mean(|m| m.net_kcal),
        cal_in_avg_kcal: mean(|m| m.entry.cal_in_kcal),
        cal_out_sport_avg_kcal,
        bmr_kcal,
        cal_out_total_avg_kcal: bmr_kcal + cal_out_sport_avg_kcal.unwrap_or(0.0),
        weight_7d_avg_kg: last.weight_avg_kg.avg_7d,
        weight_14d_avg_kg: last.weight_avg_kg.avg_14d,
    })
}

/// Computes derived metrics of stored entries.
#[derive(Debug, Clone)]
pub struct MetricsEngine<S> {
    store: S,
    config: AnalysisConfig,
}

impl<S: RecordStore> MetricsEngine<S> {
    /// An engine over `store` with the default configuration.
    pub fn new(store: S) -> Self {
        Self {
            store,
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

    /// Derived metrics of the entries within `[since, until]`.
    ///
    /// # Errors
    /// [`Error::Validation`](dt_core::Error::Validation) for a malformed
    /// entry, or any error of the store.
    pub fn metrics_between(&self, since: Date, until: Date) -> Result<Vec<DailyMetrics>> {
        let entries = fetch_validated(&self.store, since, until)?;
        debug!(%since, %until, records = entries.len(), "fetched metrics window");
        Ok(compute_metrics(&entries, self.config.bmr_kcal))
    }

    /// Derived metrics of the trailing `days`-day window.
    ///
    /// # Errors
    /// [`Error::Precondition`](dt_core::Error::Precondition) if `days` is 0,
    /// otherwise as [`metrics_between`](Self::metrics_between).
    pub fn metrics(&self, days: u32) -> Result<Vec<DailyMetrics>> {
        let (since, until) = self.config.window(days)?;
        self.metrics_between(since, until)
    }

    /// Summary statistics of the trailing `days`-day window, or `None`
    /// when the window holds no entries.
    pub fn summary_stats(&self, days: u32) -> Result<Option<MetricsSummary>> {
        let metrics = self.metrics(days)?;
        Ok(summarize(&metrics, days, self.config.bmr_kcal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn composition_needs_weight_and_bodyfat() {
        let (fat, lean) = body_composition(Some(85.0), Some(20.0)).unwrap();
        assert_abs_diff_eq!(fat, 17.0, epsilon = 1e-9);
        assert_abs_diff_eq!(lean, 68.0, epsilon = 1e-9);
        assert!(body_composition(Some(85.0), None).is_none());
        assert!(body_composition(None, Some(20.0)).is_none());
    }

    #[test]
    fn net_energy_subtracts_bmr_and_exercise() {
        let d = date(2026, 1, 7);
        let e = DailyEntry::new(d).with_calories_in(2000.0).with_exercise(400.0);
        assert_eq!(net_energy(&e, 2000.0), Some(-400.0));
        assert_eq!(net_energy(&DailyEntry::new(d).with_calories_in(2300.0), 1800.0), Some(500.0));
        assert_eq!(net_energy(&DailyEntry::new(d).with_exercise(300.0), 2000.0), None);
    }

    #[test]
    fn minimum_periods() {
        assert_eq!(min_periods(7), 4);
        assert_eq!(min_periods(14), 9);
        assert_eq!(min_periods(30), 21);
        assert_eq!(min_periods(1), 1);
    }

    #[test]
    fn rolling_mean_needs_coverage() {
        let values: Vec<_> = (1..=10).map(|x| Some(f64::from(x))).collect();
        let r = rolling_mean(&values, 7);
        assert_eq!(&r[..3], &[None, None, None]);
        assert_eq!(r[3], Some(2.5));
        assert_eq!(r[6], Some(4.0));
        assert_eq!(r[9], Some(7.0));

        let sparse = [Some(1.0), None, None, None, None, None, Some(3.0)];
        assert!(rolling_mean(&sparse, 7).iter().all(Option::is_none));
    }

    #[test]
    fn metrics_are_ordered_by_date() {
        let entries = [
            DailyEntry::new(date(2026, 1, 3)).with_weight(84.0),
            DailyEntry::new(date(2026, 1, 1)).with_weight(86.0).with_bodyfat(20.0),
        ];
        let m = compute_metrics(&entries, 2000.0);
        assert_eq!(m[0].entry.date, date(2026, 1, 1));
        assert_abs_diff_eq!(m[0].fat_mass_kg.unwrap(), 17.2, epsilon = 1e-9);
        assert!(m[1].fat_mass_kg.is_none());
        assert!(m[1].net_kcal.is_none());
    }

    #[test]
    fn summary_uses_recorded_values() {
        let entries = [
            DailyEntry::new(date(2026, 1, 1)).with_weight(86.0).with_bodyfat(21.0),
            DailyEntry::new(date(2026, 1, 2)).with_calories_in(2200.0),
            DailyEntry::new(date(2026, 1, 3)).with_weight(85.0).with_calories_in(1800.0).with_exercise(200.0),
        ];
        let m = compute_metrics(&entries, 2000.0);
        let s = summarize(&m, 10, 2000.0).unwrap();
        let w = s.weight.unwrap();
        assert_eq!((w.start_kg, w.current_kg, w.change_kg), (86.0, 85.0, -1.0));
        assert_eq!((w.min_kg, w.max_kg), (85.0, 86.0));
        assert_eq!(s.bodyfat_current_pct, Some(21.0));
        assert_abs_diff_eq!(s.net_avg_kcal.unwrap(), -100.0, epsilon = 1e-9);
        assert_eq!(s.cal_out_sport_avg_kcal, Some(200.0));
        assert_eq!(s.cal_out_total_avg_kcal, 2200.0);
        assert_abs_diff_eq!(s.data_coverage_pct, 30.0, epsilon = 1e-9);
        assert!(s.weight_7d_avg_kg.is_none());
        assert!(summarize(&[], 10, 2000.0).is_none());
    }
}
