//! Analysis configuration.
//!
//! [`AnalysisConfig`] carries the reference ("today") date, the lookback
//! defaults and the basal metabolic rate used by the derived metrics.  It is
//! plain data passed to the engines at construction; there is no
//! process-wide state.  The significance threshold is fixed at
//! [`SIGNIFICANCE_LEVEL`](dt_math::SIGNIFICANCE_LEVEL) and is not part of
//! the configuration.

use dt_core::errors::{Error, Result};
use dt_core::{ensure, Kcal};
use dt_time::Date;
use serde::{Deserialize, Serialize};

/// Settings shared by every analysis call of an engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Last day of every analysis window.  `None` means the local date at
    /// the time of the call.
    pub as_of: Option<Date>,
    /// Lookback of the comprehensive analysis when the caller gives none.
    pub default_days: u32,
    /// Upper bound for the extended holiday lookback of the comprehensive
    /// analysis.
    pub holiday_max_days: u32,
    /// Basal metabolic rate subtracted from intake in the derived metrics.
    pub bmr_kcal: Kcal,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            as_of: None,
            default_days: 90,
            holiday_max_days: 180,
            bmr_kcal: 2000.0,
        }
    }
}

impl AnalysisConfig {
    /// Parse a TOML document; missing keys take their defaults.
    ///
    /// ```
    /// use dt_patterns::AnalysisConfig;
    /// let cfg = AnalysisConfig::from_toml_str("as_of = \"2026-03-31\"\ndefault_days = 60").unwrap();
    /// assert_eq!(cfg.default_days, 60);
    /// assert_eq!(cfg.holiday_max_days, 180);
    /// assert_eq!(cfg.bmr_kcal, 2000.0);
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(s).map_err(|e| Error::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Fix the reference date.
    pub fn with_as_of(mut self, date: Date) -> Self {
        self.as_of = Some(date);
        self
    }

    /// Set the basal metabolic rate.
    pub fn with_bmr(mut self, kcal: Kcal) -> Self {
        self.bmr_kcal = kcal;
        self
    }

    /// Check that the lookbacks and the metabolic rate are usable.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.default_days >= 1, "default_days must be at least 1");
        ensure!(self.holiday_max_days >= 1, "holiday_max_days must be at least 1");
        ensure!(
            self.bmr_kcal.is_finite() && self.bmr_kcal >= 0.0,
            "bmr_kcal must be a non-negative number, got {}",
            self.bmr_kcal
        );
        Ok(())
    }

    /// The last day of the analysis window.
    pub fn reference_date(&self) -> Date {
        self.as_of.unwrap_or_else(Date::today)
    }

    /// The window `[as_of - days, as_of]`.
    ///
    /// # Errors
    /// [`Error::Precondition`] if `days` is 0.
    pub fn window(&self, days: u32) -> Result<(Date, Date)> {
        ensure!(days >= 1, "analysis window must be at least 1 day, got {days}");
        let until = self.reference_date();
        let since = until.add_days(-i64::from(days))?;
        Ok((since, until))
    }

    /// Lookback for holiday detection inside a comprehensive analysis of
    /// `days`: twice the window, capped at `holiday_max_days`.
    ///
    /// The cap applies even when it is shorter than `days` itself, so a
    /// yearly analysis under the default cap looks at the last 180 days.
    pub fn holiday_window(&self, days: u32) -> u32 {
        days.saturating_mul(2).min(self.holiday_max_days)
    }
}
