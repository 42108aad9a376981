//! `DailyEntry`: one manual diary row per calendar day.

use dt_core::errors::{Error, Result};
use dt_core::{Kcal, Real};
use dt_time::Date;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const WEIGHT_RANGE_KG: (Real, Real) = (30.0, 200.0);
const BODYFAT_RANGE_PCT: (Real, Real) = (0.0, 100.0);

fn default_source() -> String {
    "manual".to_string()
}

/// A single day's measurements.
///
/// The date is the unique key; every measured value is optional because
/// users do not always log everything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    /// Day of the measurement.
    pub date: Date,
    /// Body weight in kg.
    #[serde(default)]
    pub weight_kg: Option<Real>,
    /// Body fat percentage.
    #[serde(default)]
    pub bodyfat_pct: Option<Real>,
    /// Calorie intake.
    #[serde(default)]
    pub cal_in_kcal: Option<Kcal>,
    /// Calories burned through exercise.
    #[serde(default)]
    pub cal_out_sport_kcal: Option<Kcal>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Where the entry came from (`manual`, `import`, ...).
    #[serde(default = "default_source")]
    pub source: String,
}

impl DailyEntry {
    /// An empty manual entry for `date`.
    pub fn new(date: Date) -> Self {
        Self {
            date,
            weight_kg: None,
            bodyfat_pct: None,
            cal_in_kcal: None,
            cal_out_sport_kcal: None,
            notes: None,
            source: default_source(),
        }
    }

    /// Set the body weight.
    pub fn with_weight(mut self, kg: Real) -> Self {
        self.weight_kg = Some(kg);
        self
    }

    /// Set the body fat percentage.
    pub fn with_bodyfat(mut self, pct: Real) -> Self {
        self.bodyfat_pct = Some(pct);
        self
    }

    /// Set the calorie intake.
    pub fn with_calories_in(mut self, kcal: Kcal) -> Self {
        self.cal_in_kcal = Some(kcal);
        self
    }

    /// Set the exercise calories.
    pub fn with_exercise(mut self, kcal: Kcal) -> Self {
        self.cal_out_sport_kcal = Some(kcal);
        self
    }

    /// Attach a note.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Exercise calories, counting a missing value as zero.
    pub fn exercise_kcal(&self) -> Kcal {
        self.cal_out_sport_kcal.unwrap_or(0.0)
    }

    /// Net balance: intake minus exercise.  `None` when intake is missing.
    pub fn net_kcal(&self) -> Option<Kcal> {
        self.cal_in_kcal.map(|i| i - self.exercise_kcal())
    }

    /// Check value ranges and round weight and body fat to 0.1.
    ///
    /// `index` is the entry's position in its input sequence and is reported
    /// in the error.
    pub fn validated(mut self, index: usize) -> Result<Self> {
        if let Some(w) = self.weight_kg {
            check_range(index, "weight_kg", w, WEIGHT_RANGE_KG)?;
            self.weight_kg = Some(round1(w));
        }
        if let Some(bf) = self.bodyfat_pct {
            check_range(index, "bodyfat_pct", bf, BODYFAT_RANGE_PCT)?;
            self.bodyfat_pct = Some(round1(bf));
        }
        for (field, value) in [
            ("cal_in_kcal", self.cal_in_kcal),
            ("cal_out_sport_kcal", self.cal_out_sport_kcal),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(Error::validation(
                        index,
                        format!("{field} must be a non-negative number, got {v}"),
                    ));
                }
            }
        }
        Ok(self)
    }

    /// Build an entry from a loosely-typed row (a JSON object).
    ///
    /// The date is read from `date_field` as an ISO `YYYY-MM-DD` string;
    /// measurements are read from their canonical field names.  Any missing
    /// or malformed date and any non-numeric measurement is reported as
    /// [`Error::Validation`] naming `index`.
    pub fn from_row(index: usize, row: &Map<String, Value>, date_field: &str) -> Result<Self> {
        let date = match row.get(date_field) {
            None | Some(Value::Null) => {
                return Err(Error::validation(
                    index,
                    format!("missing date field `{date_field}`"),
                ))
            }
            Some(Value::String(s)) => {
                Date::parse(s).map_err(|e| Error::validation(index, e.to_string()))?
            }
            Some(other) => {
                return Err(Error::validation(
                    index,
                    format!("date field `{date_field}` must be a string, got {other}"),
                ))
            }
        };
        let entry = DailyEntry {
            date,
            weight_kg: number(index, row, "weight_kg")?,
            bodyfat_pct: number(index, row, "bodyfat_pct")?,
            cal_in_kcal: number(index, row, "cal_in_kcal")?,
            cal_out_sport_kcal: number(index, row, "cal_out_sport_kcal")?,
            notes: text(index, row, "notes")?,
            source: text(index, row, "source")?.unwrap_or_else(default_source),
        };
        entry.validated(index)
    }
}

fn round1(x: Real) -> Real {
    (x * 10.0).round() / 10.0
}

fn check_range(index: usize, field: &str, value: Real, (lo, hi): (Real, Real)) -> Result<()> {
    if !(lo..=hi).contains(&value) {
        return Err(Error::validation(
            index,
            format!("{field} must be within [{lo}, {hi}], got {value}"),
        ));
    }
    Ok(())
}

fn number(index: usize, row: &Map<String, Value>, field: &str) -> Result<Option<Real>> {
    match row.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(other) => Err(Error::validation(
            index,
            format!("{field} must be a number, got {other}"),
        )),
    }
}

fn text(index: usize, row: &Map<String, Value>, field: &str) -> Result<Option<String>> {
    match row.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(Error::validation(
            index,
            format!("{field} must be a string, got {other}"),
        )),
    }
}
