//! `Date` type.
//!
//! A thin, copyable wrapper around [`chrono::NaiveDate`] exposing the
//! accessors the calendar and enrichment code need (weekday, ISO week,
//! quarter, whole-day arithmetic) with fallible constructors that report
//! through [`dt_core::Error::Date`].
//!
//! Dates serialize as ISO `YYYY-MM-DD` strings.

use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use dt_core::errors::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::weekday::Weekday;

/// A calendar date (no time of day, no time zone).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from year, month (1–12), and day-of-month (1–31).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| Error::Date(format!("{year:04}-{month:02}-{day:02} is not a valid date")))
    }

    /// Parse an ISO `YYYY-MM-DD` string.
    pub fn parse(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|e| Error::Date(format!("cannot parse {s:?} as YYYY-MM-DD: {e}")))
    }

    /// The current local date.
    pub fn today() -> Self {
        Date(chrono::Local::now().date_naive())
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month (1–12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of the month (1–31).
    pub fn day_of_month(&self) -> u32 {
        self.0.day()
    }

    /// Day of the year (1–366).
    pub fn day_of_year(&self) -> u32 {
        self.0.ordinal()
    }

    /// Quarter of the year (1–4).
    pub fn quarter(&self) -> u32 {
        (self.month() - 1) / 3 + 1
    }

    /// ISO 8601 week number (1–53).
    pub fn iso_week(&self) -> u32 {
        self.0.iso_week().week()
    }

    /// Day of the week.
    pub fn weekday(&self) -> Weekday {
        Weekday::from(self.0.weekday())
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Advance by `n` days (negative moves backwards).
    pub fn add_days(self, n: i64) -> Result<Self> {
        self.0
            .checked_add_signed(Duration::days(n))
            .map(Date)
            .ok_or_else(|| Error::Date(format!("{self} + {n} days is out of range")))
    }

    /// Number of calendar days from `self` to `other` (positive if
    /// `other > self`).
    pub fn days_between(self, other: Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Iterate over every date from `self` to `end`, both inclusive.
    ///
    /// Yields nothing when `end < self`.
    pub fn days_through(self, end: Date) -> impl Iterator<Item = Date> {
        self.0
            .iter_days()
            .take_while(move |d| *d <= end.0)
            .map(Date)
    }
}

// ── Arithmetic operators ──────────────────────────────────────────────────────

impl std::ops::Add<i64> for Date {
    type Output = Self;
    fn add(self, rhs: i64) -> Self {
        self.add_days(rhs).expect("date addition overflow")
    }
}

impl std::ops::Sub<i64> for Date {
    type Output = Self;
    fn sub(self, rhs: i64) -> Self {
        self.add_days(-rhs).expect("date subtraction underflow")
    }
}

impl std::ops::Sub<Date> for Date {
    type Output = i64;
    fn sub(self, rhs: Date) -> i64 {
        rhs.days_between(self)
    }
}

impl std::ops::AddAssign<i64> for Date {
    fn add_assign(&mut self, rhs: i64) {
        *self = *self + rhs;
    }
}

impl std::ops::SubAssign<i64> for Date {
    fn sub_assign(&mut self, rhs: i64) {
        *self = *self - rhs;
    }
}

// ── Conversions & display ─────────────────────────────────────────────────────

impl From<NaiveDate> for Date {
    fn from(d: NaiveDate) -> Self {
        Date(d)
    }
}

impl FromStr for Date {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Date::parse(s)
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Date({self})")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
