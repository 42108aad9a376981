//! `HolidayCalendar` trait and the [`HolidayEntry`] record.
//!
//! A holiday calendar knows the public holidays of each year.  Everything
//! else (weekend/holiday lookups, long-weekend detection, distances to the
//! surrounding holidays) is derived from that one listing by the trait's
//! provided methods.

use std::ops::RangeInclusive;

use dt_core::errors::{Error, Result};
use dt_core::fail;
use serde::{Deserialize, Serialize};

use crate::date::Date;

/// A single public holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayEntry {
    /// The day the holiday falls on.
    pub date: Date,
    /// Canonical (English) name.
    pub name: String,
    /// Name in the calendar's own language.
    pub local_name: String,
    /// Whether the date moves from year to year (Easter-based).
    pub is_moveable: bool,
}

/// A calendar of public holidays.
pub trait HolidayCalendar: std::fmt::Debug + Send + Sync {
    /// Human-readable name (e.g. `"Poland"`).
    fn name(&self) -> &str;

    /// Years for which [`get_holidays`](Self::get_holidays) is defined.
    fn supported_years(&self) -> RangeInclusive<i32>;

    /// All holidays of `year`, sorted by date, without range checking.
    ///
    /// Implementations compute this from pure date arithmetic.  Lookups for
    /// individual dates go through this method so that queries near the edge
    /// of the supported span can still see the neighbouring year.
    fn holidays_for_year(&self, year: i32) -> Result<Vec<HolidayEntry>>;

    /// All holidays of `year`, sorted by date.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `year` is outside
    /// [`supported_years`](Self::supported_years).
    fn get_holidays(&self, year: i32) -> Result<Vec<HolidayEntry>> {
        let span = self.supported_years();
        if !span.contains(&year) {
            return Err(Error::OutOfRange(format!(
                "{} calendar supports years {}-{}, got {year}",
                self.name(),
                span.start(),
                span.end()
            )));
        }
        self.holidays_for_year(year)
    }

    /// The holiday falling on `date`, if any.
    fn holiday(&self, date: Date) -> Option<HolidayEntry> {
        self.holidays_for_year(date.year())
            .ok()?
            .into_iter()
            .find(|h| h.date == date)
    }

    /// Return `true` if `date` is a public holiday.
    fn is_holiday(&self, date: Date) -> bool {
        self.holiday(date).is_some()
    }

    /// Canonical name of the holiday on `date`, if any.
    fn holiday_name(&self, date: Date) -> Option<String> {
        self.holiday(date).map(|h| h.name)
    }

    /// Return `true` if `date` is a Saturday or Sunday.
    fn is_weekend(&self, date: Date) -> bool {
        date.weekday().is_weekend()
    }

    /// Return `true` if `date` is a non-working day (weekend or holiday).
    fn is_off_day(&self, date: Date) -> bool {
        self.is_weekend(date) || self.is_holiday(date)
    }

    /// Return `true` if `date` is a working day squeezed between two
    /// non-working days (the Friday after a Thursday holiday, the Monday
    /// before a Tuesday holiday).
    fn is_bridge_day(&self, date: Date) -> bool {
        !self.is_off_day(date) && self.is_off_day(date - 1) && self.is_off_day(date + 1)
    }

    /// The long weekend containing `date`, as an inclusive `(start, end)`.
    ///
    /// A long weekend is a maximal run of non-working and bridge days that
    /// is at least three days long and contains at least one holiday.
    fn long_weekend_span(&self, date: Date) -> Option<(Date, Date)> {
        let in_break = |d: Date| self.is_off_day(d) || self.is_bridge_day(d);
        if !in_break(date) {
            return None;
        }
        let mut start = date;
        while in_break(start - 1) {
            start -= 1;
        }
        let mut end = date;
        while in_break(end + 1) {
            end += 1;
        }
        let has_holiday = start.days_through(end).any(|d| self.is_holiday(d));
        (end - start + 1 >= 3 && has_holiday).then_some((start, end))
    }

    /// Return `true` if `date` is part of a long weekend.
    fn is_long_weekend(&self, date: Date) -> bool {
        self.long_weekend_span(date).is_some()
    }

    /// Holidays in `[from, to]`, sorted by date.
    fn holidays_between(&self, from: Date, to: Date) -> Result<Vec<HolidayEntry>> {
        let mut out = Vec::new();
        for year in from.year()..=to.year() {
            out.extend(
                self.holidays_for_year(year)?
                    .into_iter()
                    .filter(|h| h.date >= from && h.date <= to),
            );
        }
        Ok(out)
    }

    /// Days from `date` to the first holiday strictly after it.
    fn days_to_next_holiday(&self, date: Date) -> Result<u32> {
        for year in [date.year(), date.year() + 1] {
            if let Some(next) = self
                .holidays_for_year(year)?
                .into_iter()
                .find(|h| h.date > date)
            {
                return Ok((next.date - date) as u32);
            }
        }
        fail!("{} calendar has no holiday after {date}", self.name());
    }

    /// Days from the last holiday strictly before `date` to `date`.
    fn days_since_last_holiday(&self, date: Date) -> Result<u32> {
        for year in [date.year(), date.year() - 1] {
            if let Some(last) = self
                .holidays_for_year(year)?
                .into_iter()
                .rev()
                .find(|h| h.date < date)
            {
                return Ok((date - last.date) as u32);
            }
        }
        fail!("{} calendar has no holiday before {date}", self.name());
    }
}

/// A calendar with no holidays at all; only weekends are days off.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendsOnly;

impl HolidayCalendar for WeekendsOnly {
    fn name(&self) -> &str {
        "Weekends Only"
    }

    fn supported_years(&self) -> RangeInclusive<i32> {
        i32::MIN..=i32::MAX
    }

    fn holidays_for_year(&self, _year: i32) -> Result<Vec<HolidayEntry>> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn weekends_only_has_no_long_weekends() {
        let cal = WeekendsOnly;
        // 2023-09-02 is a Saturday
        assert!(cal.is_off_day(date(2023, 9, 2)));
        assert!(!cal.is_holiday(date(2023, 9, 2)));
        assert!(!cal.is_long_weekend(date(2023, 9, 2)));
        assert!(!cal.is_bridge_day(date(2023, 9, 4)));
    }

    #[test]
    fn weekends_only_has_no_distances() {
        let cal = WeekendsOnly;
        assert!(matches!(
            cal.days_to_next_holiday(date(2023, 9, 2)),
            Err(Error::Runtime(_))
        ));
        assert!(cal.holidays_between(date(2023, 1, 1), date(2023, 12, 31)).unwrap().is_empty());
    }
}
