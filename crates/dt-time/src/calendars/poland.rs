//! Poland calendar.

use std::ops::RangeInclusive;

use dt_core::errors::Result;

use crate::calendar::{HolidayCalendar, HolidayEntry};
use crate::date::Date;
use crate::easter::easter_sunday;

/// Fixed-date holidays: (month, day, name, Polish name).
const FIXED: [(u32, u32, &str, &str); 9] = [
    (1, 1, "New Year's Day", "Nowy Rok"),
    (1, 6, "Epiphany", "Trzech Króli"),
    (5, 1, "Labour Day", "Święto Pracy"),
    (5, 3, "Constitution Day", "Święto Konstytucji 3 Maja"),
    (8, 15, "Assumption of Mary", "Wniebowzięcie NMP"),
    (11, 1, "All Saints' Day", "Wszystkich Świętych"),
    (11, 11, "Independence Day", "Święto Niepodległości"),
    (12, 25, "Christmas Day", "Boże Narodzenie"),
    (12, 26, "Second Day of Christmas", "Drugi Dzień Bożego Narodzenia"),
];

/// Easter-based holidays: (days after Easter Sunday, name, Polish name).
const MOVEABLE: [(i64, &str, &str); 4] = [
    (0, "Easter Sunday", "Wielkanoc"),
    (1, "Easter Monday", "Poniedziałek Wielkanocny"),
    (49, "Pentecost", "Zielone Świątki"),
    (60, "Corpus Christi", "Boże Ciało"),
];

/// Polish national holidays.
///
/// The following holidays are observed:
/// * New Year's Day (Jan 1)
/// * Epiphany (Jan 6, since 2011)
/// * Easter Sunday and Easter Monday
/// * Labour Day (May 1)
/// * Constitution Day (May 3)
/// * Pentecost (Easter + 49)
/// * Corpus Christi (Easter + 60)
/// * Assumption of Mary (Aug 15)
/// * All Saints' Day (Nov 1)
/// * Independence Day (Nov 11)
/// * Christmas Day (Dec 25) and the Second Day of Christmas (Dec 26)
///
/// [`get_holidays`](HolidayCalendar::get_holidays) is defined for 2020–2030;
/// per-date lookups apply the same rules to any year.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolishHolidayCalendar;

impl PolishHolidayCalendar {
    /// First and last year of the supported span.
    pub const SUPPORTED_YEARS: RangeInclusive<i32> = 2020..=2030;
}

impl HolidayCalendar for PolishHolidayCalendar {
    fn name(&self) -> &str {
        "Poland"
    }

    fn supported_years(&self) -> RangeInclusive<i32> {
        Self::SUPPORTED_YEARS
    }

    fn holidays_for_year(&self, year: i32) -> Result<Vec<HolidayEntry>> {
        let mut out = Vec::with_capacity(FIXED.len() + MOVEABLE.len());
        for (m, d, name, local) in FIXED {
            // Epiphany was restored as a public holiday in 2011
            if (m, d) == (1, 6) && year < 2011 {
                continue;
            }
            out.push(HolidayEntry {
                date: Date::from_ymd(year, m, d)?,
                name: name.to_string(),
                local_name: local.to_string(),
                is_moveable: false,
            });
        }
        let easter = easter_sunday(year)?;
        for (offset, name, local) in MOVEABLE {
            out.push(HolidayEntry {
                date: easter.add_days(offset)?,
                name: name.to_string(),
                local_name: local.to_string(),
                is_moveable: true,
            });
        }
        out.sort_by_key(|h| h.date);
        Ok(out)
    }
}
