//! Gregorian Easter computation.

use dt_core::errors::Result;

use crate::date::Date;

/// Easter Sunday of `year` in the Gregorian calendar.
///
/// Uses the Meeus/Jones/Butcher arithmetic algorithm, valid for every
/// Gregorian year.
pub fn easter_sunday(year: i32) -> Result<Date> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    Date::from_ymd(year, month as u32, day as u32)
}
