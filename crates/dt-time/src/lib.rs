//! # dt-time
//!
//! Date, weekday, and holiday calendar types.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `HolidayCalendar` trait and the `HolidayEntry` record.
pub mod calendar;

/// Concrete holiday calendars (country specific).
pub mod calendars;

/// `Date` type.
pub mod date;

/// Gregorian Easter computation.
pub mod easter;

/// `Weekday`, the day of the week.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use calendar::{HolidayCalendar, HolidayEntry, WeekendsOnly};
pub use calendars::PolishHolidayCalendar;
pub use date::Date;
pub use easter::easter_sunday;
pub use weekday::Weekday;
