//! Concrete holiday calendars.

/// Polish national holidays.
pub mod poland;

pub use poland::PolishHolidayCalendar;
