//! `Weekday`: day-of-week enum with English and Polish names.

use serde::{Deserialize, Serialize};

/// Day of the week.
///
/// Variants are indexed 0–6 with Monday = 0 and Sunday = 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Weekday {
    /// Monday (0).
    Monday = 0,
    /// Tuesday (1).
    Tuesday = 1,
    /// Wednesday (2).
    Wednesday = 2,
    /// Thursday (3).
    Thursday = 3,
    /// Friday (4).
    Friday = 4,
    /// Saturday (5).
    Saturday = 5,
    /// Sunday (6).
    Sunday = 6,
}

impl Weekday {
    /// All seven days, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    const NAMES_EN: [&'static str; 7] = [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ];

    const NAMES_PL: [&'static str; 7] = [
        "Poniedziałek",
        "Wtorek",
        "Środa",
        "Czwartek",
        "Piątek",
        "Sobota",
        "Niedziela",
    ];

    /// Construct from the index (0 = Monday … 6 = Sunday).
    ///
    /// Returns `None` if the value is out of range.
    pub fn from_index(n: u8) -> Option<Self> {
        Self::ALL.get(n as usize).copied()
    }

    /// The index (0 = Monday … 6 = Sunday).
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Return `true` if this is Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }

    /// Return `true` if this is Monday–Friday.
    pub fn is_weekday(&self) -> bool {
        !self.is_weekend()
    }

    /// English name.
    pub fn name(&self) -> &'static str {
        Self::NAMES_EN[self.index() as usize]
    }

    /// Polish name, used as the localized display name.
    pub fn local_name(&self) -> &'static str {
        Self::NAMES_PL[self.index() as usize]
    }

    /// Look up a day by its English or Polish name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|w| {
            w.name().to_lowercase() == name || w.local_name().to_lowercase() == name
        })
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(w: chrono::Weekday) -> Self {
        Self::ALL[w.num_days_from_monday() as usize]
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
