//! Record store contract and an in-memory implementation.
//!
//! Persistence belongs to the application; the analysis code only needs
//! read access to a date range, expressed by [`RecordStore`].

use std::collections::BTreeMap;

use dt_core::errors::{Error, Result};
use dt_time::Date;

use crate::entry::DailyEntry;

/// Read-only access to stored daily entries.
pub trait RecordStore {
    /// Entries dated within `[since, until]` (both inclusive), ascending by
    /// date.
    fn fetch_records(&self, since: Date, until: Date) -> Result<Vec<DailyEntry>>;
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn fetch_records(&self, since: Date, until: Date) -> Result<Vec<DailyEntry>> {
        (**self).fetch_records(since, until)
    }
}

/// Entries of `store` within `[since, until]`, each passed through
/// [`DailyEntry::validated`].
///
/// The analysis engines read stores only through this function.
///
/// # Errors
/// [`Error::Validation`] naming the window position of the first malformed
/// entry, or any error of the store.
pub(crate) fn fetch_validated<S: RecordStore + ?Sized>(
    store: &S,
    since: Date,
    until: Date,
) -> Result<Vec<DailyEntry>> {
    store
        .fetch_records(since, until)?
        .into_iter()
        .enumerate()
        .map(|(i, e)| e.validated(i))
        .collect()
}

/// A date-keyed store backed by a `BTreeMap`.
///
/// Holds at most one entry per date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryStore {
    entries: BTreeMap<Date, DailyEntry>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from entries, rejecting duplicate dates.
    pub fn from_entries(entries: impl IntoIterator<Item = DailyEntry>) -> Result<Self> {
        let mut store = Self::new();
        for e in entries {
            store.insert(e)?;
        }
        Ok(store)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the entry for `date`.
    pub fn get(&self, date: Date) -> Option<&DailyEntry> {
        self.entries.get(&date)
    }

    /// Add a new entry.
    ///
    /// # Errors
    /// [`Error::DuplicateRecord`] if an entry for the same date exists.
    pub fn insert(&mut self, entry: DailyEntry) -> Result<()> {
        if self.entries.contains_key(&entry.date) {
            return Err(Error::DuplicateRecord(format!(
                "an entry for {} already exists",
                entry.date
            )));
        }
        self.entries.insert(entry.date, entry);
        Ok(())
    }

    /// Insert or replace the entry for its date, returning the old one.
    pub fn upsert(&mut self, entry: DailyEntry) -> Option<DailyEntry> {
        self.entries.insert(entry.date, entry)
    }
}

impl RecordStore for InMemoryStore {
    fn fetch_records(&self, since: Date, until: Date) -> Result<Vec<DailyEntry>> {
        if until < since {
            return Ok(Vec::new());
        }
        Ok(self.entries.range(since..=until).map(|(_, e)| e.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn store() -> InMemoryStore {
        InMemoryStore::from_entries(
            (1..=10).map(|d| DailyEntry::new(date(2026, 1, d)).with_calories_in(2000.0 + d as f64)),
        )
        .unwrap()
    }

    #[test]
    fn range_is_inclusive_and_sorted() {
        let s = store();
        let got = s.fetch_records(date(2026, 1, 3), date(2026, 1, 5)).unwrap();
        let dates: Vec<_> = got.iter().map(|e| e.date).collect();
        assert_eq!(dates, [date(2026, 1, 3), date(2026, 1, 4), date(2026, 1, 5)]);
    }

    #[test]
    fn inverted_range_is_empty() {
        let s = store();
        assert!(s.fetch_records(date(2026, 1, 5), date(2026, 1, 3)).unwrap().is_empty());
    }

    #[test]
    fn duplicate_dates_rejected() {
        let mut s = store();
        let err = s.insert(DailyEntry::new(date(2026, 1, 4))).unwrap_err();
        assert!(matches!(err, Error::DuplicateRecord(_)));
        assert_eq!(s.len(), 10);
    }

    #[test]
    fn fetch_validated_rejects_malformed_rows() {
        let mut s = store();
        s.upsert(DailyEntry::new(date(2026, 1, 4)).with_calories_in(f64::NAN));
        let err = fetch_validated(&s, date(2026, 1, 2), date(2026, 1, 6)).unwrap_err();
        assert!(matches!(err, Error::Validation { index: 2, .. }));

        s.upsert(DailyEntry::new(date(2026, 1, 4)).with_weight(85.46));
        let ok = fetch_validated(&s, date(2026, 1, 2), date(2026, 1, 6)).unwrap();
        assert_eq!(ok.len(), 5);
        assert_eq!(ok[2].weight_kg, Some(85.5));
    }

    #[test]
    fn upsert_replaces() {
        let mut s = store();
        let old = s.upsert(DailyEntry::new(date(2026, 1, 4)).with_calories_in(1.0));
        assert_eq!(old.unwrap().cal_in_kcal, Some(2004.0));
        assert_eq!(s.get(date(2026, 1, 4)).unwrap().cal_in_kcal, Some(1.0));
    }
}
