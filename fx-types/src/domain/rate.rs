//! Rate records, datasets and the keys they are looked up by.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use super::currency::CurrencyPair;

/// A single daily exchange rate observation.
///
/// `date` orders chronologically, which for the `YYYY-MM-DD` wire form is
/// the same as lexicographic order. Zero and negative rates are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RateRecord {
    #[schema(value_type = String, example = "2025-07-01")]
    pub date: NaiveDate,
    #[schema(example = 1.087)]
    pub rate: f64,
}

impl RateRecord {
    pub fn new(date: NaiveDate, rate: f64) -> Self {
        Self { date, rate }
    }
}

/// Rate records in arrival order.
///
/// No ordering or uniqueness is guaranteed until [`Dataset::sorted_by_date`]
/// is applied; duplicate dates are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset(Vec<RateRecord>);

impl Dataset {
    pub fn new(records: Vec<RateRecord>) -> Self {
        Self(records)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RateRecord> {
        self.0.iter()
    }

    pub fn records(&self) -> &[RateRecord] {
        &self.0
    }

    /// Stable sort ascending by date. Records sharing a date keep their order.
    pub fn sorted_by_date(mut self) -> Self {
        self.0.sort_by_key(|r| r.date);
        self
    }

    /// Keeps only records inside `window`, preserving order.
    pub fn within(self, window: &RateWindow) -> Self {
        Self(
            self.0
                .into_iter()
                .filter(|r| window.contains(r.date))
                .collect(),
        )
    }

    pub fn rates(&self) -> Vec<f64> {
        self.0.iter().map(|r| r.rate).collect()
    }
}

impl From<Vec<RateRecord>> for Dataset {
    fn from(records: Vec<RateRecord>) -> Self {
        Self(records)
    }
}

impl FromIterator<RateRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = RateRecord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Dataset {
    type Item = RateRecord;
    type IntoIter = std::vec::IntoIter<RateRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a RateRecord;
    type IntoIter = std::slice::Iter<'a, RateRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Inclusive date range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl RateWindow {
    /// Callers are expected to have checked `start <= end`; an inverted
    /// window simply contains nothing.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for RateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Cache key over `(start, end, base, quote)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub window: RateWindow,
    pub pair: CurrencyPair,
}

impl CacheKey {
    pub fn new(window: RateWindow, pair: CurrencyPair) -> Self {
        Self { window, pair }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}",
            self.window.start, self.window.end, self.pair.base, self.pair.quote
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Currency;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_sort_is_stable_for_duplicate_dates() {
        let dataset = Dataset::new(vec![
            RateRecord::new(date("2025-07-02"), 2.0),
            RateRecord::new(date("2025-07-01"), 1.0),
            RateRecord::new(date("2025-07-02"), 3.0),
        ]);

        let sorted = dataset.sorted_by_date();

        assert_eq!(sorted.rates(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_window_is_inclusive() {
        let window = RateWindow::new(date("2025-07-01"), date("2025-07-03"));
        assert!(window.contains(date("2025-07-01")));
        assert!(window.contains(date("2025-07-03")));
        assert!(!window.contains(date("2025-06-30")));
        assert!(!window.contains(date("2025-07-04")));
    }

    #[test]
    fn test_within_keeps_source_order() {
        let window = RateWindow::new(date("2025-07-01"), date("2025-07-02"));
        let dataset = Dataset::new(vec![
            RateRecord::new(date("2025-07-02"), 1.085),
            RateRecord::new(date("2025-07-05"), 1.1),
            RateRecord::new(date("2025-07-01"), 1.087),
        ]);

        let filtered = dataset.within(&window);

        assert_eq!(filtered.rates(), vec![1.085, 1.087]);
    }

    #[test]
    fn test_cache_key_display_is_joined() {
        let key = CacheKey::new(
            RateWindow::new(date("2025-07-01"), date("2025-07-03")),
            CurrencyPair::new(Currency::EUR, Currency::USD),
        );
        assert_eq!(key.to_string(), "2025-07-01_2025-07-03_EUR_USD");
    }

    #[test]
    fn test_cache_keys_differ_per_pair() {
        let window = RateWindow::new(date("2025-07-01"), date("2025-07-03"));
        let a = CacheKey::new(window, CurrencyPair::new(Currency::EUR, Currency::USD));
        let b = CacheKey::new(window, CurrencyPair::new(Currency::USD, Currency::EUR));
        assert_ne!(a, b);
    }

    #[test]
    fn test_record_serializes_iso_date() {
        let record = RateRecord::new(date("2025-07-01"), 1.087);
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json, serde_json::json!({"date": "2025-07-01", "rate": 1.087}));
    }
}
