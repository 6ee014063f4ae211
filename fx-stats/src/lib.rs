//! Rate Aggregation Library
//!
//! Turns a [`Dataset`] of daily rates into either a single summary record or a
//! per-day breakdown with percent changes. Everything here is pure: no IO, no
//! clocks, no shared state.
//!
//! Input may arrive in any order; [`process`] stably sorts by date before
//! computing anything. Zero rates never cause a division: any percent change
//! whose denominator would be zero is reported as `None`.
//!
//! # Example
//! ```
//! use fx_stats::{calculate_daily_percent_change, calculate_mean_rate};
//!
//! let rates = [1.087, 1.085, 1.092];
//! assert_eq!(calculate_mean_rate(&rates), 1.088);
//! assert_eq!(
//!     calculate_daily_percent_change(&rates),
//!     vec![None, Some(-0.18), Some(0.65)]
//! );
//! ```

use fx_types::{Breakdown, Dataset, DayResult, Projection, SummaryResult};

/// Decimal places kept for percent changes.
pub const PCT_DECIMALS: usize = 2;

/// Decimal places kept for the mean rate.
pub const MEAN_DECIMALS: usize = 6;

// ─────────────────────────────────────────────────────────────────────────────
// Rounding
// ─────────────────────────────────────────────────────────────────────────────

/// Rounds to `decimals` places on the exact binary value, ties to even.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

fn pct_change(from: f64, to: f64) -> Option<f64> {
    if from == 0.0 {
        return None;
    }
    Some(round_to((to - from) / from * 100.0, PCT_DECIMALS))
}

// ─────────────────────────────────────────────────────────────────────────────
// Series Statistics
// ─────────────────────────────────────────────────────────────────────────────

/// Percent change of each rate against its predecessor.
///
/// The output has the same length as `rates`. The first entry is always `None`,
/// as is any entry whose predecessor is zero.
pub fn calculate_daily_percent_change(rates: &[f64]) -> Vec<Option<f64>> {
    if rates.is_empty() {
        return Vec::new();
    }

    std::iter::once(None)
        .chain(rates.windows(2).map(|pair| pct_change(pair[0], pair[1])))
        .collect()
}

/// Arithmetic mean rounded to six decimals; `0.0` for an empty slice.
pub fn calculate_mean_rate(rates: &[f64]) -> f64 {
    if rates.is_empty() {
        return 0.0;
    }

    let sum: f64 = rates.iter().sum();
    round_to(sum / rates.len() as f64, MEAN_DECIMALS)
}

/// Percent change from `start_rate` to `end_rate`; `None` when `start_rate` is zero.
pub fn calculate_total_percent_change(start_rate: f64, end_rate: f64) -> Option<f64> {
    pct_change(start_rate, end_rate)
}

// ─────────────────────────────────────────────────────────────────────────────
// Projections
// ─────────────────────────────────────────────────────────────────────────────

/// Aggregates `dataset` into the requested projection.
///
/// An empty dataset yields [`Projection::NoData`] whatever the breakdown.
pub fn process(dataset: Dataset, breakdown: Breakdown) -> Projection {
    if dataset.is_empty() {
        return Projection::no_data();
    }

    let sorted = dataset.sorted_by_date();
    match breakdown {
        Breakdown::Day => Projection::Daily(daily_breakdown(&sorted)),
        Breakdown::Summary => Projection::Summary(summarize(&sorted)),
    }
}

fn daily_breakdown(sorted: &Dataset) -> Vec<DayResult> {
    let changes = calculate_daily_percent_change(&sorted.rates());

    sorted
        .iter()
        .zip(changes)
        .map(|(record, pct_change)| DayResult {
            date: record.date,
            rate: record.rate,
            pct_change,
        })
        .collect()
}

/// Caller guarantees `sorted` is non-empty.
fn summarize(sorted: &Dataset) -> SummaryResult {
    let rates = sorted.rates();
    let start_rate = rates[0];
    let end_rate = rates[rates.len() - 1];

    SummaryResult {
        start_rate,
        end_rate,
        total_pct_change: calculate_total_percent_change(start_rate, end_rate),
        mean_rate: calculate_mean_rate(&rates),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
