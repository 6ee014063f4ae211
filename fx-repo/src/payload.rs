//! Normalization of rate payloads into [`Dataset`]s.
//!
//! The provider answers either with a list of `{date, rate}` records or with
//! an object whose `rates` field maps dates to per-currency rates. The local
//! fallback file uses the list form. Records missing a usable date or rate
//! are dropped here.

use chrono::NaiveDate;
use fx_types::{Currency, Dataset, RateRecord};
use serde_json::Value;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Normalizes a provider response.
///
/// Returns `None` when the payload matches neither known shape.
pub fn normalize(payload: &Value, quote: Currency) -> Option<Dataset> {
    match payload {
        Value::Array(items) => Some(records_from_array(items)),
        Value::Object(map) => match map.get("rates") {
            Some(Value::Object(rates)) => Some(
                rates
                    .iter()
                    .filter_map(|(date, value)| {
                        let date = parse_date_str(date)?;
                        let rate = match value.get(quote.code()) {
                            Some(quoted) => parse_rate(quoted)?,
                            None => parse_rate(value)?,
                        };
                        Some(RateRecord::new(date, rate))
                    })
                    .collect(),
            ),
            _ => None,
        },
        _ => None,
    }
}

/// Keeps every element that carries both a date and a rate, in order.
pub fn records_from_array(items: &[Value]) -> Dataset {
    items.iter().filter_map(parse_record).collect()
}

fn parse_record(item: &Value) -> Option<RateRecord> {
    let date = parse_date_str(item.get("date")?.as_str()?)?;
    let rate = parse_rate(item.get("rate")?)?;
    Some(RateRecord::new(date, rate))
}

fn parse_date_str(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Accepts JSON numbers and numeric strings.
fn parse_rate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
