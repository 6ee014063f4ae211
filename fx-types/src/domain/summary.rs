//! Aggregated views over a dataset.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Message carried by [`Projection::NoData`].
pub const NO_DATA_MESSAGE: &str = "No data available for the specified date range";

/// Requested shape of the aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Breakdown {
    /// A single summary record (`breakpoint=none`).
    #[default]
    #[serde(rename = "none")]
    Summary,
    /// One entry per day (`breakpoint=day`).
    #[serde(rename = "day")]
    Day,
}

impl Breakdown {
    pub fn as_str(&self) -> &'static str {
        match self {
            Breakdown::Summary => "none",
            Breakdown::Day => "day",
        }
    }
}

impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Breakdown {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Breakdown::Summary),
            "day" => Ok(Breakdown::Day),
            other => Err(format!("Unknown breakdown: {}", other)),
        }
    }
}

/// Aggregate over the whole window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SummaryResult {
    #[schema(example = 1.087)]
    pub start_rate: f64,
    #[schema(example = 1.092)]
    pub end_rate: f64,
    /// Percent change from first to last rate, 2 decimals. Null when the first rate is zero.
    #[schema(example = 0.46)]
    pub total_pct_change: Option<f64>,
    /// Arithmetic mean, 6 decimals.
    #[schema(example = 1.088)]
    pub mean_rate: f64,
}

/// One day of a daily breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DayResult {
    #[schema(value_type = String, example = "2025-07-02")]
    pub date: NaiveDate,
    #[schema(example = 1.085)]
    pub rate: f64,
    /// Change against the previous entry, 2 decimals. Null on the first day or after a zero rate.
    #[schema(example = -0.18)]
    pub pct_change: Option<f64>,
}

/// Output of the aggregator.
///
/// Serialized untagged: a summary object, an array of days, or `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Projection {
    Summary(SummaryResult),
    Daily(Vec<DayResult>),
    NoData { error: String },
}

impl Projection {
    pub fn no_data() -> Self {
        Projection::NoData {
            error: NO_DATA_MESSAGE.to_string(),
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Projection::NoData { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_parse() {
        assert_eq!("day".parse::<Breakdown>().unwrap(), Breakdown::Day);
        assert_eq!("none".parse::<Breakdown>().unwrap(), Breakdown::Summary);
        assert!("weekly".parse::<Breakdown>().is_err());
        assert!("DAY".parse::<Breakdown>().is_err());
    }

    #[test]
    fn test_no_data_serializes_as_error_object() {
        let json = serde_json::to_value(Projection::no_data()).unwrap();
        assert_eq!(json, serde_json::json!({ "error": NO_DATA_MESSAGE }));
    }

    #[test]
    fn test_summary_serializes_null_change() {
        let projection = Projection::Summary(SummaryResult {
            start_rate: 0.0,
            end_rate: 1.0,
            total_pct_change: None,
            mean_rate: 0.5,
        });
        let json = serde_json::to_value(&projection).unwrap();
        assert!(json["total_pct_change"].is_null());
        assert_eq!(json["mean_rate"], 0.5);
    }

    #[test]
    fn test_daily_round_trips_through_untagged() {
        let body = r#"[{"date":"2025-07-01","rate":1.087,"pct_change":null}]"#;
        let projection: Projection = serde_json::from_str(body).unwrap();
        match projection {
            Projection::Daily(days) => {
                assert_eq!(days.len(), 1);
                assert_eq!(days[0].pct_change, None);
            }
            other => panic!("expected daily projection, got {:?}", other),
        }
    }
}
