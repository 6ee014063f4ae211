//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Breakdown, RateWindow};

// ─────────────────────────────────────────────────────────────────────────────
// Summary DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Raw query string of `GET /summary`.
///
/// Fields are kept as strings so the handler can report format errors itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SummaryQuery {
    /// Start date in YYYY-MM-DD format
    #[param(example = "2025-07-01")]
    pub start: Option<String>,
    /// End date in YYYY-MM-DD format
    #[param(example = "2025-07-03")]
    pub end: Option<String>,
    /// Either `day` for daily values or `none` for a summary
    #[param(example = "none")]
    pub breakpoint: Option<String>,
}

/// A validated summary request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryRequest {
    pub window: RateWindow,
    pub breakdown: Breakdown,
}

// ─────────────────────────────────────────────────────────────────────────────
// Service DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Response of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    #[schema(example = "FX Summary Microservice")]
    pub service: String,
    #[schema(example = "0.1.0")]
    pub version: String,
    #[schema(example = "/openapi.json")]
    pub docs: String,
    #[schema(example = "/health")]
    pub health: String,
    #[schema(example = "/summary")]
    pub summary: String,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
}

/// Error body returned for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "No FX data available for the specified date range")]
    pub error: String,
    #[schema(example = 404)]
    pub code: u16,
}
