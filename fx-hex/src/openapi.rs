//! OpenAPI document for the HTTP API.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use fx_types::domain::{Breakdown, DayResult, SummaryResult};
use fx_types::dto::{ErrorResponse, HealthResponse, ServiceInfo, SummaryQuery};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Body of a successful `/summary` response, depending on `breakpoint`.
#[derive(Serialize, ToSchema)]
#[serde(untagged)]
pub enum SummaryBody {
    Summary(SummaryResult),
    Daily(Vec<DayResult>),
}

// Stand-ins carrying path documentation; the real handlers live in `inbound::handlers`.

/// Service information
#[utoipa::path(
    get,
    path = "/",
    tag = "service",
    responses(
        (status = 200, description = "Service name, version and endpoint locations", body = ServiceInfo)
    )
)]
async fn root() {}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "service",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse, example = json!({"status": "ok"}))
    )
)]
async fn health() {}

/// EUR/USD summary for a date range
///
/// With `breakpoint=none` (the default) the body is a single summary object.
/// With `breakpoint=day` it is an array of daily entries, each with the percent
/// change against the previous day.
#[utoipa::path(
    get,
    path = "/summary",
    tag = "summary",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Summary object, or an array of DayResult when breakpoint=day", body = SummaryBody),
        (status = 400, description = "Malformed date, unknown breakpoint or start after end", body = ErrorResponse),
        (status = 404, description = "No data from the provider or the fallback dataset", body = ErrorResponse),
        (status = 422, description = "Missing start or end parameter", body = ErrorResponse)
    )
)]
async fn summary() {}

/// OpenAPI documentation for the FX summary API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "FX Summary Microservice",
        version = "0.1.0",
        description = "EUR/USD exchange rate summaries backed by the Frankfurter API, with a local dataset fallback and an in-memory cache.",
        license(name = "MIT"),
    ),
    paths(root, health, summary),
    components(
        schemas(
            ServiceInfo,
            HealthResponse,
            ErrorResponse,
            SummaryBody,
            SummaryResult,
            DayResult,
            Breakdown,
        )
    ),
    tags(
        (name = "service", description = "Service metadata and health"),
        (name = "summary", description = "FX rate summaries"),
    )
)]
pub struct ApiDoc;
