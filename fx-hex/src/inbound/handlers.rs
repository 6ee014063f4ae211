//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use utoipa::OpenApi;

use fx_types::{
    AppError, Breakdown, ErrorResponse, FallbackSource, HealthResponse, RateProvider, RateWindow,
    ServiceInfo, SummaryQuery, SummaryRequest,
};

use crate::FxService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<P: RateProvider, F: FallbackSource> {
    pub service: FxService<P, F>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Internal server error: {}", msg),
                )
            }
        };

        let body = ErrorResponse {
            error: message,
            code: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

/// Service info endpoint.
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "FX Summary Microservice".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        docs: "/openapi.json".into(),
        health: "/health".into(),
        summary: "/summary".into(),
    })
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
    })
}

/// OpenAPI document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// EUR/USD summary or daily breakdown for a date range.
#[tracing::instrument(skip(state))]
pub async fn summary<P: RateProvider, F: FallbackSource>(
    State(state): State<Arc<AppState<P, F>>>,
    Query(query): Query<SummaryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let request = parse_summary_query(&query)?;
    let projection = state.service.summary(request).await?;
    Ok(Json(projection))
}

// ─────────────────────────────────────────────────────────────────────────────
// Query validation
// ─────────────────────────────────────────────────────────────────────────────

/// Checks run in order: presence, date format, breakpoint. The window
/// ordering is enforced by the service.
fn parse_summary_query(query: &SummaryQuery) -> Result<SummaryRequest, AppError> {
    let start = required(&query.start, "start")?;
    let end = required(&query.end, "end")?;

    let start = parse_date(start)?;
    let end = parse_date(end)?;

    let breakdown = query
        .breakpoint
        .as_deref()
        .unwrap_or(Breakdown::default().as_str())
        .parse::<Breakdown>()
        .map_err(|_| {
            AppError::BadRequest("Invalid breakpoint parameter. Must be 'day' or 'none'".into())
        })?;

    Ok(SummaryRequest {
        window: RateWindow::new(start, end),
        breakdown,
    })
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, AppError> {
    value
        .as_deref()
        .ok_or_else(|| AppError::Validation(format!("Missing required query parameter: {}", name)))
}

fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        AppError::BadRequest(format!(
            "Invalid date format. Use YYYY-MM-DD format. Error: {}",
            e
        ))
    })
}
