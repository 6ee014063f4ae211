//! # FX Client SDK
//!
//! A typed Rust client for the FX summary API.

use chrono::NaiveDate;
use fx_types::{Breakdown, DayResult, ServiceInfo, SummaryResult};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// FX summary API client.
pub struct FxClient {
    base_url: String,
    http: Client,
}

impl FxClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Service name, version and endpoint locations.
    pub async fn info(&self) -> Result<ServiceInfo, ClientError> {
        self.get("/", &[]).await
    }

    /// Summary of EUR/USD over `start..=end`.
    pub async fn summary(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<SummaryResult, ClientError> {
        self.get("/summary", &summary_query(start, end, Breakdown::Summary))
            .await
    }

    /// Daily EUR/USD rates with percent changes over `start..=end`.
    pub async fn daily(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DayResult>, ClientError> {
        self.get("/summary", &summary_query(start, end, Breakdown::Day))
            .await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

fn summary_query(start: NaiveDate, end: NaiveDate, breakdown: Breakdown) -> Vec<(&'static str, String)> {
    vec![
        ("start", start.format("%Y-%m-%d").to_string()),
        ("end", end.format("%Y-%m-%d").to_string()),
        ("breakpoint", breakdown.to_string()),
    ]
}
