//! Frankfurter HTTP rate provider adapter.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use fx_types::{CurrencyPair, Dataset, ProviderError, RateProvider, RateWindow};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::payload;
use crate::retry::{RetryPolicy, Sleeper, TokioSleeper, retry_with_backoff};

/// Public Frankfurter endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.frankfurter.dev/v1";

/// Per-attempt request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Settings for [`FrankfurterProvider`].
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Provider
// ─────────────────────────────────────────────────────────────────────────────

/// Fetches time series from a Frankfurter-compatible API.
pub struct FrankfurterProvider {
    client: Client,
    base_url: String,
    retry: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl FrankfurterProvider {
    /// Creates a provider with its own pooled HTTP client.
    pub fn new(config: ProviderConfig) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry: config.retry,
            sleeper: Arc::new(TokioSleeper),
        })
    }

    /// Replaces the sleeper used between attempts.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// `{base}/{start}..{end}?from={base_ccy}&to={quote_ccy}`
    pub fn url_for(&self, window: RateWindow, pair: CurrencyPair) -> String {
        format!(
            "{}/{}..{}?from={}&to={}",
            self.base_url, window.start, window.end, pair.base, pair.quote
        )
    }

    async fn attempt(&self, url: &str, pair: CurrencyPair) -> Result<Option<Dataset>, ProviderError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(classify)?;

        let status = response.status();
        if status.is_client_error() {
            return Err(ProviderError::Client {
                status: status.as_u16(),
            });
        }
        if status.is_server_error() {
            return Err(ProviderError::Server {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(ProviderError::Transport(format!(
                "unexpected status {}",
                status
            )));
        }

        let body: Value = response.json().await.map_err(classify)?;
        let dataset = payload::normalize(&body, pair.quote);
        if dataset.is_none() {
            warn!("Provider response has an unrecognized shape");
        }
        Ok(dataset)
    }
}

fn classify(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout
    } else if err.is_decode() {
        ProviderError::Decode(err.to_string())
    } else {
        ProviderError::Transport(err.to_string())
    }
}

#[async_trait]
impl RateProvider for FrankfurterProvider {
    #[tracing::instrument(skip_all, fields(%window, %pair))]
    async fn fetch_rates(
        &self,
        window: RateWindow,
        pair: CurrencyPair,
    ) -> Result<Option<Dataset>, ProviderError> {
        let url = self.url_for(window, pair);
        let url = url.as_str();

        let result = retry_with_backoff(self.retry, self.sleeper.as_ref(), move || {
            self.attempt(url, pair)
        })
        .await;

        match &result {
            Ok(Some(dataset)) => info!(records = dataset.len(), "Fetched rates from provider"),
            Ok(None) => info!("Provider returned no usable data"),
            Err(e) => warn!(error = %e, "Provider fetch failed"),
        }
        result
    }
}
