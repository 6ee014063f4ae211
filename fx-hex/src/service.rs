//! FX Application Service
//!
//! Orchestrates data acquisition through the provider and fallback ports and
//! hands the result to the aggregator. Contains NO infrastructure logic.

use std::sync::Arc;

use fx_repo::RateCache;
use fx_types::{
    AppError, CacheKey, CurrencyPair, Dataset, FallbackSource, Projection, RateProvider,
    RateWindow, SummaryRequest,
};
use tracing::{debug, info, warn};

/// Reported when neither the provider nor the fallback has data for a window.
pub const NO_FX_DATA_MESSAGE: &str = "No FX data available for the specified date range";

/// Outcome of [`FxService::get_fx_data`], tagged with where the data came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Acquired {
    Cached(Dataset),
    Remote(Dataset),
    Fallback(Dataset),
    Absent,
}

impl Acquired {
    pub fn source(&self) -> &'static str {
        match self {
            Acquired::Cached(_) => "cache",
            Acquired::Remote(_) => "remote",
            Acquired::Fallback(_) => "fallback",
            Acquired::Absent => "none",
        }
    }

    pub fn into_dataset(self) -> Option<Dataset> {
        match self {
            Acquired::Cached(d) | Acquired::Remote(d) | Acquired::Fallback(d) => Some(d),
            Acquired::Absent => None,
        }
    }
}

/// Application service for FX summaries.
///
/// Generic over the provider and fallback ports - adapters are injected at
/// compile time. The cache is shared and may outlive the service.
pub struct FxService<P: RateProvider, F: FallbackSource> {
    provider: P,
    fallback: F,
    cache: Arc<RateCache>,
}

impl<P: RateProvider, F: FallbackSource> FxService<P, F> {
    pub fn new(provider: P, fallback: F, cache: Arc<RateCache>) -> Self {
        Self {
            provider,
            fallback,
            cache,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }

    pub fn cache(&self) -> &Arc<RateCache> {
        &self.cache
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Acquisition
    // ─────────────────────────────────────────────────────────────────────────────

    /// Cache, then provider, then fallback. Never fails: provider errors are
    /// logged and absorbed, and emptiness is reported as [`Acquired::Absent`].
    ///
    /// Only non-empty datasets are cached, so an absent window is retried
    /// against the provider on the next request.
    #[tracing::instrument(skip_all, fields(%window, %pair))]
    pub async fn get_fx_data(&self, window: RateWindow, pair: CurrencyPair) -> Acquired {
        let key = CacheKey::new(window, pair);

        if let Some(dataset) = self.cache.get(&key) {
            debug!(records = dataset.len(), "Cache hit");
            return Acquired::Cached(dataset);
        }

        match self.provider.fetch_rates(window, pair).await {
            Ok(Some(dataset)) if !dataset.is_empty() => {
                self.cache.put(key, dataset.clone());
                return Acquired::Remote(dataset);
            }
            Ok(_) => info!("Provider returned no data, using fallback"),
            Err(e) => warn!(error = %e, "Provider unavailable, using fallback"),
        }

        let dataset = self.fallback.load_rates(window).await;
        if dataset.is_empty() {
            warn!("No data from provider or fallback");
            return Acquired::Absent;
        }

        self.cache.put(key, dataset.clone());
        Acquired::Fallback(dataset)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Summary
    // ─────────────────────────────────────────────────────────────────────────────

    /// EUR/USD summary or daily breakdown for the requested window.
    #[tracing::instrument(skip(self), fields(window = %req.window, breakdown = %req.breakdown))]
    pub async fn summary(&self, req: SummaryRequest) -> Result<Projection, AppError> {
        if req.window.start > req.window.end {
            return Err(AppError::BadRequest(
                "Start date must be before or equal to end date".into(),
            ));
        }

        let acquired = self
            .get_fx_data(req.window, CurrencyPair::default())
            .await;
        info!(source = acquired.source(), "Acquired rates");

        let dataset = acquired
            .into_dataset()
            .ok_or_else(|| AppError::NotFound(NO_FX_DATA_MESSAGE.into()))?;

        Ok(fx_stats::process(dataset, req.breakdown))
    }
}
