//! Remote rate provider port.
//!
//! Implementations are expected to own their retry policy; the caller only
//! sees the final outcome.

use crate::domain::{CurrencyPair, Dataset, RateWindow};
use crate::error::ProviderError;

/// Port trait for remote exchange rate providers.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync + 'static {
    /// Fetches daily rates for `pair` over the inclusive `window`.
    ///
    /// - `Ok(Some(dataset))` - the provider answered in a recognized shape
    /// - `Ok(None)` - the provider answered, but with nothing usable
    /// - `Err(_)` - the request failed (after any retries)
    async fn fetch_rates(
        &self,
        window: RateWindow,
        pair: CurrencyPair,
    ) -> Result<Option<Dataset>, ProviderError>;
}
