//! Local fallback dataset port.

use crate::domain::{Dataset, RateWindow};

/// Port trait for the offline dataset consulted when the provider is unavailable.
///
/// Loading never fails: an unavailable or corrupt source yields an empty dataset.
#[async_trait::async_trait]
pub trait FallbackSource: Send + Sync + 'static {
    /// Returns records with `window.start <= date <= window.end`, in source order.
    async fn load_rates(&self, window: RateWindow) -> Dataset;
}
