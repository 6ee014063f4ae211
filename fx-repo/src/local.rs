//! Local JSON fallback dataset.

use std::path::PathBuf;

use async_trait::async_trait;
use fx_types::{Dataset, FallbackSource, RateWindow};
use serde_json::Value;
use tracing::{debug, warn};

use crate::payload::records_from_array;

/// Default location of the bundled sample dataset.
pub const DEFAULT_FALLBACK_PATH: &str = "data/sample_fx.json";

/// Reads a JSON array of `{date, rate}` objects from disk on every call.
#[derive(Debug, Clone)]
pub struct LocalFileSource {
    path: PathBuf,
}

impl LocalFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_all(&self) -> Dataset {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Fallback dataset unavailable");
                return Dataset::empty();
            }
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(items)) => records_from_array(&items),
            Ok(_) => {
                warn!(path = %self.path.display(), "Fallback dataset is not a JSON array");
                Dataset::empty()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Fallback dataset is malformed");
                Dataset::empty()
            }
        }
    }
}

impl Default for LocalFileSource {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_PATH)
    }
}

#[async_trait]
impl FallbackSource for LocalFileSource {
    async fn load_rates(&self, window: RateWindow) -> Dataset {
        let dataset = self.read_all().await.within(&window);
        debug!(%window, records = dataset.len(), "Loaded fallback rates");
        dataset
    }
}
