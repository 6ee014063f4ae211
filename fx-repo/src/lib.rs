//! # FX Repository
//!
//! Outbound adapters for the FX summary service:
//! - `frankfurter` - remote rate provider (implements `RateProvider`)
//! - `local` - JSON fallback dataset (implements `FallbackSource`)
//! - `cache` - shared TTL cache for acquired datasets
//! - `retry` - backoff state machine used by the provider
//! - `payload` - normalization of provider and fallback payloads

pub mod cache;
pub mod frankfurter;
pub mod local;
pub mod payload;
pub mod retry;

#[cfg(test)]
mod frankfurter_tests;

pub use cache::{Clock, DEFAULT_TTL, RateCache, SystemClock};
pub use frankfurter::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, FrankfurterProvider, ProviderConfig};
pub use local::{DEFAULT_FALLBACK_PATH, LocalFileSource};
pub use retry::{Backoff, RetryPolicy, Sleeper, Step, TokioSleeper};
