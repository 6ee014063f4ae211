//! # FX Types
//!
//! Domain types and port traits for the FX summary service.
//! This crate has ZERO external IO dependencies - only data structures
//! and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Rate records, datasets, currency pairs, aggregation results
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Provider and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Breakdown, CacheKey, Currency, CurrencyPair, Dataset, DayResult, NO_DATA_MESSAGE, Projection,
    RateRecord, RateWindow, SummaryResult,
};
pub use dto::*;
pub use error::{AppError, ProviderError};
pub use ports::{FallbackSource, RateProvider};
