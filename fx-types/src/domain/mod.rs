//! Domain models for the FX summary service.

pub mod currency;
pub mod rate;
pub mod summary;

pub use currency::{Currency, CurrencyPair};
pub use rate::{CacheKey, Dataset, RateRecord, RateWindow};
pub use summary::{Breakdown, DayResult, NO_DATA_MESSAGE, Projection, SummaryResult};
