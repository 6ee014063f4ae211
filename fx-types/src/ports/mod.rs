//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod fallback;
mod provider;

pub use fallback::FallbackSource;
pub use provider::RateProvider;
