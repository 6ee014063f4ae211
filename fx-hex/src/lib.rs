//! # FX Hex
//!
//! Application service layer and HTTP adapter for the FX summary service.
//!
//! ## Architecture
//!
//! - `service` - Acquisition orchestration and the summary use case
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi` - OpenAPI document served at `/openapi.json`
//!
//! The service is generic over `P: RateProvider` and `F: FallbackSource`,
//! allowing different adapters to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::{Acquired, FxService, NO_FX_DATA_MESSAGE};
