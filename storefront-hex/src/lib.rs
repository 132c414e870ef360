//! # Storefront Hex
//!
//! Application service layer, HTTP adapter and background rate refresh for
//! the storefront locale service.
//!
//! ## Architecture
//!
//! - `service` - Application service (orchestrates converter and normalizer)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `worker` - Periodic exchange-rate refresh
//!
//! The service is generic over `G: ReverseGeocodeSource` and
//! `R: RateSource`, allowing different adapters to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;
pub mod worker;


pub use service::StorefrontService;
pub use worker::RateRefreshWorker;
