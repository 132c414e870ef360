//! Port traits (interfaces for adapters).
//!
//! These are the contracts that outbound adapters must implement.
//! The converter and the application layer depend on these traits, not on
//! concrete HTTP clients.

mod geocode;
mod rates;

pub use geocode::ReverseGeocodeSource;
pub use rates::{RateSnapshot, RateSource};
