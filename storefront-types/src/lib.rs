//! # Storefront Types
//!
//! Domain types and port traits shared by the storefront crates.
//! This crate has ZERO external IO dependencies - only data structures
//! and trait definitions.
//!
//! ## Architecture
//!
//! - `domain/` - Country codes, coordinates and geocoded addresses
//! - `ports/` - Trait definitions the outbound adapters implement
//! - `dto/` - Data Transfer Objects for the HTTP API boundary
//! - `error/` - Source and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{Coordinates, CountryCode, GeocodedAddress};
pub use dto::*;
pub use error::{AppError, SourceError};
pub use ports::{RateSnapshot, RateSource, ReverseGeocodeSource};
