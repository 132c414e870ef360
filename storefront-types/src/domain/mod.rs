//! Domain models for the storefront.

pub mod country;
pub mod location;

pub use country::CountryCode;
pub use location::{Coordinates, GeocodedAddress};
