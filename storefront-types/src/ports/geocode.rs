//! Reverse geocoding port.

use crate::domain::{Coordinates, GeocodedAddress};
use crate::error::SourceError;

/// Port trait for reverse geocoders.
///
/// Implementations can be HTTP clients (Nominatim), fixtures, etc.
#[async_trait::async_trait]
pub trait ReverseGeocodeSource: Send + Sync + 'static {
    /// Resolves a position to an address.
    ///
    /// A successful response may still lack a `country_code`.
    async fn reverse(&self, coords: Coordinates) -> Result<GeocodedAddress, SourceError>;
}
