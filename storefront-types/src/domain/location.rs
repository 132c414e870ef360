//! Coordinates and reverse-geocoded addresses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A WGS84 position as reported by the browser.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    #[schema(example = 5.3599)]
    pub lat: f64,
    #[schema(example = -4.0083)]
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `"lat, lng"` with six decimals.
    pub fn label(&self) -> String {
        format!("{:.6}, {:.6}", self.lat, self.lng)
    }
}

/// Address returned by a reverse geocoder.
///
/// Field names follow the Nominatim `address` object so the adapter can
/// deserialize straight into it. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GeocodedAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suburb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighbourhood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,
}

impl GeocodedAddress {
    /// Human-readable delivery line: road, district, locality.
    ///
    /// Falls back to the raw coordinates when none of those parts is known.
    pub fn delivery_label(&self, coords: Coordinates) -> String {
        let district = non_empty(&self.suburb).or_else(|| non_empty(&self.neighbourhood));
        let locality = non_empty(&self.city)
            .or_else(|| non_empty(&self.town))
            .or_else(|| non_empty(&self.village));

        let parts: Vec<&str> = [non_empty(&self.road), district, locality]
            .into_iter()
            .flatten()
            .collect();

        if parts.is_empty() {
            coords.label()
        } else {
            parts.join(", ")
        }
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_label_joins_known_parts() {
        let address = GeocodedAddress {
            road: Some("Boulevard Latrille".into()),
            neighbourhood: Some("Cocody".into()),
            town: Some("Abidjan".into()),
            ..Default::default()
        };
        assert_eq!(
            address.delivery_label(Coordinates::new(5.36, -4.0)),
            "Boulevard Latrille, Cocody, Abidjan"
        );
    }

    #[test]
    fn test_delivery_label_prefers_suburb_and_city() {
        let address = GeocodedAddress {
            suburb: Some("Plateau".into()),
            neighbourhood: Some("ignored".into()),
            city: Some("Dakar".into()),
            village: Some("ignored".into()),
            ..Default::default()
        };
        assert_eq!(
            address.delivery_label(Coordinates::new(14.7, -17.4)),
            "Plateau, Dakar"
        );
    }

    #[test]
    fn test_delivery_label_falls_back_to_coordinates() {
        let address = GeocodedAddress::default();
        assert_eq!(
            address.delivery_label(Coordinates::new(5.3599, -4.0083)),
            "5.359900, -4.008300"
        );
    }
}
