//! Nominatim reverse geocoder.

use std::num::NonZeroU32;

use async_trait::async_trait;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use reqwest::Client;
use serde::Deserialize;
use storefront_types::{Coordinates, GeocodedAddress, ReverseGeocodeSource, SourceError};
use tracing::{debug, instrument, warn};

use crate::read_json;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Street-level detail, enough for a delivery label.
const ZOOM: u8 = 18;

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<GeocodedAddress>,
    #[serde(default)]
    error: Option<String>,
}

/// Reverse geocoder backed by the Nominatim `/reverse` endpoint.
///
/// Outbound calls are throttled process-wide; the public instance allows
/// one request per second.
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl NominatimGeocoder {
    pub fn new(client: Client, base_url: impl Into<String>, max_per_second: NonZeroU32) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            limiter: RateLimiter::direct(Quota::per_second(max_per_second)),
        }
    }
}

#[async_trait]
impl ReverseGeocodeSource for NominatimGeocoder {
    #[instrument(skip(self))]
    async fn reverse(&self, coords: Coordinates) -> Result<GeocodedAddress, SourceError> {
        self.limiter.until_ready().await;

        let lat = coords.lat.to_string();
        let lon = coords.lng.to_string();
        let zoom = ZOOM.to_string();
        let resp = self
            .client
            .get(format!("{}/reverse", self.base_url))
            .query(&[
                ("format", "json"),
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("zoom", zoom.as_str()),
                ("addressdetails", "1"),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!("Nominatim request failed: {}", e);
                SourceError::Transport(e.to_string())
            })?;

        let body: ReverseResponse = read_json("nominatim", resp).await?;
        match (body.address, body.error) {
            (Some(address), _) => {
                debug!(country = ?address.country_code, "Reverse geocoded");
                Ok(address)
            }
            (None, Some(error)) => Err(SourceError::Malformed(error)),
            (None, None) => Err(SourceError::Malformed("missing address".into())),
        }
    }
}
