//! # Storefront Adapters
//!
//! Outbound adapters implementing the `ReverseGeocodeSource` and
//! `RateSource` ports over HTTP.

use std::time::Duration;

use reqwest::Client;
use storefront_types::SourceError;

pub mod exchange_rates;
pub mod nominatim;

pub use exchange_rates::ExchangeRateApiSource;
pub use nominatim::NominatimGeocoder;

/// Builds the HTTP client shared by the adapters.
///
/// Nominatim rejects requests without an identifying user agent.
pub fn http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
}

/// Reads a successful JSON body, mapping every failure onto `SourceError`.
async fn read_json<T: serde::de::DeserializeOwned>(
    source_name: &'static str,
    resp: reqwest::Response,
) -> Result<T, SourceError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            source_name,
            status: status.as_u16(),
        });
    }
    let body = resp
        .text()
        .await
        .map_err(|e| SourceError::Transport(e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| SourceError::Malformed(e.to_string()))
}
