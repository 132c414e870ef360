//! # Storefront Client SDK
//!
//! A typed Rust client for the storefront locale API.

use reqwest::Client;
use serde::de::DeserializeOwned;
use storefront_types::{
    CallingCodeInfo, ConvertQuery, ConvertResponse, Coordinates, CountryCurrencyResponse,
    CurrencyInfo, FormatQuery, FormatResponse, LocationResponse, LocationState, PhoneQuery,
    PhoneResponse, RefreshResponse,
};

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storefront API client.
pub struct StorefrontClient {
    base_url: String,
    http: Client,
}

impl StorefrontClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Lists the currency table.
    pub async fn currencies(&self) -> Result<Vec<CurrencyInfo>, ClientError> {
        self.get("/api/currencies").await
    }

    /// Converts an amount between two currencies.
    pub async fn convert(
        &self,
        amount: f64,
        from: &str,
        to: &str,
    ) -> Result<ConvertResponse, ClientError> {
        let query = ConvertQuery {
            amount,
            from: from.to_string(),
            to: to.to_string(),
        };
        self.get_with_query("/api/convert", &query).await
    }

    /// Formats an amount in a currency.
    pub async fn format(&self, amount: f64, currency: &str) -> Result<FormatResponse, ClientError> {
        let query = FormatQuery {
            amount,
            currency: currency.to_string(),
        };
        self.get_with_query("/api/format", &query).await
    }

    /// Currency used in a country.
    pub async fn country_currency(
        &self,
        country: &str,
    ) -> Result<CountryCurrencyResponse, ClientError> {
        self.get(&format!("/api/countries/{}/currency", country))
            .await
    }

    /// Detects the country at a position.
    pub async fn locate(&self, lat: f64, lng: f64) -> Result<LocationResponse, ClientError> {
        self.post("/api/location", &Coordinates::new(lat, lng))
            .await
    }

    /// Current detected country and currency.
    pub async fn location(&self) -> Result<LocationState, ClientError> {
        self.get("/api/location").await
    }

    /// Asks the server to refresh its rates.
    ///
    /// A failed refresh is returned as a `RefreshResponse` with a `FAILED`
    /// status rather than an error.
    pub async fn refresh_rates(&self) -> Result<RefreshResponse, ClientError> {
        let resp = self
            .http
            .post(format!("{}/api/rates/refresh", self.base_url))
            .send()
            .await?;
        if resp.status() == reqwest::StatusCode::BAD_GATEWAY {
            let body = resp.text().await?;
            return Ok(serde_json::from_str(&body)?);
        }
        self.handle_response(resp).await
    }

    /// Analyzes a phone number.
    pub async fn phone(&self, number: &str) -> Result<PhoneResponse, ClientError> {
        let query = PhoneQuery {
            number: number.to_string(),
        };
        self.get_with_query("/api/phone", &query).await
    }

    /// Calling-code entry of a country.
    pub async fn calling_code(&self, country: &str) -> Result<CallingCodeInfo, ClientError> {
        self.get(&format!("/api/countries/{}/calling-code", country))
            .await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn get_with_query<T: DeserializeOwned, Q: serde::Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = StorefrontClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = StorefrontClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }
}
