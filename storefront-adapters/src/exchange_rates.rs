//! exchangerate-api.com rate source.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use storefront_types::{RateSnapshot, RateSource, SourceError};
use tracing::{info, instrument, warn};

use crate::read_json;

pub const DEFAULT_RATES_URL: &str = "https://api.exchangerate-api.com/v4/latest";

#[derive(Debug, Deserialize)]
struct LatestResponse {
    #[serde(default)]
    base: Option<String>,
    rates: HashMap<String, f64>,
    /// Unix seconds.
    #[serde(default)]
    time_last_updated: Option<i64>,
}

/// Rate source reading `GET {base_url}/{BASE}`.
pub struct ExchangeRateApiSource {
    client: Client,
    base_url: String,
}

impl ExchangeRateApiSource {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl RateSource for ExchangeRateApiSource {
    #[instrument(skip(self))]
    async fn fetch_rates(&self, base: &str) -> Result<RateSnapshot, SourceError> {
        let resp = self
            .client
            .get(format!("{}/{}", self.base_url, base))
            .send()
            .await
            .map_err(|e| {
                warn!("Rate request failed: {}", e);
                SourceError::Transport(e.to_string())
            })?;

        let body: LatestResponse = read_json("exchangerate-api", resp).await?;
        info!(count = body.rates.len(), "Fetched exchange rates");

        let snapshot = RateSnapshot::new(body.base.unwrap_or_else(|| base.to_string()), body.rates);
        Ok(
            match body
                .time_last_updated
                .and_then(|secs| DateTime::from_timestamp(secs, 0))
            {
                Some(at) => snapshot.with_updated_at(at),
                None => snapshot,
            },
        )
    }
}
