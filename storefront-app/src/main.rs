//! # Storefront Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Build the outbound HTTP adapters
//! - Create the storefront service
//! - Optionally start the rate refresh worker
//! - Start the HTTP server

mod config;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_adapters::{ExchangeRateApiSource, NominatimGeocoder, http_client};
use storefront_currency::{CurrencyConverter, NumberFormat};
use storefront_hex::{
    RateRefreshWorker, StorefrontService,
    inbound::{HttpServer, RateLimiterState},
};
use storefront_phone::PhoneNormalizer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,storefront_app=debug,storefront_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting storefront server on port {}", config.port);
    tracing::info!("Geocoder: {}", config.nominatim_url);
    tracing::info!("Rate provider: {}", config.rates_url);

    // Build outbound adapters
    let client = http_client(&config.user_agent, config.http_timeout)?;
    let geocoder = NominatimGeocoder::new(
        client.clone(),
        &config.nominatim_url,
        config.geocoder_max_per_second,
    );
    let rate_source = ExchangeRateApiSource::new(client, &config.rates_url);

    // Create the storefront service
    let converter = CurrencyConverter::new()
        .with_number_format(NumberFormat::new(config.thousands_separator.as_str()));
    let service = Arc::new(
        StorefrontService::with_converter(geocoder, rate_source, converter).with_phone_normalizer(
            PhoneNormalizer::new().with_double_zero_policy(config.phone_double_zero),
        ),
    );

    if let Some(period) = config.rate_refresh {
        tokio::spawn(RateRefreshWorker::new(service.clone(), period).run());
    } else {
        tracing::debug!("Background rate refresh disabled");
    }

    // Create and run the HTTP server
    let rate_limiter = RateLimiterState::new(config.requests_per_minute)
        .trusting_forwarded_for(config.trust_forwarded_for);
    let server = HttpServer::with_rate_limiter(service, rate_limiter);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
