//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use storefront_types::CountryCode;
use storefront_types::domain::Coordinates;
use storefront_types::dto::{
    CallingCodeInfo, ConvertResponse, CountryCurrencyResponse, CurrencyInfo, FormatResponse,
    LocationResponse, LocationState, PhoneResponse, RefreshResponse, RefreshStatus,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
async fn health() {}

/// List the currency table with current rates
#[utoipa::path(
    get,
    path = "/api/currencies",
    tag = "currencies",
    responses(
        (status = 200, description = "Currencies in table order", body = Vec<CurrencyInfo>)
    )
)]
async fn list_currencies() {}

/// Convert an amount between currencies (unknown codes count as rate 1)
#[utoipa::path(
    get,
    path = "/api/convert",
    tag = "currencies",
    params(
        ("amount" = f64, Query, description = "Amount to convert"),
        ("from" = String, Query, description = "Source currency code"),
        ("to" = String, Query, description = "Target currency code")
    ),
    responses(
        (status = 200, description = "Converted and formatted amount", body = ConvertResponse),
        (status = 400, description = "Invalid amount")
    )
)]
async fn convert() {}

/// Format an amount in a currency
#[utoipa::path(
    get,
    path = "/api/format",
    tag = "currencies",
    params(
        ("amount" = f64, Query, description = "Amount to format"),
        ("currency" = String, Query, description = "Currency code")
    ),
    responses(
        (status = 200, description = "Formatted amount", body = FormatResponse),
        (status = 400, description = "Invalid amount")
    )
)]
async fn format() {}

/// Currency used in a country
#[utoipa::path(
    get,
    path = "/api/countries/{country}/currency",
    tag = "currencies",
    params(
        ("country" = String, Path, description = "ISO 3166-1 alpha-2 code")
    ),
    responses(
        (status = 200, description = "Currency of the country", body = CountryCurrencyResponse),
        (status = 400, description = "Invalid country code")
    )
)]
async fn country_currency() {}

/// Refresh rates from the provider
#[utoipa::path(
    post,
    path = "/api/rates/refresh",
    tag = "currencies",
    responses(
        (status = 200, description = "Rates merged", body = RefreshResponse),
        (status = 502, description = "Provider failed, table unchanged", body = RefreshResponse)
    )
)]
async fn refresh_rates() {}

/// Detect the visitor's country from coordinates
#[utoipa::path(
    post,
    path = "/api/location",
    tag = "location",
    request_body = Coordinates,
    responses(
        (status = 200, description = "Detection result; `country` is absent when it failed", body = LocationResponse),
        (status = 400, description = "Coordinates out of range")
    )
)]
async fn locate() {}

/// Current detected country and currency
#[utoipa::path(
    get,
    path = "/api/location",
    tag = "location",
    responses(
        (status = 200, description = "Current state", body = LocationState)
    )
)]
async fn location() {}

/// Analyze a phone number
#[utoipa::path(
    get,
    path = "/api/phone",
    tag = "phone",
    params(
        ("number" = String, Query, description = "Phone number as typed by the user")
    ),
    responses(
        (status = 200, description = "Cleaned, validated and formatted number", body = PhoneResponse)
    )
)]
async fn phone() {}

/// Calling code of a country
#[utoipa::path(
    get,
    path = "/api/countries/{country}/calling-code",
    tag = "phone",
    params(
        ("country" = String, Path, description = "ISO 3166-1 alpha-2 code")
    ),
    responses(
        (status = 200, description = "Calling-code entry", body = CallingCodeInfo),
        (status = 404, description = "Country not in the calling-code table")
    )
)]
async fn calling_code() {}

/// OpenAPI documentation for the storefront API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront Locale API",
        version = "1.0.0",
        description = "Currency conversion and formatting, visitor country detection, and phone number normalization for WhatsApp ordering.",
        license(name = "MIT"),
    ),
    paths(
        health,
        list_currencies,
        convert,
        format,
        country_currency,
        refresh_rates,
        locate,
        location,
        phone,
        calling_code,
    ),
    components(
        schemas(
            CurrencyInfo,
            ConvertResponse,
            FormatResponse,
            CountryCurrencyResponse,
            RefreshResponse,
            RefreshStatus,
            Coordinates,
            LocationResponse,
            LocationState,
            PhoneResponse,
            CallingCodeInfo,
            CountryCode,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "currencies", description = "Currency table, conversion and formatting"),
        (name = "location", description = "Visitor country detection"),
        (name = "phone", description = "Phone number normalization"),
    )
)]
pub struct ApiDoc;
