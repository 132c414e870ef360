//! Data Transfer Objects (DTOs) for requests and responses.
//!
//! Currency codes travel as plain strings: the HTTP API accepts codes the
//! storefront does not know and applies the usual fallbacks to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::CountryCode;

// ─────────────────────────────────────────────────────────────────────────────
// Currency DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// One entry of the currency table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CurrencyInfo {
    #[schema(example = "XOF")]
    pub code: String,
    #[schema(example = "CFA franc")]
    pub name: String,
    #[schema(example = "CFA")]
    pub symbol: String,
    /// `integer` or `decimal2`
    #[schema(example = "integer")]
    pub style: String,
    /// Units of this currency per one EUR
    #[schema(example = 655.957)]
    pub rate: f64,
}

/// Query for a conversion.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConvertQuery {
    #[schema(example = 25.0)]
    pub amount: f64,
    #[schema(example = "EUR")]
    pub from: String,
    #[schema(example = "XOF")]
    pub to: String,
}

/// Result of a conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConvertResponse {
    pub amount: f64,
    pub from: String,
    pub to: String,
    #[schema(example = 16398.925)]
    pub converted: f64,
    #[schema(example = "16,399 CFA")]
    pub formatted: String,
}

/// Query for formatting an amount.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FormatQuery {
    #[schema(example = 1234.5)]
    pub amount: f64,
    #[schema(example = "USD")]
    pub currency: String,
}

/// A formatted amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FormatResponse {
    pub currency: String,
    #[schema(example = "1234.50 $")]
    pub formatted: String,
}

/// Currency used in a country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CountryCurrencyResponse {
    pub country: CountryCode,
    #[schema(example = "XOF")]
    pub currency: String,
    /// True when the country is not mapped and the base currency was used
    pub defaulted: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Location DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Outcome of a country detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LocationResponse {
    /// Detected country, absent when detection failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<CountryCode>,
    /// Current currency after the detection attempt
    #[schema(example = "XOF")]
    pub currency: String,
    /// Delivery address line, or the coordinates when nothing better is known
    pub delivery_label: String,
}

/// Current detected country and currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LocationState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<CountryCode>,
    #[schema(example = "EUR")]
    pub currency: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Rate refresh DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Status of a rate refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefreshStatus {
    Updated,
    Failed,
}

/// Result of a rate refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RefreshResponse {
    pub status: RefreshStatus,
    /// Codes whose rate was overwritten
    #[serde(default)]
    pub updated: Vec<String>,
    /// Codes quoted by the provider but unknown locally
    #[serde(default)]
    pub ignored: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Phone DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Query for phone number analysis.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PhoneQuery {
    #[schema(example = "+225 07-00 00 00 00")]
    pub number: String,
}

/// Calling-code table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CallingCodeInfo {
    #[schema(example = "CI")]
    pub country: String,
    #[schema(example = "+225")]
    pub calling_code: String,
    #[schema(example = "Côte d'Ivoire")]
    pub name: String,
    pub flag: String,
}

/// Everything the storefront needs to know about a phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PhoneResponse {
    #[schema(example = "+2250700000000")]
    pub cleaned: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calling_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<CallingCodeInfo>,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Digits ready for a `wa.me/` link
    #[schema(example = "2250700000000")]
    pub whatsapp: String,
    pub readable: String,
}
