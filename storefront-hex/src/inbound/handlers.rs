//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use storefront_types::{
    AppError, ConvertQuery, Coordinates, FormatQuery, PhoneQuery, RateSource, RefreshStatus,
    ReverseGeocodeSource,
};

use crate::StorefrontService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<G: ReverseGeocodeSource, R: RateSource> {
    pub service: Arc<StorefrontService<G, R>>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

// ─────────────────────────────────────────────────────────────────────────────
// Currencies
// ─────────────────────────────────────────────────────────────────────────────

/// List the currency table.
#[tracing::instrument(skip(state))]
pub async fn list_currencies<G: ReverseGeocodeSource, R: RateSource>(
    State(state): State<Arc<AppState<G, R>>>,
) -> impl IntoResponse {
    Json(state.service.list_currencies().await)
}

/// Convert an amount between currencies.
#[tracing::instrument(skip(state), fields(from = %query.from, to = %query.to))]
pub async fn convert<G: ReverseGeocodeSource, R: RateSource>(
    State(state): State<Arc<AppState<G, R>>>,
    Query(query): Query<ConvertQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.service.convert(query).await?;
    Ok(Json(result))
}

/// Format an amount.
#[tracing::instrument(skip(state), fields(currency = %query.currency))]
pub async fn format<G: ReverseGeocodeSource, R: RateSource>(
    State(state): State<Arc<AppState<G, R>>>,
    Query(query): Query<FormatQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.service.format(query).await?;
    Ok(Json(result))
}

/// Currency used in a country.
#[tracing::instrument(skip(state))]
pub async fn country_currency<G: ReverseGeocodeSource, R: RateSource>(
    State(state): State<Arc<AppState<G, R>>>,
    Path(country): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.service.country_currency(&country)?;
    Ok(Json(result))
}

/// Refresh rates from the provider.
#[tracing::instrument(skip(state))]
pub async fn refresh_rates<G: ReverseGeocodeSource, R: RateSource>(
    State(state): State<Arc<AppState<G, R>>>,
) -> impl IntoResponse {
    let result = state.service.refresh_rates().await;
    let status = match result.status {
        RefreshStatus::Updated => StatusCode::OK,
        RefreshStatus::Failed => StatusCode::BAD_GATEWAY,
    };
    (status, Json(result))
}

// ─────────────────────────────────────────────────────────────────────────────
// Location
// ─────────────────────────────────────────────────────────────────────────────

/// Detect the visitor's country.
#[tracing::instrument(skip(state))]
pub async fn locate<G: ReverseGeocodeSource, R: RateSource>(
    State(state): State<Arc<AppState<G, R>>>,
    Json(coords): Json<Coordinates>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.service.locate(coords).await?;
    Ok(Json(result))
}

/// Current detected country and currency.
#[tracing::instrument(skip(state))]
pub async fn location<G: ReverseGeocodeSource, R: RateSource>(
    State(state): State<Arc<AppState<G, R>>>,
) -> impl IntoResponse {
    Json(state.service.location().await)
}

// ─────────────────────────────────────────────────────────────────────────────
// Phone numbers
// ─────────────────────────────────────────────────────────────────────────────

/// Analyze a phone number.
#[tracing::instrument(skip(state, query))]
pub async fn phone<G: ReverseGeocodeSource, R: RateSource>(
    State(state): State<Arc<AppState<G, R>>>,
    Query(query): Query<PhoneQuery>,
) -> impl IntoResponse {
    Json(state.service.analyze_phone(&query.number))
}

/// Calling code of a country.
#[tracing::instrument(skip(state))]
pub async fn calling_code<G: ReverseGeocodeSource, R: RateSource>(
    State(state): State<Arc<AppState<G, R>>>,
    Path(country): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.service.calling_code_for_country(&country)?;
    Ok(Json(result))
}
