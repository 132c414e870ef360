//! Integration tests for the HTTP surface.
//!
//! These tests drive the router with `oneshot` requests against fixture
//! adapters, covering status codes, JSON shapes and rate limiting.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use storefront_hex::{
    StorefrontService,
    inbound::{HttpServer, RateLimiterState},
};
use storefront_types::{
    Coordinates, GeocodedAddress, RateSnapshot, RateSource, ReverseGeocodeSource, SourceError,
};
use tower::ServiceExt;

/// Geocoder that places every coordinate in Abidjan.
struct AbidjanGeocoder;

#[async_trait]
impl ReverseGeocodeSource for AbidjanGeocoder {
    async fn reverse(&self, _coords: Coordinates) -> Result<GeocodedAddress, SourceError> {
        Ok(GeocodedAddress {
            country_code: Some("ci".into()),
            country: Some("Côte d'Ivoire".into()),
            road: Some("Boulevard Latrille".into()),
            suburb: Some("Cocody".into()),
            city: Some("Abidjan".into()),
            ..Default::default()
        })
    }
}

/// Rate source that is either down or quotes a fixed USD rate.
struct FixedRates(Option<f64>);

#[async_trait]
impl RateSource for FixedRates {
    async fn fetch_rates(&self, base: &str) -> Result<RateSnapshot, SourceError> {
        match self.0 {
            Some(usd) => Ok(RateSnapshot::new(
                base,
                HashMap::from([("USD".to_string(), usd), ("SEK".to_string(), 11.0)]),
            )),
            None => Err(SourceError::Transport("connection refused".into())),
        }
    }
}

fn create_test_server(usd: Option<f64>) -> HttpServer<AbidjanGeocoder, FixedRates> {
    let service = StorefrontService::new(AbidjanGeocoder, FixedRates(usd));
    HttpServer::new(Arc::new(service))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = create_test_server(None).router();
    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "healthy");
}

#[tokio::test]
async fn test_list_currencies() {
    let app = create_test_server(None).router();
    let response = app.oneshot(get("/api/currencies")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    let list = json.as_array().unwrap();
    assert_eq!(list.len(), 19);
    assert_eq!(list[1]["code"], "XOF");
    assert_eq!(list[1]["symbol"], "CFA");
}

#[tokio::test]
async fn test_convert_and_format() {
    let app = create_test_server(None).router();

    let response = app
        .clone()
        .oneshot(get("/api/convert?amount=100&from=EUR&to=USD"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["formatted"], "110.00 $");

    let response = app
        .oneshot(get("/api/format?amount=1234567&currency=XAF"))
        .await
        .unwrap();
    assert_eq!(json_body(response).await["formatted"], "1,234,567 FCFA");
}

#[tokio::test]
async fn test_convert_rejects_missing_amount() {
    let app = create_test_server(None).router();
    let response = app
        .oneshot(get("/api/convert?from=EUR&to=USD"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_country_currency() {
    let app = create_test_server(None).router();

    let response = app
        .clone()
        .oneshot(get("/api/countries/ng/currency"))
        .await
        .unwrap();
    let json = json_body(response).await;
    assert_eq!(json["country"], "NG");
    assert_eq!(json["currency"], "NGN");
    assert_eq!(json["defaulted"], false);

    let response = app
        .oneshot(get("/api/countries/France/currency"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_locate_then_read_location() {
    let app = create_test_server(None).router();

    let response = app
        .clone()
        .oneshot(post_json("/api/location", r#"{"lat": 5.36, "lng": -4.0}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["country"], "CI");
    assert_eq!(json["currency"], "XOF");
    assert_eq!(json["delivery_label"], "Boulevard Latrille, Cocody, Abidjan");

    let response = app.oneshot(get("/api/location")).await.unwrap();
    let json = json_body(response).await;
    assert_eq!(json["currency"], "XOF");
}

#[tokio::test]
async fn test_locate_rejects_bad_coordinates() {
    let app = create_test_server(None).router();
    let response = app
        .oneshot(post_json("/api/location", r#"{"lat": 5.36, "lng": 200.0}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["code"], 400);
}

#[tokio::test]
async fn test_refresh_rates_success() {
    let app = create_test_server(Some(1.25)).router();

    let response = app
        .clone()
        .oneshot(post_json("/api/rates/refresh", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "UPDATED");
    assert_eq!(json["updated"], serde_json::json!(["USD"]));
    assert_eq!(json["ignored"], serde_json::json!(["SEK"]));

    let response = app
        .oneshot(get("/api/convert?amount=2&from=EUR&to=USD"))
        .await
        .unwrap();
    assert_eq!(json_body(response).await["formatted"], "2.50 $");
}

#[tokio::test]
async fn test_refresh_rates_failure_is_bad_gateway() {
    let app = create_test_server(None).router();
    let response = app
        .oneshot(post_json("/api/rates/refresh", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = json_body(response).await;
    assert_eq!(json["status"], "FAILED");
    assert!(json["error"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn test_phone_analysis() {
    let app = create_test_server(None).router();
    let response = app
        .oneshot(get("/api/phone?number=%2B233%2024%20123%204567"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["cleaned"], "+233241234567");
    assert_eq!(json["calling_code"], "+233");
    assert_eq!(json["country"]["country"], "GH");
    assert_eq!(json["valid"], true);
    assert_eq!(json["whatsapp"], "233241234567");
}

#[tokio::test]
async fn test_calling_code_lookup() {
    let app = create_test_server(None).router();

    let response = app
        .clone()
        .oneshot(get("/api/countries/sn/calling-code"))
        .await
        .unwrap();
    let json = json_body(response).await;
    assert_eq!(json["calling_code"], "+221");

    let response = app
        .oneshot(get("/api/countries/ZZ/calling-code"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = create_test_server(None).router();
    let response = app.oneshot(get("/api-docs/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert!(json["paths"]["/api/phone"].is_object());
}

#[tokio::test]
async fn test_rate_limiting_returns_429_when_exceeded() {
    let service = StorefrontService::new(AbidjanGeocoder, FixedRates(None));
    let server = HttpServer::with_rate_limit(Arc::new(service), NonZeroU32::new(2).unwrap());
    let app = server.router();

    for _ in 0..2 {
        let response = app.clone().oneshot(get("/api/currencies")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    let response = app.clone().oneshot(get("/api/currencies")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // Health stays reachable
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

fn from_peer(peer: &str, forwarded_for: &str) -> Request<Body> {
    let peer: SocketAddr = peer.parse().unwrap();
    let mut request = Request::builder()
        .uri("/api/currencies")
        .header("X-Forwarded-For", forwarded_for)
        .body(Body::empty())
        .unwrap();
    request.extensions_mut().insert(ConnectInfo(peer));
    request
}

#[tokio::test]
async fn test_forwarded_for_does_not_reset_the_limit() {
    let service = StorefrontService::new(AbidjanGeocoder, FixedRates(None));
    let limiter = RateLimiterState::new(NonZeroU32::new(2).unwrap());
    let app = HttpServer::with_rate_limiter(Arc::new(service), limiter).router();

    let mut statuses = Vec::new();
    for i in 0..5 {
        let request = from_peer("203.0.113.9:40000", &format!("10.0.0.{i}"));
        statuses.push(app.clone().oneshot(request).await.unwrap().status());
    }
    assert_eq!(statuses[..2], [StatusCode::OK, StatusCode::OK]);
    assert!(statuses[2..].iter().all(|s| *s == StatusCode::TOO_MANY_REQUESTS));

    // Another peer has its own bucket
    let response = app
        .oneshot(from_peer("203.0.113.10:40000", "10.0.0.0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_trusted_proxy_limits_each_forwarded_client() {
    let service = StorefrontService::new(AbidjanGeocoder, FixedRates(None));
    let limiter =
        RateLimiterState::new(NonZeroU32::new(1).unwrap()).trusting_forwarded_for(true);
    let app = HttpServer::with_rate_limiter(Arc::new(service), limiter).router();

    let first = app.clone().oneshot(from_peer("10.0.0.1:443", "198.51.100.1")).await.unwrap();
    let second = app.clone().oneshot(from_peer("10.0.0.1:443", "198.51.100.2")).await.unwrap();
    let repeat = app.oneshot(from_peer("10.0.0.1:443", "198.51.100.1")).await.unwrap();

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(repeat.status(), StatusCode::TOO_MANY_REQUESTS);
}
