//! HTTP Server configuration and startup.

use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use storefront_types::{RateSource, ReverseGeocodeSource};

use super::handlers::{self, AppState};
use super::rate_limit::{RateLimiterState, rate_limit_middleware};
use crate::StorefrontService;

/// HTTP Server for the storefront API.
pub struct HttpServer<G: ReverseGeocodeSource, R: RateSource> {
    state: Arc<AppState<G, R>>,
    rate_limiter: Arc<RateLimiterState>,
}

impl<G: ReverseGeocodeSource, R: RateSource> HttpServer<G, R> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: Arc<StorefrontService<G, R>>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
            rate_limiter: Arc::new(RateLimiterState::default()), // 100 req/min default
        }
    }

    /// Creates a new HTTP server with custom rate limiting.
    pub fn with_rate_limit(
        service: Arc<StorefrontService<G, R>>,
        requests_per_minute: NonZeroU32,
    ) -> Self {
        Self::with_rate_limiter(service, RateLimiterState::new(requests_per_minute))
    }

    /// Creates a new HTTP server with a preconfigured rate limiter.
    pub fn with_rate_limiter(
        service: Arc<StorefrontService<G, R>>,
        rate_limiter: RateLimiterState,
    ) -> Self {
        Self {
            state: Arc::new(AppState { service }),
            rate_limiter: Arc::new(rate_limiter),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api-docs/openapi.json", get(handlers::openapi_json))
            .route("/api/currencies", get(handlers::list_currencies::<G, R>))
            .route("/api/convert", get(handlers::convert::<G, R>))
            .route("/api/format", get(handlers::format::<G, R>))
            .route(
                "/api/countries/{country}/currency",
                get(handlers::country_currency::<G, R>),
            )
            .route(
                "/api/countries/{country}/calling-code",
                get(handlers::calling_code::<G, R>),
            )
            .route("/api/location", post(handlers::locate::<G, R>))
            .route("/api/location", get(handlers::location::<G, R>))
            .route("/api/rates/refresh", post(handlers::refresh_rates::<G, R>))
            .route("/api/phone", get(handlers::phone::<G, R>))
            .layer(middleware::from_fn_with_state(
                self.rate_limiter.clone(),
                rate_limit_middleware,
            ))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(
            listener,
            self.router()
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
