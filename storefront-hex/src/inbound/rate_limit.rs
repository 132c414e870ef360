//! Rate limiting middleware using Governor.
//!
//! Implements per-client rate limiting with a token bucket algorithm, keyed
//! by client IP address.

use axum::{
    Json,
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{Quota, RateLimiter, clock::DefaultClock, state::keyed::DashMapStateStore};
use serde_json::json;
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    num::NonZeroU32,
    sync::Arc,
};

/// Tracked clients above which idle entries are evicted.
const DEFAULT_MAX_TRACKED: usize = 10_000;

type KeyedLimiter = RateLimiter<IpAddr, DashMapStateStore<IpAddr>, DefaultClock>;

/// Rate limiter state shared across requests.
pub struct RateLimiterState {
    /// One bucket per client address
    limiter: KeyedLimiter,
    /// Whether `X-Forwarded-For` is set by a trusted reverse proxy
    trust_forwarded_for: bool,
    max_tracked: usize,
}

impl Default for RateLimiterState {
    fn default() -> Self {
        Self::new(NonZeroU32::new(100).unwrap_or(NonZeroU32::MIN))
    }
}

impl RateLimiterState {
    /// Creates a limiter allowing `requests_per_minute` per client.
    pub fn new(requests_per_minute: NonZeroU32) -> Self {
        Self {
            limiter: RateLimiter::dashmap(Quota::per_minute(requests_per_minute)),
            trust_forwarded_for: false,
            max_tracked: DEFAULT_MAX_TRACKED,
        }
    }

    /// Keys clients by the `X-Forwarded-For` entry of the proxy in front.
    ///
    /// Only enable this behind a reverse proxy that appends the header;
    /// otherwise any caller can pick its own key.
    pub fn trusting_forwarded_for(mut self, trust: bool) -> Self {
        self.trust_forwarded_for = trust;
        self
    }

    pub fn with_max_tracked(mut self, max_tracked: usize) -> Self {
        self.max_tracked = max_tracked;
        self
    }

    /// Checks if a request should be rate limited.
    /// Returns true if the request is allowed, false if rate limited.
    pub fn check(&self, client: IpAddr) -> bool {
        let allowed = self.limiter.check_key(&client).is_ok();
        if self.limiter.len() > self.max_tracked {
            self.prune();
        }
        allowed
    }

    /// Drops buckets that have fully refilled.
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Number of clients currently tracked.
    pub fn tracked(&self) -> usize {
        self.limiter.len()
    }

    /// Identifies the caller of `request`.
    ///
    /// The peer address, or the rightmost `X-Forwarded-For` entry when the
    /// proxy is trusted. Requests without either share the unspecified
    /// address.
    fn client_ip(&self, request: &Request<Body>) -> IpAddr {
        if self.trust_forwarded_for {
            if let Some(ip) = forwarded_ip(request) {
                return ip;
            }
        }
        request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
    }
}

fn forwarded_ip(request: &Request<Body>) -> Option<IpAddr> {
    request
        .headers()
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.rsplit(',').next())
        .and_then(|s| s.trim().parse().ok())
}

/// Rate limiting middleware.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiterState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // Skip rate limiting for health endpoint
    if request.uri().path() == "/health" {
        return next.run(request).await;
    }

    let client = limiter.client_ip(&request);
    if !limiter.check(client) {
        tracing::warn!(client = %client, "Rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "error": "Rate limit exceeded. Please try again later.",
                "retry_after_seconds": 60
            })),
        )
            .into_response();
    }

    next.run(request).await
}
