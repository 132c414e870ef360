//! Configuration loading from environment.

use std::env;
use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use storefront_adapters::{exchange_rates::DEFAULT_RATES_URL, nominatim::DEFAULT_NOMINATIM_URL};
use storefront_phone::DoubleZeroPolicy;

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub nominatim_url: String,
    pub rates_url: String,
    pub user_agent: String,
    pub http_timeout: Duration,
    pub geocoder_max_per_second: NonZeroU32,
    /// `None` disables the background refresh.
    pub rate_refresh: Option<Duration>,
    pub thousands_separator: String,
    pub requests_per_minute: NonZeroU32,
    /// Key rate limits on `X-Forwarded-For`; only behind a reverse proxy.
    pub trust_forwarded_for: bool,
    pub phone_double_zero: DoubleZeroPolicy,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let string = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let refresh_secs: u64 = parse(&lookup, "RATE_REFRESH_SECS", 0)?;
        let timeout_secs: u64 = parse(&lookup, "HTTP_TIMEOUT_SECS", 10)?;

        Ok(Self {
            port: parse(&lookup, "PORT", 3000)?,
            nominatim_url: string("NOMINATIM_URL", DEFAULT_NOMINATIM_URL),
            rates_url: string("RATES_URL", DEFAULT_RATES_URL),
            user_agent: string(
                "HTTP_USER_AGENT",
                concat!("storefront-locale/", env!("CARGO_PKG_VERSION")),
            ),
            http_timeout: Duration::from_secs(timeout_secs),
            geocoder_max_per_second: parse(&lookup, "GEOCODER_MAX_PER_SECOND", NonZeroU32::MIN)?,
            rate_refresh: (refresh_secs > 0).then(|| Duration::from_secs(refresh_secs)),
            thousands_separator: string("THOUSANDS_SEPARATOR", ","),
            requests_per_minute: parse(
                &lookup,
                "REQUESTS_PER_MINUTE",
                NonZeroU32::new(100).unwrap_or(NonZeroU32::MIN),
            )?,
            trust_forwarded_for: parse(&lookup, "TRUST_FORWARDED_FOR", false)?,
            phone_double_zero: double_zero_policy(lookup("PHONE_DOUBLE_ZERO"))?,
        })
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}

fn double_zero_policy(raw: Option<String>) -> anyhow::Result<DoubleZeroPolicy> {
    match raw.as_deref().map(str::trim) {
        None | Some("strip") => Ok(DoubleZeroPolicy::StripCallingCode),
        Some("literal") => Ok(DoubleZeroPolicy::Literal),
        Some(other) => bail!("PHONE_DOUBLE_ZERO must be \"strip\" or \"literal\", got {other:?}"),
    }
}
