//! Currency converter with its detected country/currency state.

use storefront_types::{
    Coordinates, CountryCode, GeocodedAddress, RateSnapshot, RateSource, ReverseGeocodeSource,
    SourceError,
};
use tracing::{debug, warn};

use crate::countries::currency_for_country;
use crate::format::{NumberFormat, format_amount};
use crate::rates::{RateMerge, RateTable};
use crate::{BASE_CURRENCY, CurrencyCode, style_or_default, symbol_or_code};

/// Result of a rate refresh. Failures are reported, never raised.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    Updated(RateMerge),
    Failed(String),
}

impl RefreshOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, RefreshOutcome::Updated(_))
    }
}

/// Owned converter state: the rate table plus the detected locale.
///
/// `current_country` and `current_currency` change only on a successful
/// detection.
#[derive(Debug, Clone)]
pub struct CurrencyConverter {
    rates: RateTable,
    number_format: NumberFormat,
    current_country: Option<CountryCode>,
    current_currency: CurrencyCode,
}

impl Default for CurrencyConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl CurrencyConverter {
    pub fn new() -> Self {
        Self {
            rates: RateTable::defaults(),
            number_format: NumberFormat::default(),
            current_country: None,
            current_currency: BASE_CURRENCY,
        }
    }

    pub fn with_number_format(mut self, number_format: NumberFormat) -> Self {
        self.number_format = number_format;
        self
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn current_country(&self) -> Option<&CountryCode> {
        self.current_country.as_ref()
    }

    pub fn current_currency(&self) -> CurrencyCode {
        self.current_currency
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Conversion & formatting
    // ─────────────────────────────────────────────────────────────────────────

    /// Converts through the base currency. Unknown codes count as rate 1.0.
    ///
    /// Codes are matched case-insensitively, so `usd` and `USD` are the same
    /// currency and convert as identity.
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> f64 {
        if same_currency(from, to) {
            return amount;
        }
        let in_base = amount / self.rates.rate_or_identity(from);
        in_base * self.rates.rate_or_identity(to)
    }

    /// Formats `amount` with the currency's symbol and style.
    pub fn format(&self, amount: f64, currency: &str) -> String {
        format_amount(
            amount,
            style_or_default(currency),
            &symbol_or_code(currency),
            &self.number_format,
        )
    }

    pub fn currency_for_country(&self, country: &str) -> CurrencyCode {
        currency_for_country(country)
    }

    pub fn list_available_currencies(&self) -> Vec<CurrencyCode> {
        self.rates.codes()
    }

    /// Formats an EUR price in the currency of `country`.
    pub fn price_in_country_currency(&self, price_eur: f64, country: &str) -> String {
        let currency = currency_for_country(country);
        let converted = self.convert(price_eur, BASE_CURRENCY.code(), currency.code());
        self.format(converted, currency.code())
    }

    /// Formats an EUR price in every available currency, table order.
    pub fn price_in_all_currencies(&self, price_eur: f64) -> Vec<(CurrencyCode, String)> {
        self.list_available_currencies()
            .into_iter()
            .map(|c| {
                let converted = self.convert(price_eur, BASE_CURRENCY.code(), c.code());
                (c, self.format(converted, c.code()))
            })
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rate refresh
    // ─────────────────────────────────────────────────────────────────────────

    /// Fetches a snapshot from `source` and merges it into the table.
    pub async fn refresh_rates<S>(&mut self, source: &S) -> RefreshOutcome
    where
        S: RateSource + ?Sized,
    {
        let fetched = source.fetch_rates(BASE_CURRENCY.code()).await;
        self.apply_rate_fetch(fetched)
    }

    /// Applies the result of a fetch done elsewhere.
    ///
    /// Lets a caller fetch without holding a lock on the converter.
    pub fn apply_rate_fetch(&mut self, fetched: Result<RateSnapshot, SourceError>) -> RefreshOutcome {
        let snapshot = match fetched {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Could not refresh exchange rates: {}", e);
                return RefreshOutcome::Failed(e.to_string());
            }
        };

        if !snapshot.base.eq_ignore_ascii_case(BASE_CURRENCY.code()) {
            let reason = format!(
                "snapshot quoted against {} instead of {}",
                snapshot.base, BASE_CURRENCY
            );
            warn!("Could not refresh exchange rates: {}", reason);
            return RefreshOutcome::Failed(reason);
        }

        let (next, report) = self.rates.merged(&snapshot);
        debug!(
            updated = report.updated.len(),
            ignored = report.ignored.len(),
            rejected = report.rejected.len(),
            "Exchange rates refreshed"
        );
        self.rates = next;
        RefreshOutcome::Updated(report)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Country detection
    // ─────────────────────────────────────────────────────────────────────────

    /// Resolves the visitor's country and switches the current currency.
    ///
    /// Returns `None` and leaves state untouched on any failure.
    pub async fn detect_country<G>(&mut self, coords: Coordinates, geocoder: &G) -> Option<CountryCode>
    where
        G: ReverseGeocodeSource + ?Sized,
    {
        let address = geocoder.reverse(coords).await;
        self.apply_geocode(&address)
    }

    /// Applies a reverse-geocoding result obtained elsewhere.
    pub fn apply_geocode(
        &mut self,
        address: &Result<GeocodedAddress, SourceError>,
    ) -> Option<CountryCode> {
        let address = match address {
            Ok(address) => address,
            Err(e) => {
                warn!("Country detection failed: {}", e);
                return None;
            }
        };

        let country = match address.country_code.as_deref().map(CountryCode::parse) {
            Some(Ok(country)) => country,
            Some(Err(e)) => {
                warn!("Country detection failed: {}", e);
                return None;
            }
            None => {
                warn!("Country detection failed: {}", SourceError::MissingCountry);
                return None;
            }
        };

        self.current_currency = currency_for_country(country.as_str());
        self.current_country = Some(country.clone());
        debug!(country = %country, currency = %self.current_currency, "Country detected");
        Some(country)
    }
}

fn same_currency(from: &str, to: &str) -> bool {
    from == to
        || matches!(
            (CurrencyCode::parse(from), CurrencyCode::parse(to)),
            (Some(a), Some(b)) if a == b
        )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use super::*;

    struct FixedRates(Result<RateSnapshot, ()>);

    #[async_trait]
    impl RateSource for FixedRates {
        async fn fetch_rates(&self, _base: &str) -> Result<RateSnapshot, SourceError> {
            self.0
                .clone()
                .map_err(|_| SourceError::Transport("connection refused".into()))
        }
    }

    struct FixedGeocoder(Option<GeocodedAddress>);

    #[async_trait]
    impl ReverseGeocodeSource for FixedGeocoder {
        async fn reverse(&self, _coords: Coordinates) -> Result<GeocodedAddress, SourceError> {
            self.0
                .clone()
                .ok_or_else(|| SourceError::Transport("timed out".into()))
        }
    }

    fn address_in(country: &str) -> GeocodedAddress {
        GeocodedAddress {
            country_code: Some(country.to_string()),
            ..Default::default()
        }
    }

    fn abidjan() -> Coordinates {
        Coordinates::new(5.36, -4.01)
    }

    #[test]
    fn test_convert_same_currency_is_identity() {
        let converter = CurrencyConverter::new();
        for code in CurrencyCode::all() {
            assert_eq!(converter.convert(123.45, code.code(), code.code()), 123.45);
        }
        assert_eq!(converter.convert(7.0, "ZZZ", "ZZZ"), 7.0);
    }

    #[test]
    fn test_convert_identity_ignores_case() {
        let converter = CurrencyConverter::new();
        assert_eq!(converter.convert(3.3, "usd", "USD"), 3.3);
        assert_eq!(converter.convert(0.1, "Xof", "xOF"), 0.1);
    }

    #[test]
    fn test_convert_round_trip() {
        let converter = CurrencyConverter::new();
        for a in CurrencyCode::all() {
            for b in CurrencyCode::all() {
                let there = converter.convert(250.0, a.code(), b.code());
                let back = converter.convert(there, b.code(), a.code());
                assert!((back - 250.0).abs() < 1e-9, "{a} -> {b} -> {a} gave {back}");
            }
        }
    }

    #[test]
    fn test_convert_routes_through_base() {
        let converter = CurrencyConverter::new();
        let xof = converter.convert(10.0, "EUR", "XOF");
        assert!((xof - 6559.57).abs() < 1e-9);
        let usd = converter.convert(1.1, "USD", "EUR");
        assert!((usd - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_convert_unknown_code_uses_identity_rate() {
        let converter = CurrencyConverter::new();
        assert_eq!(converter.convert(42.0, "ZZZ", "EUR"), 42.0);
        assert!((converter.convert(42.0, "ZZZ", "USD") - 46.2).abs() < 1e-9);
    }

    #[test]
    fn test_format_styles() {
        let converter = CurrencyConverter::new();
        assert_eq!(converter.format(1234.5, "XOF"), "1,235 CFA");
        assert_eq!(converter.format(1234.5, "XAF"), "1,235 FCFA");
        assert_eq!(converter.format(1234.5, "USD"), "1234.50 $");
        assert_eq!(converter.format(1234.5, "KRW"), "1234.50 KRW");
        assert_eq!(converter.format(1234.5, "JPY"), "1234.50 ¥");
    }

    #[test]
    fn test_format_uses_configured_separator() {
        let converter = CurrencyConverter::new().with_number_format(NumberFormat::new(" "));
        assert_eq!(converter.format(65595.7, "XOF"), "65 596 CFA");
    }

    #[test]
    fn test_price_in_country_currency() {
        let converter = CurrencyConverter::new();
        assert_eq!(converter.price_in_country_currency(10.0, "SN"), "6,560 CFA");
        assert_eq!(converter.price_in_country_currency(10.0, "DE"), "10.00 €");
    }

    #[test]
    fn test_price_in_all_currencies_follows_table_order() {
        let converter = CurrencyConverter::new();
        let prices = converter.price_in_all_currencies(1.0);
        assert_eq!(prices.len(), CurrencyCode::all().len());
        assert_eq!(prices[0], (CurrencyCode::EUR, "1.00 €".to_string()));
        assert_eq!(prices[1], (CurrencyCode::XOF, "656 CFA".to_string()));
    }

    #[tokio::test]
    async fn test_refresh_never_adds_currencies() {
        let mut converter = CurrencyConverter::new();
        let before = converter.list_available_currencies();
        let rates = HashMap::from([("USD".to_string(), 1.09), ("SEK".to_string(), 11.2)]);
        let source = FixedRates(Ok(RateSnapshot::new("EUR", rates)));

        let outcome = converter.refresh_rates(&source).await;

        assert!(outcome.is_updated());
        assert_eq!(converter.list_available_currencies(), before);
        assert_eq!(converter.rates().rate_of("SEK"), None);
        assert_eq!(converter.rates().rate(CurrencyCode::USD), 1.09);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_table() {
        let mut converter = CurrencyConverter::new();
        let outcome = converter.refresh_rates(&FixedRates(Err(()))).await;

        assert!(matches!(outcome, RefreshOutcome::Failed(_)));
        assert_eq!(converter.rates(), &RateTable::defaults());
    }

    #[tokio::test]
    async fn test_refresh_rejects_foreign_base() {
        let mut converter = CurrencyConverter::new();
        let rates = HashMap::from([("EUR".to_string(), 0.9)]);
        let source = FixedRates(Ok(RateSnapshot::new("USD", rates)));

        let outcome = converter.refresh_rates(&source).await;

        assert!(matches!(outcome, RefreshOutcome::Failed(_)));
        assert_eq!(converter.rates(), &RateTable::defaults());
    }

    #[tokio::test]
    async fn test_detect_country_updates_state() {
        let mut converter = CurrencyConverter::new();
        let geocoder = FixedGeocoder(Some(address_in("ci")));

        let country = converter.detect_country(abidjan(), &geocoder).await;

        assert_eq!(country.as_ref().map(|c| c.as_str()), Some("CI"));
        assert_eq!(converter.current_country().map(|c| c.as_str()), Some("CI"));
        assert_eq!(converter.current_currency(), CurrencyCode::XOF);
    }

    #[tokio::test]
    async fn test_detect_unmapped_country_falls_back_to_base() {
        let mut converter = CurrencyConverter::new();
        converter
            .detect_country(abidjan(), &FixedGeocoder(Some(address_in("cm"))))
            .await;
        assert_eq!(converter.current_currency(), CurrencyCode::XAF);

        let country = converter
            .detect_country(abidjan(), &FixedGeocoder(Some(address_in("de"))))
            .await;
        assert_eq!(country.map(String::from), Some("DE".to_string()));
        assert_eq!(converter.current_currency(), CurrencyCode::EUR);
    }

    #[tokio::test]
    async fn test_detect_failure_leaves_state_unchanged() {
        let mut converter = CurrencyConverter::new();
        converter
            .detect_country(abidjan(), &FixedGeocoder(Some(address_in("NG"))))
            .await;

        let failed = converter.detect_country(abidjan(), &FixedGeocoder(None)).await;
        assert!(failed.is_none());
        assert_eq!(converter.current_currency(), CurrencyCode::NGN);

        let no_country = converter
            .detect_country(abidjan(), &FixedGeocoder(Some(GeocodedAddress::default())))
            .await;
        assert!(no_country.is_none());

        let garbage = converter
            .detect_country(abidjan(), &FixedGeocoder(Some(address_in("nowhere"))))
            .await;
        assert!(garbage.is_none());
        assert_eq!(converter.current_country().map(|c| c.as_str()), Some("NG"));
        assert_eq!(converter.current_currency(), CurrencyCode::NGN);
    }
}
