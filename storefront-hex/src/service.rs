//! Storefront Application Service
//!
//! Orchestrates the currency converter, the phone normalizer and the two
//! outbound ports. Contains NO infrastructure logic.

use storefront_currency::{BASE_CURRENCY, CurrencyConverter, RefreshOutcome, lookup_country_currency};
use storefront_phone::{CallingCodeEntry, PhoneNormalizer};
use storefront_types::{
    AppError, CallingCodeInfo, ConvertQuery, ConvertResponse, Coordinates, CountryCode,
    CountryCurrencyResponse, CurrencyInfo, FormatQuery, FormatResponse, LocationResponse,
    LocationState, PhoneResponse, RateSource, RefreshResponse, RefreshStatus,
    ReverseGeocodeSource,
};
use tokio::sync::RwLock;

/// Application service for the storefront locale operations.
///
/// Generic over the geocoder and rate source so tests can inject fixtures.
/// The converter sits behind a lock that is never held across a network
/// call: fetch first, then apply.
pub struct StorefrontService<G: ReverseGeocodeSource, R: RateSource> {
    geocoder: G,
    rate_source: R,
    converter: RwLock<CurrencyConverter>,
    phone: PhoneNormalizer,
}

impl<G: ReverseGeocodeSource, R: RateSource> StorefrontService<G, R> {
    /// Creates a service with the default currency table.
    pub fn new(geocoder: G, rate_source: R) -> Self {
        Self::with_converter(geocoder, rate_source, CurrencyConverter::new())
    }

    pub fn with_converter(geocoder: G, rate_source: R, converter: CurrencyConverter) -> Self {
        Self {
            geocoder,
            rate_source,
            converter: RwLock::new(converter),
            phone: PhoneNormalizer::new(),
        }
    }

    /// Replaces the phone normalizer, e.g. to change its `00` policy.
    pub fn with_phone_normalizer(mut self, phone: PhoneNormalizer) -> Self {
        self.phone = phone;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Currency Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists the currency table with current rates.
    pub async fn list_currencies(&self) -> Vec<CurrencyInfo> {
        let converter = self.converter.read().await;
        converter
            .list_available_currencies()
            .into_iter()
            .map(|c| CurrencyInfo {
                code: c.code().to_string(),
                name: c.name().to_string(),
                symbol: c.symbol().to_string(),
                style: c.style().as_str().to_string(),
                rate: converter.rates().rate(c),
            })
            .collect()
    }

    /// Converts an amount and formats it in the target currency.
    pub async fn convert(&self, query: ConvertQuery) -> Result<ConvertResponse, AppError> {
        ensure_finite(query.amount)?;
        let converter = self.converter.read().await;
        let converted = converter.convert(query.amount, &query.from, &query.to);
        let formatted = converter.format(converted, &query.to);
        Ok(ConvertResponse {
            amount: query.amount,
            from: query.from,
            to: query.to,
            converted,
            formatted,
        })
    }

    pub async fn format(&self, query: FormatQuery) -> Result<FormatResponse, AppError> {
        ensure_finite(query.amount)?;
        let formatted = self.converter.read().await.format(query.amount, &query.currency);
        Ok(FormatResponse {
            currency: query.currency,
            formatted,
        })
    }

    /// Currency for a country, flagging whether the base currency was used.
    pub fn country_currency(&self, country: &str) -> Result<CountryCurrencyResponse, AppError> {
        let country = CountryCode::parse(country)?;
        let found = lookup_country_currency(country.as_str());
        Ok(CountryCurrencyResponse {
            currency: found.unwrap_or(BASE_CURRENCY).code().to_string(),
            defaulted: found.is_none(),
            country,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Location Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Detects the visitor's country from coordinates.
    ///
    /// Geocoder failures are not errors: the response simply carries no
    /// country and the previous currency.
    pub async fn locate(&self, coords: Coordinates) -> Result<LocationResponse, AppError> {
        validate_coordinates(coords)?;

        let address = self.geocoder.reverse(coords).await;
        let delivery_label = match &address {
            Ok(address) => address.delivery_label(coords),
            Err(_) => coords.label(),
        };

        let mut converter = self.converter.write().await;
        let country = converter.apply_geocode(&address);
        Ok(LocationResponse {
            country,
            currency: converter.current_currency().code().to_string(),
            delivery_label,
        })
    }

    /// Current detected country and currency.
    pub async fn location(&self) -> LocationState {
        let converter = self.converter.read().await;
        LocationState {
            country: converter.current_country().cloned(),
            currency: converter.current_currency().code().to_string(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Rate Refresh
    // ─────────────────────────────────────────────────────────────────────────────

    /// Pulls a fresh snapshot from the rate source and merges it.
    pub async fn refresh_rates(&self) -> RefreshResponse {
        let fetched = self.rate_source.fetch_rates(BASE_CURRENCY.code()).await;

        let mut converter = self.converter.write().await;
        match converter.apply_rate_fetch(fetched) {
            RefreshOutcome::Updated(report) => RefreshResponse {
                status: RefreshStatus::Updated,
                updated: report.updated.iter().map(|c| c.code().to_string()).collect(),
                ignored: report.ignored,
                updated_at: converter.rates().updated_at(),
                error: None,
            },
            RefreshOutcome::Failed(reason) => RefreshResponse {
                status: RefreshStatus::Failed,
                updated: Vec::new(),
                ignored: Vec::new(),
                updated_at: converter.rates().updated_at(),
                error: Some(reason),
            },
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Phone Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Runs every phone operation over one number.
    pub fn analyze_phone(&self, number: &str) -> PhoneResponse {
        let validation = self.phone.validate(number);
        PhoneResponse {
            cleaned: self.phone.clean(number),
            calling_code: self
                .phone
                .detect_calling_code(number)
                .map(|c| c.as_str().to_string()),
            country: self.phone.country_info(number).map(calling_code_info),
            valid: validation.valid,
            error: validation.error,
            whatsapp: self.phone.format_for_whatsapp(number),
            readable: self.phone.format_readable(number),
        }
    }

    /// Calling-code entry for a country.
    pub fn calling_code_for_country(&self, country: &str) -> Result<CallingCodeInfo, AppError> {
        let country = CountryCode::parse(country)?;
        self.phone
            .entry_for_country(country.as_str())
            .map(calling_code_info)
            .ok_or_else(|| AppError::NotFound(format!("No calling code for {}", country)))
    }
}

fn calling_code_info(entry: &CallingCodeEntry) -> CallingCodeInfo {
    CallingCodeInfo {
        country: entry.country.to_string(),
        calling_code: entry.calling_code.to_string(),
        name: entry.name.to_string(),
        flag: entry.flag.to_string(),
    }
}

fn ensure_finite(amount: f64) -> Result<(), AppError> {
    if amount.is_finite() {
        Ok(())
    } else {
        Err(AppError::BadRequest("Amount must be a finite number".into()))
    }
}

fn validate_coordinates(coords: Coordinates) -> Result<(), AppError> {
    let lat_ok = coords.lat.is_finite() && (-90.0..=90.0).contains(&coords.lat);
    let lng_ok = coords.lng.is_finite() && (-180.0..=180.0).contains(&coords.lng);
    if lat_ok && lng_ok {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "Coordinates out of range: {}, {}",
            coords.lat, coords.lng
        )))
    }
}
