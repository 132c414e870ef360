//! Country to currency mapping.

use crate::{BASE_CURRENCY, CurrencyCode};

/// Currency used in each supported country (ISO 3166-1 alpha-2).
pub const COUNTRY_CURRENCIES: &[(&str, CurrencyCode)] = &[
    // West African CFA franc
    ("CI", CurrencyCode::XOF),
    ("SN", CurrencyCode::XOF),
    ("ML", CurrencyCode::XOF),
    ("BF", CurrencyCode::XOF),
    ("NE", CurrencyCode::XOF),
    ("TG", CurrencyCode::XOF),
    ("BJ", CurrencyCode::XOF),
    ("GW", CurrencyCode::XOF),
    ("GN", CurrencyCode::XOF),
    ("MR", CurrencyCode::XOF),
    // Central African CFA franc
    ("CM", CurrencyCode::XAF),
    ("TD", CurrencyCode::XAF),
    ("CF", CurrencyCode::XAF),
    ("GA", CurrencyCode::XAF),
    ("CG", CurrencyCode::XAF),
    ("CD", CurrencyCode::XAF),
    ("GQ", CurrencyCode::XAF),
    ("ST", CurrencyCode::XAF),
    ("NG", CurrencyCode::NGN),
    ("GH", CurrencyCode::GHS),
    ("KE", CurrencyCode::KES),
    ("UG", CurrencyCode::KES),
    ("TZ", CurrencyCode::KES),
    ("ZA", CurrencyCode::ZAR),
    ("BW", CurrencyCode::ZAR),
    ("NA", CurrencyCode::ZAR),
    ("SZ", CurrencyCode::ZAR),
    ("LS", CurrencyCode::ZAR),
    ("EG", CurrencyCode::EGP),
    ("SD", CurrencyCode::EGP),
    ("MA", CurrencyCode::MAD),
    ("TN", CurrencyCode::TND),
    ("DZ", CurrencyCode::DZD),
    ("FR", CurrencyCode::EUR),
    ("BE", CurrencyCode::EUR),
    ("CH", CurrencyCode::EUR),
    ("US", CurrencyCode::USD),
    ("CA", CurrencyCode::USD),
    ("GB", CurrencyCode::GBP),
    ("JP", CurrencyCode::JPY),
    ("CN", CurrencyCode::CNY),
    ("IN", CurrencyCode::INR),
    ("BR", CurrencyCode::BRL),
];

/// Case-insensitive lookup. `None` for unmapped countries.
pub fn lookup_country_currency(country: &str) -> Option<CurrencyCode> {
    let country = country.trim();
    COUNTRY_CURRENCIES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(country))
        .map(|(_, currency)| *currency)
}

/// Currency for a country, the base currency when unmapped.
pub fn currency_for_country(country: &str) -> CurrencyCode {
    lookup_country_currency(country).unwrap_or(BASE_CURRENCY)
}
