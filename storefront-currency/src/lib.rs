//! Storefront Currency Library with Macro-Based Currency Table
//!
//! Currencies are declared once in the `define_currencies!` invocation below.
//! The macro generates the `CurrencyCode` enum together with its display
//! name, symbol, formatting style and default rate against the base
//! currency (EUR).
//!
//! # Adding a New Currency
//! Add a line to the `define_currencies!` invocation:
//! ```ignore
//! define_currencies! {
//!     // ... existing currencies ...
//!     CHF => ("CHF", "Swiss franc", "CHF", Decimal2, 0.95),
//! }
//! ```
//!
//! # Example
//! ```
//! use storefront_currency::{CurrencyConverter, CurrencyCode};
//!
//! let converter = CurrencyConverter::new();
//! let price = converter.convert(25.0, "EUR", "XOF");
//! println!("{}", converter.format(price, "XOF")); // 16,399 CFA
//!
//! assert_eq!(converter.currency_for_country("SN"), CurrencyCode::XOF);
//! ```

mod converter;
mod countries;
mod format;
mod rates;

pub use converter::{CurrencyConverter, RefreshOutcome};
pub use countries::{COUNTRY_CURRENCIES, currency_for_country, lookup_country_currency};
pub use format::{FormatStyle, NumberFormat, format_amount};
pub use rates::{RateMerge, RateTable};

/// The currency every rate is expressed against.
pub const BASE_CURRENCY: CurrencyCode = CurrencyCode::EUR;

/// Error returned when parsing an unknown currency code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown currency: {0}")]
pub struct UnknownCurrency(pub String);

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines all currencies and the CurrencyCode enum
// ─────────────────────────────────────────────────────────────────────────────

/// Macro to define the currency table.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     CODE => ("CODE", "Display name", "SYMBOL", FormatStyle, units_per_eur),
/// }
/// ```
#[macro_export]
macro_rules! define_currencies {
    (
        $(
            $name:ident => ($code:literal, $display:literal, $symbol:literal, $style:ident, $per_eur:expr)
        ),* $(,)?
    ) => {
        /// Currencies known to the storefront, in table order.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
        #[serde(rename_all = "UPPERCASE")]
        pub enum CurrencyCode {
            $($name),*
        }

        impl CurrencyCode {
            pub fn code(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $code),*
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $display),*
                }
            }

            pub fn symbol(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $symbol),*
                }
            }

            pub fn style(&self) -> $crate::FormatStyle {
                match self {
                    $(CurrencyCode::$name => $crate::FormatStyle::$style),*
                }
            }

            /// Hardcoded units of this currency per one EUR.
            pub fn default_rate(&self) -> f64 {
                match self {
                    $(CurrencyCode::$name => $per_eur),*
                }
            }

            pub fn all() -> &'static [CurrencyCode] {
                &[$(CurrencyCode::$name),*]
            }

            /// Case-insensitive lookup. `None` for codes outside the table.
            pub fn parse(s: &str) -> Option<CurrencyCode> {
                match s.trim().to_uppercase().as_str() {
                    $($code => Some(CurrencyCode::$name),)*
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for CurrencyCode {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.code())
            }
        }

        impl std::str::FromStr for CurrencyCode {
            type Err = $crate::UnknownCurrency;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                CurrencyCode::parse(s).ok_or_else(|| $crate::UnknownCurrency(s.to_string()))
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS - Add new currencies here!
// ─────────────────────────────────────────────────────────────────────────────

// Only the CFA francs render as whole units. JPY is quoted with two
// decimals like every other currency here, although the storefront's
// browser formatter used to round it (and KRW) to integers.
define_currencies! {
    EUR => ("EUR", "Euro", "€", Decimal2, 1.0),
    XOF => ("XOF", "West African CFA franc", "CFA", Integer, 655.957),
    XAF => ("XAF", "Central African CFA franc", "FCFA", Integer, 655.957),
    NGN => ("NGN", "Naira", "₦", Decimal2, 1600.0),
    GHS => ("GHS", "Cedi", "₵", Decimal2, 13.5),
    KES => ("KES", "Kenyan shilling", "KSh", Decimal2, 150.0),
    ZAR => ("ZAR", "Rand", "R", Decimal2, 20.0),
    EGP => ("EGP", "Egyptian pound", "E£", Decimal2, 50.0),
    MAD => ("MAD", "Moroccan dirham", "DH", Decimal2, 11.0),
    TND => ("TND", "Tunisian dinar", "DT", Decimal2, 3.3),
    DZD => ("DZD", "Algerian dinar", "DA", Decimal2, 145.0),
    USD => ("USD", "US dollar", "$", Decimal2, 1.1),
    GBP => ("GBP", "Pound sterling", "£", Decimal2, 0.85),
    CAD => ("CAD", "Canadian dollar", "C$", Decimal2, 1.5),
    AUD => ("AUD", "Australian dollar", "A$", Decimal2, 1.65),
    JPY => ("JPY", "Yen", "¥", Decimal2, 165.0),
    CNY => ("CNY", "Yuan", "¥", Decimal2, 8.0),
    INR => ("INR", "Indian rupee", "₹", Decimal2, 92.0),
    BRL => ("BRL", "Real", "R$", Decimal2, 5.5),
}

/// Display symbol for any code, falling back to the code itself.
pub fn symbol_or_code(code: &str) -> String {
    CurrencyCode::parse(code)
        .map(|c| c.symbol().to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Formatting style for any code, `Decimal2` when unknown.
pub fn style_or_default(code: &str) -> FormatStyle {
    CurrencyCode::parse(code)
        .map(|c| c.style())
        .unwrap_or_default()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
