//! Amount formatting per currency display conventions.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// How a currency renders amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FormatStyle {
    /// Rounded to a whole unit, thousands grouped.
    Integer,
    /// Fixed two decimals, no grouping.
    #[default]
    Decimal2,
}

impl FormatStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatStyle::Integer => "integer",
            FormatStyle::Decimal2 => "decimal2",
        }
    }
}

/// Locale-dependent pieces of number rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    thousands_separator: String,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::new(",")
    }
}

impl NumberFormat {
    pub fn new(thousands_separator: impl Into<String>) -> Self {
        Self {
            thousands_separator: thousands_separator.into(),
        }
    }

    pub fn thousands_separator(&self) -> &str {
        &self.thousands_separator
    }

    /// Groups an integer rendered in decimal, e.g. `"-65595"` → `"-65,595"`.
    pub fn group(&self, integer: &str) -> String {
        let (sign, digits) = match integer.strip_prefix('-') {
            Some(digits) => ("-", digits),
            None => ("", integer),
        };
        let mut grouped = String::with_capacity(integer.len() + digits.len() / 3);
        grouped.push_str(sign);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push_str(&self.thousands_separator);
            }
            grouped.push(ch);
        }
        grouped
    }
}

/// Nearest whole number, halves towards positive infinity.
fn round_half_up(amount: f64) -> f64 {
    let floor = amount.floor();
    let rounded = if amount - floor >= 0.5 { floor + 1.0 } else { floor };
    // Normalizes -0.0
    rounded + 0.0
}

/// Two decimals, exact ties rounded away from zero.
///
/// An f64 sits exactly on a tie of the second decimal only when it is a whole
/// number of eighths (x.125, x.375, ...); every other value is already
/// correctly rounded by `{:.2}`.
fn fixed2(amount: f64) -> String {
    let scaled = amount * 100.0;
    if (amount * 8.0).fract() == 0.0 && scaled.fract().abs() == 0.5 {
        let away = (scaled.abs() + 0.5).copysign(scaled);
        format!("{:.2}", away / 100.0)
    } else {
        format!("{:.2}", amount)
    }
}

/// Renders `amount` followed by a space and `symbol`.
pub fn format_amount(amount: f64, style: FormatStyle, symbol: &str, number: &NumberFormat) -> String {
    if !amount.is_finite() {
        return format!("{} {}", amount, symbol);
    }
    match style {
        FormatStyle::Integer => {
            let rounded = format!("{:.0}", round_half_up(amount));
            format!("{} {}", number.group(&rounded), symbol)
        }
        FormatStyle::Decimal2 => format!("{} {}", fixed2(amount), symbol),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        let nf = NumberFormat::default();
        assert_eq!(nf.group("0"), "0");
        assert_eq!(nf.group("999"), "999");
        assert_eq!(nf.group("1000"), "1,000");
        assert_eq!(nf.group("1234567"), "1,234,567");
        assert_eq!(nf.group("-65595"), "-65,595");
    }

    #[test]
    fn test_group_with_custom_separator() {
        let nf = NumberFormat::new("\u{202f}");
        assert_eq!(nf.group("16399"), "16\u{202f}399");
    }

    #[test]
    fn test_integer_style_rounds_half_up() {
        let nf = NumberFormat::default();
        assert_eq!(format_amount(1234.5, FormatStyle::Integer, "CFA", &nf), "1,235 CFA");
        assert_eq!(format_amount(-2.5, FormatStyle::Integer, "CFA", &nf), "-2 CFA");
        assert_eq!(format_amount(0.4, FormatStyle::Integer, "CFA", &nf), "0 CFA");
        assert_eq!(format_amount(-0.2, FormatStyle::Integer, "CFA", &nf), "0 CFA");
        assert_eq!(
            format_amount(0.49999999999999994, FormatStyle::Integer, "CFA", &nf),
            "0 CFA"
        );
    }

    #[test]
    fn test_integer_style_does_not_saturate() {
        let nf = NumberFormat::default();
        assert_eq!(
            format_amount(1e19, FormatStyle::Integer, "CFA", &nf),
            "10,000,000,000,000,000,000 CFA"
        );
        let huge = format_amount(1e300, FormatStyle::Integer, "CFA", &nf);
        assert!(huge.starts_with("1,000,000,000,000,000,052,504"));
        assert_eq!(huge.matches(',').count(), 100);
    }

    #[test]
    fn test_decimal2_style() {
        let nf = NumberFormat::default();
        assert_eq!(format_amount(1234.5, FormatStyle::Decimal2, "$", &nf), "1234.50 $");
        assert_eq!(format_amount(3.0, FormatStyle::Decimal2, "€", &nf), "3.00 €");
    }

    #[test]
    fn test_decimal2_ties_round_away_from_zero() {
        let nf = NumberFormat::default();
        assert_eq!(format_amount(0.125, FormatStyle::Decimal2, "$", &nf), "0.13 $");
        assert_eq!(format_amount(10.125, FormatStyle::Decimal2, "$", &nf), "10.13 $");
        assert_eq!(format_amount(2.675, FormatStyle::Decimal2, "$", &nf), "2.67 $");
        assert_eq!(format_amount(-0.125, FormatStyle::Decimal2, "$", &nf), "-0.13 $");
        assert_eq!(format_amount(1.005, FormatStyle::Decimal2, "$", &nf), "1.00 $");
    }

    #[test]
    fn test_non_finite_amounts_do_not_panic() {
        let nf = NumberFormat::default();
        assert_eq!(format_amount(f64::NAN, FormatStyle::Integer, "CFA", &nf), "NaN CFA");
    }
}
