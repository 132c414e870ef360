//! Phone number normalization against the calling-code table.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::calling_codes::{CALLING_CODES, CallingCodeEntry};

/// Digit count bounds of a dialable number (E.164 allows up to 15).
pub const MIN_DIGITS: usize = 7;
pub const MAX_DIGITS: usize = 15;

/// A calling code from the table, e.g. `+225`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallingCode(&'static str);

impl CallingCode {
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// The code without its leading `+`.
    pub fn digits(&self) -> &'static str {
        &self.0[1..]
    }
}

impl std::fmt::Display for CallingCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl PartialEq<&str> for CallingCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Why a number was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhoneError {
    #[error("Phone number must contain between 7 and 15 digits (got {0})")]
    TooShort(usize),

    #[error("Phone number must contain between 7 and 15 digits (got {0})")]
    TooLong(usize),
}

/// Outcome of `PhoneNormalizer::validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Validation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<(), PhoneError>> for Validation {
    fn from(result: Result<(), PhoneError>) -> Self {
        match result {
            Ok(()) => Validation {
                valid: true,
                error: None,
            },
            Err(e) => Validation {
                valid: false,
                error: Some(e.to_string()),
            },
        }
    }
}

/// How the national part of a `00`-prefixed number is derived.
///
/// `+` numbers are unaffected: both policies treat them alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DoubleZeroPolicy {
    /// `00` and the calling-code digits are removed, as for the `+` form:
    /// `0022507000000` → national part `07000000`.
    #[default]
    StripCallingCode,
    /// Removes the first occurrence of the `+`-prefixed calling code (absent
    /// from a `00` number) and then a leading `00`, so the calling-code digits
    /// stay in the national part: `0022507000000` → `22507000000`.
    /// Matches the storefront's historical WhatsApp links.
    Literal,
}

/// Removes spaces, hyphens, periods and parentheses.
///
/// A leading `+` or `00` is kept.
pub fn clean(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '.' | '(' | ')'))
        .collect()
}

/// Cleans, recognizes and formats phone numbers.
///
/// Nothing here fails: unresolvable input degrades to `None`, the cleaned
/// input, or a best-effort string.
#[derive(Debug, Clone)]
pub struct PhoneNormalizer {
    entries: &'static [CallingCodeEntry],
    double_zero: DoubleZeroPolicy,
    /// Distinct calling codes, longest first, table order within a length.
    by_length: Vec<CallingCode>,
}

impl Default for PhoneNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PhoneNormalizer {
    pub fn new() -> Self {
        Self::with_table(CALLING_CODES)
    }

    pub fn with_table(entries: &'static [CallingCodeEntry]) -> Self {
        let mut by_length: Vec<CallingCode> = Vec::with_capacity(entries.len());
        for e in entries {
            if !by_length.iter().any(|c| c.0 == e.calling_code) {
                by_length.push(CallingCode(e.calling_code));
            }
        }
        // Stable: equal lengths keep table order.
        by_length.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self {
            entries,
            double_zero: DoubleZeroPolicy::default(),
            by_length,
        }
    }

    pub fn with_double_zero_policy(mut self, policy: DoubleZeroPolicy) -> Self {
        self.double_zero = policy;
        self
    }

    pub fn double_zero_policy(&self) -> DoubleZeroPolicy {
        self.double_zero
    }

    pub fn entries(&self) -> &'static [CallingCodeEntry] {
        self.entries
    }

    pub fn clean(&self, raw: &str) -> String {
        clean(raw)
    }

    /// Longest calling code the number starts with, in `+` or `00` form.
    pub fn detect_calling_code(&self, raw: &str) -> Option<CallingCode> {
        self.split_international(&clean(raw)).map(|(code, _)| code)
    }

    pub fn validate(&self, raw: &str) -> Validation {
        let digits = clean(raw).chars().filter(char::is_ascii_digit).count();
        let result = if digits < MIN_DIGITS {
            Err(PhoneError::TooShort(digits))
        } else if digits > MAX_DIGITS {
            Err(PhoneError::TooLong(digits))
        } else {
            Ok(())
        };
        result.into()
    }

    /// Digits only, ready for a `wa.me/` link.
    ///
    /// `+` numbers lose the `+` and nothing else. `00` numbers become calling
    /// code plus national part, the latter following the `DoubleZeroPolicy`.
    /// Other numbers lose one leading trunk `0`; no calling code is attached
    /// to them.
    pub fn format_for_whatsapp(&self, raw: &str) -> String {
        let cleaned = clean(raw);
        if let Some(rest) = cleaned.strip_prefix('+') {
            return rest.to_string();
        }
        if let Some((code, national)) = self.split_international(&cleaned) {
            return format!("{}{}", code.digits(), self.national_part(&cleaned, code, national));
        }
        match cleaned.strip_prefix('0') {
            Some(rest) => rest.to_string(),
            None => cleaned,
        }
    }

    /// Country owning the number's calling code.
    pub fn country_info(&self, raw: &str) -> Option<&'static CallingCodeEntry> {
        self.detect_calling_code(raw)
            .and_then(|code| self.entry_for_calling_code(code))
    }

    /// `"<flag> <calling code> <national part>"`, or the cleaned input.
    pub fn format_readable(&self, raw: &str) -> String {
        let cleaned = clean(raw);
        match self.split_international(&cleaned) {
            Some((code, national)) => match self.entry_for_calling_code(code) {
                Some(entry) => format!(
                    "{} {} {}",
                    entry.flag,
                    code,
                    self.national_part(&cleaned, code, national)
                ),
                None => cleaned,
            },
            None => cleaned,
        }
    }

    /// Preferred entry for a calling code.
    pub fn entry_for_calling_code(&self, code: CallingCode) -> Option<&'static CallingCodeEntry> {
        self.entries
            .iter()
            .filter(|e| e.calling_code == code.as_str())
            .min_by_key(|e| e.priority)
    }

    /// Entry for a country code, case-insensitive.
    pub fn entry_for_country(&self, country: &str) -> Option<&'static CallingCodeEntry> {
        let country = country.trim();
        self.entries
            .iter()
            .find(|e| e.country.eq_ignore_ascii_case(country))
    }

    fn national_part(&self, cleaned: &str, code: CallingCode, split: &str) -> String {
        if cleaned.starts_with('+') || self.double_zero == DoubleZeroPolicy::StripCallingCode {
            return split.to_string();
        }
        let without_code = cleaned.replacen(code.as_str(), "", 1);
        match without_code.strip_prefix("00") {
            Some(rest) => rest.to_string(),
            None => without_code,
        }
    }

    /// Splits a cleaned `+…`/`00…` number into calling code and national part.
    fn split_international<'a>(&self, cleaned: &'a str) -> Option<(CallingCode, &'a str)> {
        let rest = cleaned
            .strip_prefix('+')
            .or_else(|| cleaned.strip_prefix("00"))?;
        self.by_length
            .iter()
            .find(|code| rest.starts_with(code.digits()))
            .map(|&code| (code, &rest[code.digits().len()..]))
    }
}
