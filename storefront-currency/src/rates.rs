//! The refreshable rate table.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use storefront_types::RateSnapshot;

use crate::{BASE_CURRENCY, CurrencyCode};

/// Units of each known currency per one unit of the base currency.
///
/// Always total over `CurrencyCode::all()`; the base currency is pinned at 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    rates: HashMap<CurrencyCode, f64>,
    updated_at: Option<DateTime<Utc>>,
}

/// What a merge did with each code of a snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateMerge {
    /// Known codes whose rate was overwritten.
    pub updated: Vec<CurrencyCode>,
    /// Codes quoted by the provider but absent from the table.
    pub ignored: Vec<String>,
    /// Known codes quoted with a non-finite or non-positive rate.
    pub rejected: Vec<CurrencyCode>,
}

impl Default for RateTable {
    fn default() -> Self {
        Self::defaults()
    }
}

impl RateTable {
    /// The hardcoded rates from the currency table.
    pub fn defaults() -> Self {
        Self {
            rates: CurrencyCode::all()
                .iter()
                .map(|&c| (c, c.default_rate()))
                .collect(),
            updated_at: None,
        }
    }

    /// Rate of a known currency.
    pub fn rate(&self, code: CurrencyCode) -> f64 {
        self.rates
            .get(&code)
            .copied()
            .unwrap_or_else(|| code.default_rate())
    }

    /// Rate for a raw code, `None` when the code is unknown.
    pub fn rate_of(&self, code: &str) -> Option<f64> {
        CurrencyCode::parse(code).map(|c| self.rate(c))
    }

    /// Rate for a raw code, 1.0 when the code is unknown.
    pub fn rate_or_identity(&self, code: &str) -> f64 {
        self.rate_of(code).unwrap_or(1.0)
    }

    /// Known codes in declaration order.
    pub fn codes(&self) -> Vec<CurrencyCode> {
        CurrencyCode::all().to_vec()
    }

    /// When the table was last refreshed from a provider.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns a new table with the snapshot's known codes applied.
    ///
    /// Unknown codes are ignored, missing codes keep their rate and the base
    /// currency stays at 1.0. The snapshot must be quoted against the base
    /// currency; callers check that before merging.
    pub fn merged(&self, snapshot: &RateSnapshot) -> (RateTable, RateMerge) {
        let mut next = self.clone();
        let mut report = RateMerge::default();

        let mut quoted: Vec<(&String, &f64)> = snapshot.rates.iter().collect();
        quoted.sort_by(|a, b| a.0.cmp(b.0));

        for (raw, &rate) in quoted {
            let Some(code) = CurrencyCode::parse(raw) else {
                report.ignored.push(raw.clone());
                continue;
            };
            if code == BASE_CURRENCY {
                continue;
            }
            if !rate.is_finite() || rate <= 0.0 {
                report.rejected.push(code);
                continue;
            }
            next.rates.insert(code, rate);
            report.updated.push(code);
        }

        report
            .updated
            .sort_by_key(|c| CurrencyCode::all().iter().position(|k| k == c));
        next.updated_at = Some(snapshot.updated_at.unwrap_or_else(Utc::now));
        (next, report)
    }
}
