//! Currencies and currency pairs.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// ISO 4217 currencies the rate provider is queried for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    EUR,
    USD,
    GBP,
    INR,
    JPY,
    CHF,
}

impl Currency {
    /// Returns the three-letter ISO code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::EUR => "EUR",
            Currency::USD => "USD",
            Currency::GBP => "GBP",
            Currency::INR => "INR",
            Currency::JPY => "JPY",
            Currency::CHF => "CHF",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A base/quote pair. Rates express how many `quote` units one `base` unit buys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct CurrencyPair {
    pub base: Currency,
    pub quote: Currency,
}

impl CurrencyPair {
    pub fn new(base: Currency, quote: Currency) -> Self {
        Self { base, quote }
    }
}

impl Default for CurrencyPair {
    /// EUR→USD, the only pair exposed over HTTP.
    fn default() -> Self {
        Self::new(Currency::EUR, Currency::USD)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pair_is_eur_usd() {
        let pair = CurrencyPair::default();
        assert_eq!(pair.base, Currency::EUR);
        assert_eq!(pair.quote, Currency::USD);
        assert_eq!(pair.to_string(), "EUR/USD");
    }

    #[test]
    fn test_currency_serializes_uppercase() {
        let json = serde_json::to_string(&Currency::GBP).unwrap();
        assert_eq!(json, "\"GBP\"");
    }
}
