//! Core type definitions

use alloy_primitives::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{normalize_price, to_iso8601, ErrorKind, OracleError, OracleResult, USD_PRICE_DECIMALS};

/// Ticker-style identifier of a tracked asset
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Everything the oracle returns for one symbol, before normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuote {
    pub raw_price: U256,
    pub decimals: u8,
    pub description: String,
    /// Seconds since the Unix epoch
    pub updated_at: u64,
}

impl RawQuote {
    /// Scale the raw price and convert the timestamp
    pub fn normalize(self, symbol: Symbol) -> OracleResult<NormalizedQuote> {
        let price = normalize_price(self.raw_price, self.decimals)?;
        let updated_at_iso = to_iso8601(self.updated_at)?;

        Ok(NormalizedQuote {
            symbol,
            description: self.description,
            price,
            updated_at_iso,
            raw_price: self.raw_price,
            decimals: self.decimals,
            updated_at: self.updated_at,
        })
    }
}

/// Human-readable quote for one symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedQuote {
    pub symbol: Symbol,
    pub description: String,
    /// `raw_price / 10^decimals` with two fractional digits
    pub price: String,
    pub updated_at_iso: String,
    pub raw_price: U256,
    pub decimals: u8,
    pub updated_at: u64,
}

impl NormalizedQuote {
    /// Normalized price as a decimal, if it fits in 96 bits of mantissa
    pub fn price_decimal(&self) -> Option<Decimal> {
        self.price.parse().ok()
    }
}

/// Isolated failure for one symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchError {
    pub symbol: Symbol,
    pub kind: ErrorKind,
    pub message: String,
}

impl FetchError {
    pub fn new(symbol: Symbol, err: &OracleError) -> Self {
        Self {
            symbol,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} error): {}", self.symbol, self.kind, self.message)
    }
}

/// Result of querying one symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum QueryOutcome {
    Quote(NormalizedQuote),
    Failed(FetchError),
}

impl QueryOutcome {
    /// Build the outcome for a symbol from its raw read result
    pub fn from_raw(symbol: Symbol, raw: OracleResult<RawQuote>) -> Self {
        match raw.and_then(|quote| quote.normalize(symbol.clone())) {
            Ok(quote) => QueryOutcome::Quote(quote),
            Err(e) => QueryOutcome::Failed(FetchError::new(symbol, &e)),
        }
    }

    pub fn symbol(&self) -> &Symbol {
        match self {
            QueryOutcome::Quote(q) => &q.symbol,
            QueryOutcome::Failed(e) => &e.symbol,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, QueryOutcome::Quote(_))
    }

    pub fn quote(&self) -> Option<&NormalizedQuote> {
        match self {
            QueryOutcome::Quote(q) => Some(q),
            QueryOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            QueryOutcome::Quote(_) => None,
            QueryOutcome::Failed(e) => Some(e),
        }
    }
}

/// Price from the fixed-scale `getPriceInUSD` path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsdPrice {
    pub symbol: Symbol,
    pub price: String,
    pub raw_price: U256,
}

/// Result of querying one symbol's USD price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum UsdOutcome {
    Price(UsdPrice),
    Failed(FetchError),
}

impl UsdOutcome {
    pub fn from_raw(symbol: Symbol, raw: OracleResult<U256>) -> Self {
        let priced = raw.and_then(|raw_price| {
            normalize_price(raw_price, USD_PRICE_DECIMALS).map(|price| (raw_price, price))
        });

        match priced {
            Ok((raw_price, price)) => UsdOutcome::Price(UsdPrice {
                symbol,
                price,
                raw_price,
            }),
            Err(e) => UsdOutcome::Failed(FetchError::new(symbol, &e)),
        }
    }

    pub fn symbol(&self) -> &Symbol {
        match self {
            UsdOutcome::Price(p) => &p.symbol,
            UsdOutcome::Failed(e) => &e.symbol,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UsdOutcome::Price(_))
    }
}

/// Success and failure counts for one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[QueryOutcome]) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            total: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} feeds ok, {} failed",
            self.succeeded, self.total, self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn raw(price: u64, decimals: u8, updated_at: u64) -> RawQuote {
        RawQuote {
            raw_price: U256::from(price),
            decimals,
            description: "ETH / USD".to_string(),
            updated_at,
        }
    }

    #[test]
    fn test_normalize_raw_quote() {
        let quote = raw(123456, 4, 1_700_000_000).normalize("ETH".into()).unwrap();

        assert_eq!(quote.symbol.as_str(), "ETH");
        assert_eq!(quote.price, "12.35");
        assert_eq!(quote.updated_at_iso, "2023-11-14T22:13:20.000Z");
        assert_eq!(quote.raw_price, U256::from(123456u64));
        assert_eq!(quote.decimals, 4);
        assert_eq!(quote.description, "ETH / USD");
    }

    #[test]
    fn test_never_updated_feed_is_success() {
        let outcome = QueryOutcome::from_raw("ETH".into(), Ok(raw(0, 8, 0)));

        let quote = outcome.quote().unwrap();
        assert_eq!(quote.price, "0.00");
        assert_eq!(quote.updated_at_iso, "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_outcome_from_read_error() {
        let outcome = QueryOutcome::from_raw(
            "BAD".into(),
            Err(OracleError::Reverted("feed not configured".into())),
        );

        assert!(!outcome.is_success());
        assert_eq!(outcome.symbol().as_str(), "BAD");
        let err = outcome.error().unwrap();
        assert_eq!(err.kind, ErrorKind::Contract);
        assert!(err.message.contains("feed not configured"));
    }

    #[test]
    fn test_outcome_from_format_error() {
        let outcome = QueryOutcome::from_raw("ODD".into(), Ok(raw(1, 200, 0)));
        assert_eq!(outcome.error().unwrap().kind, ErrorKind::Format);
    }

    #[test]
    fn test_price_decimal() {
        let quote = raw(204512345678, 8, 0).normalize("ETH".into()).unwrap();
        assert_eq!(quote.price_decimal(), Some(Decimal::from_str("2045.12").unwrap()));

        let huge = RawQuote {
            raw_price: U256::MAX,
            decimals: 0,
            description: String::new(),
            updated_at: 0,
        };
        assert!(huge.normalize("X".into()).is_err());

        let wide = raw(u64::MAX, 0, 0).normalize("WIDE".into()).unwrap();
        assert!(wide.price_decimal().is_some());
    }

    #[test]
    fn test_usd_outcome() {
        let ok = UsdOutcome::from_raw("ETH".into(), Ok(U256::from(204512u64)));
        match ok {
            UsdOutcome::Price(p) => assert_eq!(p.price, "2045.12"),
            UsdOutcome::Failed(e) => panic!("unexpected failure: {}", e),
        }

        let failed = UsdOutcome::from_raw("BAD".into(), Err(OracleError::Transport("refused".into())));
        assert!(!failed.is_success());
        assert_eq!(failed.symbol().as_str(), "BAD");
    }

    #[test]
    fn test_batch_summary() {
        let outcomes = vec![
            QueryOutcome::from_raw("ETH".into(), Ok(raw(1, 0, 0))),
            QueryOutcome::from_raw("BAD".into(), Err(OracleError::Reverted("x".into()))),
            QueryOutcome::from_raw("USDC".into(), Ok(raw(1, 0, 0))),
        ];

        let summary = BatchSummary::from_outcomes(&outcomes);
        assert_eq!(summary, BatchSummary { total: 3, succeeded: 2, failed: 1 });
        assert!(!summary.all_succeeded());
        assert_eq!(summary.to_string(), "2/3 feeds ok, 1 failed");
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = QueryOutcome::from_raw("BAD".into(), Err(OracleError::Reverted("x".into())));
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["status"], "failed");
        assert_eq!(json["symbol"], "BAD");
        assert_eq!(json["kind"], "contract");
    }
}
