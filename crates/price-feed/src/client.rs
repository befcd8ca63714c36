//! Batch price feed client - queries and normalizes many symbols at once

use std::future::Future;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use oracle_core::{
    BatchSummary, ClientConfig, OracleError, OracleResult, QueryOutcome, RawQuote, Symbol,
    UsdOutcome,
};

use crate::source::OracleReader;

/// Queries an oracle for a list of symbols.
///
/// Every input symbol yields exactly one outcome, in input order. Symbols are
/// fetched concurrently up to `max_concurrency`; a failure on one symbol is
/// recorded as that symbol's outcome and never affects the others.
pub struct PriceFeedClient<R> {
    reader: R,
    config: ClientConfig,
}

impl<R: OracleReader> PriceFeedClient<R> {
    pub fn new(reader: R, config: ClientConfig) -> Self {
        Self { reader, config }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch and normalize quotes for all symbols
    pub async fn fetch_all(&self, symbols: &[Symbol]) -> Vec<QueryOutcome> {
        let started = Instant::now();

        let outcomes: Vec<QueryOutcome> = stream::iter(symbols.iter().cloned())
            .map(|symbol| self.fetch_one(symbol))
            .buffered(self.concurrency())
            .collect()
            .await;

        let summary = BatchSummary::from_outcomes(&outcomes);
        info!(
            "Price batch done in {:?}: {}",
            started.elapsed(),
            summary
        );

        outcomes
    }

    /// Fetch and normalize the quote for one symbol
    pub async fn fetch_one(&self, symbol: Symbol) -> QueryOutcome {
        let raw = self.read_quote(&symbol).await;
        let outcome = QueryOutcome::from_raw(symbol, raw);

        match &outcome {
            QueryOutcome::Quote(q) => {
                debug!(symbol = %q.symbol, price = %q.price, updated_at = %q.updated_at_iso, "Quote");
            }
            QueryOutcome::Failed(e) => {
                warn!(symbol = %e.symbol, kind = %e.kind, "Price fetch failed: {}", e.message);
            }
        }

        outcome
    }

    /// Fetch `getPriceInUSD` for all symbols
    pub async fn fetch_usd_prices(&self, symbols: &[Symbol]) -> Vec<UsdOutcome> {
        let outcomes: Vec<UsdOutcome> = stream::iter(symbols.iter().cloned())
            .map(|symbol| async move {
                let raw = self.timed(self.reader.price_in_usd(&symbol)).await;
                let outcome = UsdOutcome::from_raw(symbol, raw);
                if let UsdOutcome::Failed(e) = &outcome {
                    warn!(symbol = %e.symbol, kind = %e.kind, "USD price fetch failed: {}", e.message);
                }
                outcome
            })
            .buffered(self.concurrency())
            .collect()
            .await;

        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        info!(
            "USD price batch done: {}/{} ok",
            outcomes.len() - failed,
            outcomes.len()
        );

        outcomes
    }

    /// Description, decimals, then latest price and timestamp; stops at the
    /// first failing call
    async fn read_quote(&self, symbol: &Symbol) -> OracleResult<RawQuote> {
        let description = self.timed(self.reader.description(symbol)).await?;
        let decimals = self.timed(self.reader.decimals(symbol)).await?;
        let (raw_price, updated_at) = self
            .timed(self.reader.latest_price_and_timestamp(symbol))
            .await?;

        Ok(RawQuote {
            raw_price,
            decimals,
            description,
            updated_at,
        })
    }

    async fn timed<T>(&self, call: impl Future<Output = OracleResult<T>>) -> OracleResult<T> {
        match tokio::time::timeout(self.config.call_timeout(), call).await {
            Ok(result) => result,
            Err(_) => Err(OracleError::Timeout {
                timeout_ms: self.config.call_timeout_ms,
            }),
        }
    }

    fn concurrency(&self) -> usize {
        self.config.max_concurrency.max(1)
    }
}
