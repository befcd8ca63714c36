//! In-memory oracle for tests and local runs
//!
//! Behaves like the contract: unknown symbols revert, and individual symbols
//! can be forced to fail with any [`OracleError`].

use alloy_primitives::U256;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use oracle_core::{OracleError, OracleResult, Symbol};

use crate::source::OracleReader;

/// One configured feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub description: String,
    pub decimals: u8,
    pub price: U256,
    pub updated_at: u64,
    /// Answer to `getPriceInUSD`, scale 10^2
    pub usd_price: Option<U256>,
}

impl FeedEntry {
    pub fn new(description: &str, price: u128, decimals: u8, updated_at: u64) -> Self {
        Self {
            description: description.to_string(),
            decimals,
            price: U256::from(price),
            updated_at,
            usd_price: None,
        }
    }

    pub fn with_usd_price(mut self, usd_price: u128) -> Self {
        self.usd_price = Some(U256::from(usd_price));
        self
    }
}

#[derive(Debug, Default)]
pub struct InMemoryOracle {
    feeds: RwLock<HashMap<Symbol, FeedEntry>>,
    failures: RwLock<HashMap<Symbol, OracleError>>,
    latency: RwLock<Option<Duration>>,
    calls: AtomicU64,
}

impl InMemoryOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feed(self, symbol: impl Into<Symbol>, entry: FeedEntry) -> Self {
        self.set_feed(symbol, entry);
        self
    }

    /// Delay every call, e.g. to exercise call timeouts
    pub fn with_latency(self, latency: Duration) -> Self {
        *self.latency.write() = Some(latency);
        self
    }

    pub fn set_feed(&self, symbol: impl Into<Symbol>, entry: FeedEntry) {
        self.feeds.write().insert(symbol.into(), entry);
    }

    pub fn remove_feed(&self, symbol: &Symbol) -> Option<FeedEntry> {
        self.feeds.write().remove(symbol)
    }

    /// Make every call for `symbol` fail with `err`
    pub fn fail_with(&self, symbol: impl Into<Symbol>, err: OracleError) {
        self.failures.write().insert(symbol.into(), err);
    }

    pub fn clear_failure(&self, symbol: &Symbol) {
        self.failures.write().remove(symbol);
    }

    /// Number of read calls served so far
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    async fn lookup(&self, symbol: &Symbol) -> OracleResult<FeedEntry> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        let latency = *self.latency.read();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if let Some(err) = self.failures.read().get(symbol) {
            return Err(err.clone());
        }

        self.feeds
            .read()
            .get(symbol)
            .cloned()
            .ok_or_else(|| OracleError::Reverted(format!("feed not configured for {}", symbol)))
    }
}

#[async_trait]
impl OracleReader for InMemoryOracle {
    async fn description(&self, symbol: &Symbol) -> OracleResult<String> {
        Ok(self.lookup(symbol).await?.description)
    }

    async fn decimals(&self, symbol: &Symbol) -> OracleResult<u8> {
        Ok(self.lookup(symbol).await?.decimals)
    }

    async fn latest_price_and_timestamp(&self, symbol: &Symbol) -> OracleResult<(U256, u64)> {
        let entry = self.lookup(symbol).await?;
        Ok((entry.price, entry.updated_at))
    }

    async fn price_in_usd(&self, symbol: &Symbol) -> OracleResult<U256> {
        self.lookup(symbol)
            .await?
            .usd_price
            .ok_or_else(|| OracleError::Reverted(format!("no USD price for {}", symbol)))
    }
}
