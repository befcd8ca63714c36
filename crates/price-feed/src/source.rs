//! Oracle read interface

use alloy_primitives::U256;
use async_trait::async_trait;
use std::sync::Arc;

use oracle_core::{OracleResult, Symbol};

/// Read-only capabilities of a price oracle contract.
///
/// Implementations map every failure (transport, revert, undecodable return
/// data) onto [`oracle_core::OracleError`] and never mutate shared state.
#[async_trait]
pub trait OracleReader: Send + Sync {
    /// Human-readable feed name, e.g. `"ETH / USD"`
    async fn description(&self, symbol: &Symbol) -> OracleResult<String>;

    /// Scale of the raw price
    async fn decimals(&self, symbol: &Symbol) -> OracleResult<u8>;

    /// Raw price and its update time in seconds since the epoch
    async fn latest_price_and_timestamp(&self, symbol: &Symbol) -> OracleResult<(U256, u64)>;

    /// Price with an implicit scale of 10^2
    async fn price_in_usd(&self, symbol: &Symbol) -> OracleResult<U256>;
}

#[async_trait]
impl<R: OracleReader + ?Sized> OracleReader for Arc<R> {
    async fn description(&self, symbol: &Symbol) -> OracleResult<String> {
        (**self).description(symbol).await
    }

    async fn decimals(&self, symbol: &Symbol) -> OracleResult<u8> {
        (**self).decimals(symbol).await
    }

    async fn latest_price_and_timestamp(&self, symbol: &Symbol) -> OracleResult<(U256, u64)> {
        (**self).latest_price_and_timestamp(symbol).await
    }

    async fn price_in_usd(&self, symbol: &Symbol) -> OracleResult<U256> {
        (**self).price_in_usd(symbol).await
    }
}
