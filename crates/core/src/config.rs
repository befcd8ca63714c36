//! Configuration types

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{ConfigError, ConfigResult, Symbol};

/// RPC endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    pub http_url: String,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            http_url: "http://127.0.0.1:8545".to_string(),
        }
    }
}

/// Which ABI shape the oracle exposes for the latest price and timestamp
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceCallShape {
    /// `getLatestPriceAndTimestamp(symbol)`
    #[default]
    Combined,
    /// `getLatestPrice(symbol)` followed by `getLatestTimestamp(symbol)`
    Split,
}

/// Oracle contract location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub address: Address,
    pub price_call_shape: PriceCallShape,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            address: Address::ZERO,
            price_call_shape: PriceCallShape::Combined,
        }
    }
}

/// Batch query configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Symbols queried at once; 1 means strictly sequential
    pub max_concurrency: usize,
    pub call_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 8,
            call_timeout_ms: 10_000,
        }
    }
}

impl ClientConfig {
    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }
}

/// Complete reader configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    pub rpc: RpcConfig,
    pub oracle: OracleConfig,
    pub client: ClientConfig,
    pub symbols: Vec<Symbol>,
}

impl ReaderConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.rpc.http_url.trim().is_empty() {
            return Err(ConfigError::EmptyRpcUrl);
        }
        if self.oracle.address == Address::ZERO {
            return Err(ConfigError::ZeroOracleAddress);
        }
        if self.client.max_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.symbols.is_empty() {
            return Err(ConfigError::NoSymbols);
        }
        Ok(())
    }
}
