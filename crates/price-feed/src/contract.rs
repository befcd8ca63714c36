//! Alloy adapter over the on-chain oracle contract

use alloy::contract::Error as ContractError;
use alloy::providers::RootProvider;
use alloy::sol;
use alloy::transports::http::{reqwest::Url, Client, Http};
use alloy::transports::RpcError;
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use tracing::debug;

use oracle_core::{
    u256_to_u64, ConfigError, ConfigResult, OracleConfig, OracleError, OracleResult,
    PriceCallShape, RpcConfig, Symbol,
};

use crate::source::OracleReader;

sol! {
    /// Read interface of the price oracle
    #[sol(rpc)]
    interface IPriceOracle {
        function getDescription(string symbol) external view returns (string description);
        function getDecimals(string symbol) external view returns (uint8 decimals);
        function getLatestPriceAndTimestamp(string symbol) external view returns (uint256 price, uint256 updatedAt);
        function getLatestPrice(string symbol) external view returns (uint256 price);
        function getLatestTimestamp(string symbol) external view returns (uint256 updatedAt);
        function getPriceInUSD(string symbol) external view returns (uint256 price);
    }
}

type HttpTransport = Http<Client>;
type OracleInstance = IPriceOracle::IPriceOracleInstance<HttpTransport, RootProvider<HttpTransport>>;

/// JSON-RPC error code geth and most nodes use for `execution reverted`
const REVERT_ERROR_CODE: i64 = 3;

/// Map an alloy call failure onto the oracle error kinds.
///
/// Only revert responses are contract errors. Any other JSON-RPC error
/// (rate limits, missing headers, internal node errors) and any connection
/// failure is a transport error. Everything else (ABI decoding, unknown
/// selector) means the contract returned data we could not interpret.
fn classify(call: &'static str, symbol: &Symbol, err: ContractError) -> OracleError {
    match err {
        ContractError::TransportError(RpcError::ErrorResp(payload)) => {
            let message = format!("{}({}): {}", call, symbol, payload.message);
            let reverted = payload.code == REVERT_ERROR_CODE
                || payload.message.to_lowercase().starts_with("execution reverted");

            if reverted {
                OracleError::Reverted(message)
            } else {
                OracleError::Transport(format!("{} (code {})", message, payload.code))
            }
        }
        ContractError::TransportError(e) => {
            OracleError::Transport(format!("{}({}): {}", call, symbol, e))
        }
        e => OracleError::Malformed(format!("{}({}): {}", call, symbol, e)),
    }
}

fn timestamp(symbol: &Symbol, updated_at: U256) -> OracleResult<u64> {
    u256_to_u64(updated_at)
        .ok_or_else(|| OracleError::TimestampOutOfRange(format!("{} for {}", updated_at, symbol)))
}

/// Oracle reader backed by an HTTP JSON-RPC provider
pub struct AlloyOracle {
    contract: OracleInstance,
    shape: PriceCallShape,
}

impl AlloyOracle {
    pub fn connect(rpc: &RpcConfig, oracle: &OracleConfig) -> ConfigResult<Self> {
        let url: Url = rpc.http_url.parse().map_err(|e| ConfigError::InvalidRpcUrl {
            url: rpc.http_url.clone(),
            reason: format!("{}", e),
        })?;

        let provider = RootProvider::<HttpTransport>::new_http(url);
        let contract = IPriceOracle::new(oracle.address, provider);

        Ok(Self {
            contract,
            shape: oracle.price_call_shape,
        })
    }

    pub fn address(&self) -> Address {
        *self.contract.address()
    }

    pub fn price_call_shape(&self) -> PriceCallShape {
        self.shape
    }

    async fn combined_price(&self, symbol: &Symbol) -> OracleResult<(U256, u64)> {
        let ret = self
            .contract
            .getLatestPriceAndTimestamp(symbol.to_string())
            .call()
            .await
            .map_err(|e| classify("getLatestPriceAndTimestamp", symbol, e))?;

        Ok((ret.price, timestamp(symbol, ret.updatedAt)?))
    }

    async fn split_price(&self, symbol: &Symbol) -> OracleResult<(U256, u64)> {
        let price = self
            .contract
            .getLatestPrice(symbol.to_string())
            .call()
            .await
            .map_err(|e| classify("getLatestPrice", symbol, e))?
            .price;

        let updated_at = self
            .contract
            .getLatestTimestamp(symbol.to_string())
            .call()
            .await
            .map_err(|e| classify("getLatestTimestamp", symbol, e))?
            .updatedAt;

        Ok((price, timestamp(symbol, updated_at)?))
    }
}

#[async_trait]
impl OracleReader for AlloyOracle {
    async fn description(&self, symbol: &Symbol) -> OracleResult<String> {
        debug!(%symbol, "getDescription");
        self.contract
            .getDescription(symbol.to_string())
            .call()
            .await
            .map(|ret| ret.description)
            .map_err(|e| classify("getDescription", symbol, e))
    }

    async fn decimals(&self, symbol: &Symbol) -> OracleResult<u8> {
        debug!(%symbol, "getDecimals");
        self.contract
            .getDecimals(symbol.to_string())
            .call()
            .await
            .map(|ret| ret.decimals)
            .map_err(|e| classify("getDecimals", symbol, e))
    }

    async fn latest_price_and_timestamp(&self, symbol: &Symbol) -> OracleResult<(U256, u64)> {
        debug!(%symbol, shape = ?self.shape, "latest price");
        match self.shape {
            PriceCallShape::Combined => self.combined_price(symbol).await,
            PriceCallShape::Split => self.split_price(symbol).await,
        }
    }

    async fn price_in_usd(&self, symbol: &Symbol) -> OracleResult<U256> {
        debug!(%symbol, "getPriceInUSD");
        self.contract
            .getPriceInUSD(symbol.to_string())
            .call()
            .await
            .map(|ret| ret.price)
            .map_err(|e| classify("getPriceInUSD", symbol, e))
    }
}
