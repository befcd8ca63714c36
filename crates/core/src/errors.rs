//! Error types

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Broad classification of a per-symbol failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// Network failure, node unavailable, call timeout
    Transport,
    /// Revert, unconfigured symbol, malformed return data
    Contract,
    /// Value outside the range the formatter can represent
    Format,
}

impl ErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Contract => "contract",
            ErrorKind::Format => "format",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Oracle read errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("RPC transport failed: {0}")]
    Transport(String),

    #[error("Call timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Contract call reverted: {0}")]
    Reverted(String),

    #[error("Malformed contract data: {0}")]
    Malformed(String),

    #[error("Decimals {decimals} exceed maximum of {max}")]
    DecimalsOutOfRange { decimals: u8, max: u8 },

    #[error("Price {0} cannot be scaled to display precision")]
    PriceOutOfRange(String),

    #[error("Timestamp {0} is outside the representable range")]
    TimestampOutOfRange(String),
}

impl OracleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OracleError::Transport(_) | OracleError::Timeout { .. } => ErrorKind::Transport,
            OracleError::Reverted(_) | OracleError::Malformed(_) => ErrorKind::Contract,
            OracleError::DecimalsOutOfRange { .. }
            | OracleError::PriceOutOfRange(_)
            | OracleError::TimestampOutOfRange(_) => ErrorKind::Format,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("RPC URL is empty")]
    EmptyRpcUrl,

    #[error("Invalid RPC URL {url}: {reason}")]
    InvalidRpcUrl { url: String, reason: String },

    #[error("Oracle address is the zero address")]
    ZeroOracleAddress,

    #[error("No symbols configured")]
    NoSymbols,

    #[error("Concurrency limit must be at least 1")]
    ZeroConcurrency,
}

/// Result type alias
pub type OracleResult<T> = Result<T, OracleError>;
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(OracleError::Transport("down".into()).kind(), ErrorKind::Transport);
        assert_eq!(OracleError::Timeout { timeout_ms: 10 }.kind(), ErrorKind::Transport);
        assert_eq!(OracleError::Reverted("no feed".into()).kind(), ErrorKind::Contract);
        assert_eq!(OracleError::Malformed("short".into()).kind(), ErrorKind::Contract);
        assert_eq!(
            OracleError::DecimalsOutOfRange { decimals: 200, max: 77 }.kind(),
            ErrorKind::Format
        );
    }

    #[test]
    fn test_error_messages() {
        let err = OracleError::Timeout { timeout_ms: 2500 };
        assert_eq!(err.to_string(), "Call timed out after 2500ms");
        assert_eq!(ErrorKind::Contract.to_string(), "contract");
    }
}
