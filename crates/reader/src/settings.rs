//! Configuration loading
//!
//! Sources in increasing priority: defaults, an optional `oracle.{toml,json,yaml}`
//! (or an explicit file), then `ORACLE__*` environment variables, e.g.
//! `ORACLE__RPC__HTTP_URL` or `ORACLE__SYMBOLS=ETH,BTC`.

use std::path::Path;

use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use config::builder::DefaultState;

use oracle_core::ReaderConfig;

pub const ENV_PREFIX: &str = "ORACLE";
pub const DEFAULT_CONFIG_FILE: &str = "oracle";

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("symbols")
        .try_parsing(true)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<ReaderConfig> {
    let config: ReaderConfig = builder.build()?.try_deserialize()?;
    Ok(config)
}

/// Load from `path` (required) or the default file (optional), then the
/// environment
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<ReaderConfig> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    finish(Config::builder().add_source(file).add_source(environment()))
}

/// Parse settings from an in-memory TOML document
pub fn settings_from_toml(toml: &str) -> anyhow::Result<ReaderConfig> {
    finish(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use oracle_core::{PriceCallShape, Symbol};

    #[test]
    fn test_full_toml() {
        let config = settings_from_toml(
            r#"
            symbols = ["ETH", "BAD", "USDC"]

            [rpc]
            http_url = "https://sepolia.example.org"

            [oracle]
            address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
            price_call_shape = "split"

            [client]
            max_concurrency = 2
            call_timeout_ms = 1500
            "#,
        )
        .unwrap();

        assert_eq!(config.rpc.http_url, "https://sepolia.example.org");
        assert_eq!(config.oracle.price_call_shape, PriceCallShape::Split);
        assert_eq!(config.client.max_concurrency, 2);
        assert_eq!(config.client.call_timeout_ms, 1500);
        assert_eq!(
            config.symbols,
            vec![Symbol::from("ETH"), Symbol::from("BAD"), Symbol::from("USDC")]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config = settings_from_toml(
            r#"
            [oracle]
            address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
            "#,
        )
        .unwrap();

        assert_eq!(config.rpc.http_url, "http://127.0.0.1:8545");
        assert_eq!(config.client.max_concurrency, 8);
        assert!(config.symbols.is_empty());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_address_is_rejected() {
        let result = settings_from_toml(
            r#"
            [oracle]
            address = "not-an-address"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(load_settings(Some(Path::new("/nonexistent/oracle.toml"))).is_err());
    }
}
