//! Oracle reader - one-shot batch price query
//!
//! Main entry point for the command-line reader

use std::path::PathBuf;

use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use oracle_core::{BatchSummary, Symbol};
use oracle_price_feed::{AlloyOracle, PriceFeedClient};
use oracle_reader::{
    load_settings, render_quotes, render_usd_prices, run_until_interrupted, OutputFormat,
};

#[derive(Debug, Parser)]
#[command(name = "oracle-reader", version, about)]
struct Args {
    /// Configuration file (defaults to ./oracle.{toml,json,yaml} if present)
    #[arg(short, long, env = "ORACLE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured RPC endpoint
    #[arg(long)]
    rpc_url: Option<String>,

    /// Override the configured concurrency limit
    #[arg(long)]
    concurrency: Option<usize>,

    /// Query the fixed-scale USD price instead of the full quote
    #[arg(long)]
    usd: bool,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Symbols to query; replaces the configured list when given
    symbols: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout carries only the report
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let args = Args::parse();

    let mut config = load_settings(args.config.as_deref())?;
    if let Some(url) = args.rpc_url {
        config.rpc.http_url = url;
    }
    if let Some(concurrency) = args.concurrency {
        config.client.max_concurrency = concurrency;
    }
    if !args.symbols.is_empty() {
        config.symbols = args.symbols.into_iter().map(Symbol::from).collect();
    }
    config.validate()?;

    info!(
        "Oracle reader v{} querying {} symbols from {} via {}",
        env!("CARGO_PKG_VERSION"),
        config.symbols.len(),
        config.oracle.address,
        config.rpc.http_url
    );

    let oracle = AlloyOracle::connect(&config.rpc, &config.oracle)?;
    let client = PriceFeedClient::new(oracle, config.client.clone());

    let report = if args.usd {
        let outcomes =
            run_until_interrupted(client.fetch_usd_prices(&config.symbols), signal::ctrl_c())
                .await?;
        render_usd_prices(&outcomes, args.format)?
    } else {
        let outcomes =
            run_until_interrupted(client.fetch_all(&config.symbols), signal::ctrl_c()).await?;

        let summary = BatchSummary::from_outcomes(&outcomes);
        if !summary.all_succeeded() {
            warn!("{}", summary);
        }
        render_quotes(&outcomes, args.format)?
    };

    print!("{}", report);
    Ok(())
}
