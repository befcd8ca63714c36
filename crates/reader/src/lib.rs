//! Oracle reader command-line front end
//!
//! Loads configuration, runs one batch query and renders the outcomes

pub mod report;
pub mod settings;
pub mod shutdown;

pub use report::{render_quotes, render_usd_prices, OutputFormat};
pub use settings::{load_settings, settings_from_toml};
pub use shutdown::run_until_interrupted;
