//! Rendering of batch outcomes

use clap::ValueEnum;

use oracle_core::{BatchSummary, QueryOutcome, UsdOutcome};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned table
    #[default]
    Text,
    /// One JSON object per symbol
    Json,
}

const ERROR_PLACEHOLDER: &str = "Error fetching price";

pub fn render_quotes(outcomes: &[QueryOutcome], format: OutputFormat) -> anyhow::Result<String> {
    let mut out = String::new();

    match format {
        OutputFormat::Json => {
            for outcome in outcomes {
                out.push_str(&serde_json::to_string(outcome)?);
                out.push('\n');
            }
        }
        OutputFormat::Text => {
            for outcome in outcomes {
                let line = match outcome {
                    QueryOutcome::Quote(q) => format!(
                        "{:<8} {:<20} {:>16}  {}",
                        q.symbol, q.description, q.price, q.updated_at_iso
                    ),
                    QueryOutcome::Failed(e) => format!(
                        "{:<8} {}: {}",
                        e.symbol, ERROR_PLACEHOLDER, e.message
                    ),
                };
                out.push_str(&line);
                out.push('\n');
            }
            out.push_str(&BatchSummary::from_outcomes(outcomes).to_string());
            out.push('\n');
        }
    }

    Ok(out)
}

pub fn render_usd_prices(outcomes: &[UsdOutcome], format: OutputFormat) -> anyhow::Result<String> {
    let mut out = String::new();

    for outcome in outcomes {
        let line = match format {
            OutputFormat::Json => serde_json::to_string(outcome)?,
            OutputFormat::Text => match outcome {
                UsdOutcome::Price(p) => format!("{:<8} ${:>16}", p.symbol, p.price),
                UsdOutcome::Failed(e) => {
                    format!("{:<8} {}: {}", e.symbol, ERROR_PLACEHOLDER, e.message)
                }
            },
        };
        out.push_str(&line);
        out.push('\n');
    }

    Ok(out)
}
