//! Settlement command-line binary
//!
//! Reads a JSON request on stdin and prints the planned settlement on stdout:
//!
//! ```text
//! {
//!   "strategy": "greedy",
//!   "contributions": [["alice", "30.00"], ["bob", "-10.00"], ["carol", "-20.00"]],
//!   "expenses": []
//! }
//! ```
//!
//! Configuration comes from the TOML file named by `SETTLEMENT_CONFIG` (if
//! set), then `SETTLEMENT_*` environment overrides. Logs go to stderr.

use serde::{Deserialize, Serialize};
use settlement::{
    BalanceSheet, Config, Expense, Money, ParticipantId, Settlement, SettlementEngine,
    SettlementStats,
};
use std::io::Read;
use tracing::info;

/// Settlement request
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Request {
    /// Strategy name; the configured default when absent
    #[serde(default)]
    strategy: Option<String>,

    /// Raw signed contributions, applied after the expenses
    #[serde(default)]
    contributions: Vec<(ParticipantId, Money)>,

    /// Expense records
    #[serde(default)]
    expenses: Vec<Expense>,
}

#[derive(Debug, Serialize)]
struct Response<'a> {
    #[serde(flatten)]
    settlement: &'a Settlement,
    stats: SettlementStats,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = match std::env::var("SETTLEMENT_CONFIG") {
        Ok(path) => {
            let mut config = Config::from_file(path)?;
            config.apply_env()?;
            config
        }
        Err(_) => Config::from_env()?,
    };

    info!(
        "{} {} starting (default strategy: {})",
        config.service_name, config.service_version, config.settlement.default_strategy
    );

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    let request: Request = serde_json::from_str(&input)?;

    let mut sheet = BalanceSheet::from_expenses(&request.expenses)?;
    for (participant, amount) in request.contributions {
        sheet.record(participant, amount);
    }

    let engine = SettlementEngine::new(config.settlement);
    let settlement = match request.strategy.as_deref() {
        Some(name) => engine.settle_by_name(&sheet, name)?,
        None => engine.settle_default(&sheet)?,
    };

    let response = Response {
        settlement: &settlement,
        stats: settlement.stats(),
    };
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
