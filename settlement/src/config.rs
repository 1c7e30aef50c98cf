//! Configuration for the settlement engine

use crate::strategy::StrategyKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settlement engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Service name
    pub service_name: String,

    /// Service version
    pub service_version: String,

    /// Settlement configuration
    pub settlement: SettlementConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "group-settlement".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            settlement: SettlementConfig::default(),
        }
    }
}

/// Settlement configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    /// Strategy used when the caller does not name one
    pub default_strategy: StrategyKind,

    /// Log every planned transaction at debug level
    pub log_transactions: bool,

    /// Re-apply planned transactions to the sheet and check it settles
    pub verify_settlement: bool,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            default_strategy: StrategyKind::NMinusOne,
            log_transactions: false,
            verify_settlement: true,
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Override fields from environment variables
    pub fn apply_env(&mut self) -> crate::Result<()> {
        if let Ok(strategy) = std::env::var("SETTLEMENT_DEFAULT_STRATEGY") {
            self.settlement.default_strategy = strategy
                .parse()
                .map_err(|e| crate::Error::Config(format!("SETTLEMENT_DEFAULT_STRATEGY: {}", e)))?;
        }

        if let Ok(flag) = std::env::var("SETTLEMENT_LOG_TRANSACTIONS") {
            self.settlement.log_transactions = parse_flag("SETTLEMENT_LOG_TRANSACTIONS", &flag)?;
        }

        if let Ok(flag) = std::env::var("SETTLEMENT_VERIFY") {
            self.settlement.verify_settlement = parse_flag("SETTLEMENT_VERIFY", &flag)?;
        }

        Ok(())
    }
}

fn parse_flag(name: &str, value: &str) -> crate::Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(crate::Error::Config(format!(
            "{}: expected a boolean, got {:?}",
            name, other
        ))),
    }
}
