//! Settlement engine
//!
//! Entry point for the request layer: validates a balance sheet, runs the
//! selected strategy, and returns a [`Settlement`]. Holds no mutable state,
//! so one engine can serve concurrent requests.

use crate::{
    balance_sheet::BalanceSheet,
    config::SettlementConfig,
    strategy::StrategyKind,
    types::*,
    Result,
};

/// Settlement engine
#[derive(Debug, Clone, Default)]
pub struct SettlementEngine {
    /// Configuration
    config: SettlementConfig,
}

impl SettlementEngine {
    /// Create new settlement engine
    pub fn new(config: SettlementConfig) -> Self {
        Self { config }
    }

    /// Strategy used by [`SettlementEngine::settle_default`]
    pub fn default_strategy(&self) -> StrategyKind {
        self.config.default_strategy
    }

    /// Settle with the configured default strategy
    pub fn settle_default(&self, sheet: &BalanceSheet) -> Result<Settlement> {
        self.settle(sheet, self.config.default_strategy)
    }

    /// Settle with a strategy named by the caller
    pub fn settle_by_name(&self, sheet: &BalanceSheet, name: &str) -> Result<Settlement> {
        let kind: StrategyKind = name.parse()?;
        self.settle(sheet, kind)
    }

    /// Settle with the given strategy
    ///
    /// Either the full transaction list is returned or an error; there are no
    /// partial results.
    pub fn settle(&self, sheet: &BalanceSheet, kind: StrategyKind) -> Result<Settlement> {
        tracing::info!(
            strategy = %kind,
            participants = sheet.len(),
            "Starting settlement"
        );
        tracing::debug!(sheet = %sheet, "Balance sheet before settlement");

        let transactions = kind.strategy().settle_up(sheet)?;
        let settlement = Settlement::new(kind, sheet.len(), transactions);

        if self.config.verify_settlement {
            settlement.verify(sheet)?;
        }

        if self.config.log_transactions {
            for transaction in settlement.transactions() {
                tracing::debug!(%transaction, "Planned transaction");
            }
        }

        tracing::info!(
            strategy = %kind,
            transactions = settlement.transaction_count(),
            total = %settlement.total_amount(),
            "Settlement complete"
        );

        Ok(settlement)
    }

    /// Check a settlement against the sheet it was planned for
    pub fn verify(&self, settlement: &Settlement, sheet: &BalanceSheet) -> Result<()> {
        settlement.verify(sheet)
    }
}
