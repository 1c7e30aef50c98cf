//! Settlement strategies
//!
//! A strategy turns a zero-sum [`BalanceSheet`] into an ordered list of
//! [`Transaction`]s that, applied in any order, leaves every participant at
//! zero. Two strategies exist:
//!
//! - [`ChainStrategy`] (`n_minus_1`): one sweep in sheet order, pushing each
//!   residual balance onto the next participant. O(N), at most N−1 transfers.
//! - [`GreedyStrategy`] (`greedy`): repeatedly matches the largest creditor
//!   with the largest debtor using two min-heaps. O(N log N), at most N−1
//!   transfers, usually fewer pass-through transfers than the chain.
//!
//! Both validate the sheet first and work on a private copy of its balances.

pub mod chain;
pub mod greedy;

pub use chain::ChainStrategy;
pub use greedy::GreedyStrategy;

use crate::{balance_sheet::BalanceSheet, types::Transaction, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Settlement algorithm
pub trait SettlementStrategy: Send + Sync {
    /// Which strategy this is
    fn kind(&self) -> StrategyKind;

    /// Plan the transfers that settle `sheet`
    ///
    /// Fails with [`Error::InvalidBalanceSheet`] if the balances do not sum to
    /// zero. The sheet itself is never modified.
    fn settle_up(&self, sheet: &BalanceSheet) -> Result<Vec<Transaction>>;
}

/// Strategy selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Chain settlement, at most N−1 transfers in sheet order
    #[default]
    #[serde(rename = "n_minus_1")]
    NMinusOne,
    /// Largest creditor against largest debtor
    Greedy,
}

impl StrategyKind {
    /// All strategies
    pub const ALL: [StrategyKind; 2] = [StrategyKind::NMinusOne, StrategyKind::Greedy];

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::NMinusOne => "n_minus_1",
            StrategyKind::Greedy => "greedy",
        }
    }

    /// Implementation for this kind
    pub fn strategy(&self) -> &'static dyn SettlementStrategy {
        match self {
            StrategyKind::NMinusOne => &ChainStrategy,
            StrategyKind::Greedy => &GreedyStrategy,
        }
    }
}

impl FromStr for StrategyKind {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        let normalized = name.trim().to_lowercase();
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| Error::UnknownStrategy(name.to_string()))
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
