//! Group Settlement Engine
//!
//! Plans the transfers that settle a group's shared expenses.
//!
//! # Architecture
//!
//! The engine sits behind the request layer, which owns users, groups and
//! expense records:
//!
//! 1. **Build**: Aggregate signed contributions into a [`BalanceSheet`]
//! 2. **Validate**: Reject sheets whose balances do not sum to zero
//! 3. **Settle**: Run the selected [`StrategyKind`] over a private copy
//! 4. **Return**: Hand back the ordered [`Transaction`] list
//!
//! # Strategies
//!
//! - `n_minus_1`: chain settlement in sheet order, O(N)
//! - `greedy`: largest creditor against largest debtor, O(N log N)
//!
//! Both plan at most N−1 transfers for N participants.
//!
//! # Invariants
//!
//! - Money is exact: two fractional digits, no floating point
//! - Zero-sum: Σ(balances) == 0 before any strategy runs
//! - Every transaction has a positive amount and two distinct parties
//! - Applying every transaction settles every participant
//!
//! # Example
//!
//! ```
//! use settlement::{BalanceSheet, Money, ParticipantId, SettlementEngine, StrategyKind};
//!
//! fn main() -> settlement::Result<()> {
//!     let sheet = BalanceSheet::build(vec![
//!         (ParticipantId::from("alice"), Money::from_cents(3000)),
//!         (ParticipantId::from("bob"), Money::from_cents(-1000)),
//!         (ParticipantId::from("carol"), Money::from_cents(-2000)),
//!     ]);
//!
//!     let engine = SettlementEngine::default();
//!     let settlement = engine.settle(&sheet, StrategyKind::Greedy)?;
//!
//!     for transaction in settlement.transactions() {
//!         println!("{}", transaction);
//!     }
//!     assert_eq!(settlement.transaction_count(), 2);
//!
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod types;
pub mod balance_sheet;
pub mod expense;
pub mod heap;
pub mod strategy;
pub mod error;
pub mod config;
pub mod engine;

// Re-exports
pub use error::{Error, Result};
pub use types::*;
pub use balance_sheet::BalanceSheet;
pub use expense::{Expense, Share};
pub use heap::PriorityQueue;
pub use strategy::{ChainStrategy, GreedyStrategy, SettlementStrategy, StrategyKind};
pub use config::{Config, SettlementConfig};
pub use engine::SettlementEngine;
