//! Chain (N−1) settlement
//!
//! # Algorithm
//!
//! Walk the participants in sheet order. Whatever participant `i` is owed,
//! participant `i+1` pays; whatever participant `i` owes, they pay to
//! participant `i+1`. Either way the residual moves onto `i+1` and `i` is
//! settled. After N−1 steps the last participant holds the sheet total,
//! which validation guarantees is zero.
//!
//! ```text
//! Sheet [A: 30, B: -10, C: -20]
//!   i=0  A is owed 30  -> B pays A 30,  B: -10 + 30 = 20
//!   i=1  B is owed 20  -> C pays B 20,  C: -20 + 20 = 0
//! Transfers: B -> A 30, C -> B 20
//! ```

use super::{SettlementStrategy, StrategyKind};
use crate::{balance_sheet::BalanceSheet, types::*, Error, Result};

/// Sequential propagation through sheet order
#[derive(Debug, Clone, Copy, Default)]
pub struct ChainStrategy;

impl SettlementStrategy for ChainStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::NMinusOne
    }

    fn settle_up(&self, sheet: &BalanceSheet) -> Result<Vec<Transaction>> {
        sheet.validate()?;

        let transactions = sweep(sheet.working_copy())?;
        tracing::debug!(
            participants = sheet.len(),
            transactions = transactions.len(),
            "Chain settlement planned"
        );

        Ok(transactions)
    }
}

/// Push every residual one step down the chain
fn sweep(mut balances: Vec<(ParticipantId, Money)>) -> Result<Vec<Transaction>> {
    let mut transactions = Vec::with_capacity(balances.len().saturating_sub(1));

    for i in 1..balances.len() {
        let (settled, rest) = balances.split_at_mut(i);
        let (current, amount) = &mut settled[i - 1];
        let (next, next_amount) = &mut rest[0];

        if amount.is_positive() {
            transactions.push(Transaction::new(next.clone(), current.clone(), *amount));
        } else if amount.is_negative() {
            transactions.push(Transaction::new(current.clone(), next.clone(), -*amount));
        }

        *next_amount += *amount;
        *amount = Money::ZERO;
    }

    // Zero-sum input leaves nothing on the last participant
    if let Some((last, residue)) = balances.last() {
        if !residue.is_zero() {
            return Err(Error::InvariantViolation(format!(
                "chain settlement left {} on last participant {}",
                residue, last
            )));
        }
    }

    Ok(transactions)
}
