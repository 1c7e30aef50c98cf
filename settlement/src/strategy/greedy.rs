//! Greedy largest-first settlement
//!
//! # Algorithm
//!
//! 1. Split the sheet into creditors (balance > 0) and debtors (balance < 0);
//!    settled participants are dropped
//! 2. Pop the largest creditor and the largest debtor
//! 3. The debtor pays the creditor the smaller of the two magnitudes
//! 4. Whichever side still has a residual goes back into its heap
//!
//! Every round settles at least one participant, so there are at most N−1
//! rounds. The balances left in the two heaps always sum to zero.
//!
//! Equal magnitudes are broken by participant id, smallest first, so the
//! output is reproducible.
//!
//! ```text
//! Sheet [A: 30, B: -10, C: -20]
//!   A(30) vs C(-20) -> C pays A 20, A keeps 10
//!   A(10) vs B(-10) -> B pays A 10
//! Transfers: C -> A 20, B -> A 10
//! ```

use super::{SettlementStrategy, StrategyKind};
use crate::{balance_sheet::BalanceSheet, heap::PriorityQueue, types::*, Error, Result};
use std::cmp::Ordering;

type Entry = (ParticipantId, Money);

/// Largest creditor matched against largest debtor
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyStrategy;

impl SettlementStrategy for GreedyStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Greedy
    }

    fn settle_up(&self, sheet: &BalanceSheet) -> Result<Vec<Transaction>> {
        sheet.validate()?;

        let transactions = match_largest(sheet.working_copy())?;
        tracing::debug!(
            participants = sheet.len(),
            transactions = transactions.len(),
            "Greedy settlement planned"
        );

        Ok(transactions)
    }
}

/// Creditors: highest balance first (negated-balance key)
fn largest_credit_first(a: &Entry, b: &Entry) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

/// Debtors: most negative balance first
fn largest_debt_first(a: &Entry, b: &Entry) -> Ordering {
    a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0))
}

fn match_largest(balances: Vec<Entry>) -> Result<Vec<Transaction>> {
    let mut creditors = PriorityQueue::with_capacity(balances.len(), largest_credit_first);
    let mut debtors = PriorityQueue::with_capacity(balances.len(), largest_debt_first);

    for (participant, balance) in balances {
        if balance.is_positive() {
            creditors.push((participant, balance));
        } else if balance.is_negative() {
            debtors.push((participant, balance));
        }
    }

    let mut transactions = Vec::new();

    while !creditors.is_empty() && !debtors.is_empty() {
        let (creditor, credit) = creditors.pop()?;
        let (debtor, debt) = debtors.pop()?;

        let amount = credit.min(-debt);
        transactions.push(Transaction::new(debtor.clone(), creditor.clone(), amount));

        let credit = credit - amount;
        let debt = debt + amount;

        if credit.is_positive() {
            creditors.push((creditor, credit));
        }
        if debt.is_negative() {
            debtors.push((debtor, debt));
        }
    }

    if !creditors.is_empty() || !debtors.is_empty() {
        return Err(Error::InvariantViolation(format!(
            "greedy settlement left {} creditors and {} debtors unmatched",
            creditors.len(),
            debtors.len()
        )));
    }

    Ok(transactions)
}
