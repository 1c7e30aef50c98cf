//! Balance sheet: net position per participant
//!
//! Built by summing signed contributions (what a participant paid is
//! positive, their share of an expense is negative). First-appearance order
//! is kept; the chain strategy relies on it for adjacency.
//!
//! # Invariant
//!
//! A sheet handed to a strategy must sum to exactly zero. [`BalanceSheet::validate`]
//! checks this with exact decimal equality.

use crate::{expense::Expense, types::*, Error, Result};
use indexmap::IndexMap;
use std::fmt;

/// Participant to net balance mapping, in first-appearance order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceSheet {
    balances: IndexMap<ParticipantId, Money>,
}

impl BalanceSheet {
    /// Create empty sheet
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate raw `(participant, signed amount)` contributions
    pub fn build<I>(contributions: I) -> Self
    where
        I: IntoIterator<Item = (ParticipantId, Money)>,
    {
        let mut sheet = Self::new();
        for (participant, amount) in contributions {
            sheet.record(participant, amount);
        }
        sheet
    }

    /// Build from expense records
    ///
    /// Every payer contribution is recorded before any sharer contribution,
    /// so participants who paid for something come first in the sheet.
    pub fn from_expenses(expenses: &[Expense]) -> Result<Self> {
        let mut paid = Vec::new();
        let mut shared = Vec::new();
        for expense in expenses {
            expense.validate()?;
            paid.extend(expense.paid_contributions()?);
            shared.extend(expense.shared_contributions()?);
        }

        let sheet = Self::build(paid.into_iter().chain(shared));

        tracing::debug!(
            expenses = expenses.len(),
            participants = sheet.len(),
            "Built balance sheet from expenses"
        );

        Ok(sheet)
    }

    /// Add a signed contribution to a participant's balance
    pub fn record(&mut self, participant: ParticipantId, amount: Money) {
        *self.balances.entry(participant).or_insert(Money::ZERO) += amount;
    }

    /// Balance of one participant
    pub fn get(&self, participant: &ParticipantId) -> Option<Money> {
        self.balances.get(participant).copied()
    }

    /// Number of participants
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Iterate in sheet order
    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, Money)> + '_ {
        self.balances.iter().map(|(p, b)| (p, *b))
    }

    /// Participants in sheet order
    pub fn participants(&self) -> impl Iterator<Item = &ParticipantId> + '_ {
        self.balances.keys()
    }

    /// Sum of all balances
    pub fn total(&self) -> Money {
        self.balances.values().sum()
    }

    /// Total owed to net creditors
    pub fn total_credit(&self) -> Money {
        self.balances.values().filter(|b| b.is_positive()).sum()
    }

    /// Check the zero-sum invariant
    pub fn validate(&self) -> Result<()> {
        let total = self.total();
        if !total.is_zero() {
            tracing::warn!(
                participants = self.len(),
                total = %total,
                "Rejected balance sheet with nonzero total"
            );
            return Err(Error::InvalidBalanceSheet {
                total: total.as_decimal(),
            });
        }
        Ok(())
    }

    /// Apply a planned transfer: the payer's balance rises, the payee's falls
    pub fn apply(&mut self, transaction: &Transaction) {
        self.record(transaction.from().clone(), transaction.amount());
        self.record(transaction.to().clone(), -transaction.amount());
    }

    /// Check if every balance is zero
    pub fn is_settled(&self) -> bool {
        self.balances.values().all(Money::is_zero)
    }

    /// Private working copy of the balances, in sheet order
    pub(crate) fn working_copy(&self) -> Vec<(ParticipantId, Money)> {
        self.balances
            .iter()
            .map(|(p, b)| (p.clone(), *b))
            .collect()
    }
}

impl FromIterator<(ParticipantId, Money)> for BalanceSheet {
    fn from_iter<I: IntoIterator<Item = (ParticipantId, Money)>>(iter: I) -> Self {
        Self::build(iter)
    }
}

impl fmt::Display for BalanceSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (participant, balance)) in self.balances.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", participant, balance)?;
        }
        write!(f, "}}")
    }
}
