//! Group expense records
//!
//! An expense is paid by one or more participants and shared by one or more
//! participants. Its total must equal both the sum of the paid shares and the
//! sum of the owed shares. Payers contribute positively to the balance sheet,
//! sharers negatively.

use crate::{types::*, Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One participant's part of an expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    /// Participant
    #[serde(alias = "user")]
    pub participant: ParticipantId,

    /// Amount paid or owed
    pub amount: Decimal,
}

impl Share {
    /// Create new share
    pub fn new(participant: impl Into<ParticipantId>, amount: Decimal) -> Self {
        Self {
            participant: participant.into(),
            amount,
        }
    }
}

/// Expense recorded against a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Short title
    #[serde(default)]
    pub title: String,

    /// Expense total
    pub amount: Decimal,

    /// Who paid, and how much each
    pub paid_by: Vec<Share>,

    /// Who owes, and how much each
    pub shared_by: Vec<Share>,
}

impl Expense {
    /// Split an amount paid by one participant evenly among `sharers`
    ///
    /// Cents that do not divide evenly go to the first sharers in order.
    /// Every sharer must receive at least one cent.
    pub fn split_evenly(
        title: impl Into<String>,
        payer: impl Into<ParticipantId>,
        amount: Money,
        sharers: &[ParticipantId],
    ) -> Result<Self> {
        if sharers.is_empty() {
            return Err(Error::InvalidExpense("expense has no sharers".to_string()));
        }

        let cents = (amount.as_decimal() * Decimal::ONE_HUNDRED).trunc();
        let count = Decimal::from(sharers.len() as u64);
        if cents < count {
            return Err(Error::InvalidExpense(format!(
                "{} cannot be split among {} sharers",
                amount,
                sharers.len()
            )));
        }
        let base = (cents / count).trunc();
        let remainder = cents - base * count;

        let shared_by = sharers
            .iter()
            .enumerate()
            .map(|(i, participant)| {
                let extra = if Decimal::from(i as u64) < remainder {
                    Decimal::ONE
                } else {
                    Decimal::ZERO
                };
                Share::new(participant.clone(), (base + extra) / Decimal::ONE_HUNDRED)
            })
            .collect();

        Ok(Self {
            title: title.into(),
            amount: amount.as_decimal(),
            paid_by: vec![Share::new(payer, amount.as_decimal())],
            shared_by,
        })
    }

    /// Check amounts and totals
    pub fn validate(&self) -> Result<()> {
        let amount = Money::record_amount(self.amount)?;

        if self.paid_by.is_empty() || self.shared_by.is_empty() {
            return Err(Error::InvalidExpense(format!(
                "expense {:?} needs at least one payer and one sharer",
                self.title
            )));
        }

        let total_paid = Self::total(&self.paid_by)?;
        let total_shared = Self::total(&self.shared_by)?;

        if amount != total_paid || amount != total_shared {
            return Err(Error::InvalidExpense(format!(
                "expense {:?}: amount {} must equal total paid {} and total shared {}",
                self.title, amount, total_paid, total_shared
            )));
        }

        Ok(())
    }

    /// Positive contributions of the payers
    pub fn paid_contributions(&self) -> Result<Vec<(ParticipantId, Money)>> {
        self.paid_by.iter().map(Self::contribution).collect()
    }

    /// Negative contributions of the sharers
    pub fn shared_contributions(&self) -> Result<Vec<(ParticipantId, Money)>> {
        self.shared_by
            .iter()
            .map(|share| {
                let (participant, amount) = Self::contribution(share)?;
                Ok((participant, -amount))
            })
            .collect()
    }

    /// All signed contributions, payers first
    pub fn contributions(&self) -> Result<Vec<(ParticipantId, Money)>> {
        let mut contributions = self.paid_contributions()?;
        contributions.extend(self.shared_contributions()?);
        Ok(contributions)
    }

    fn total(shares: &[Share]) -> Result<Money> {
        shares
            .iter()
            .map(|share| Money::record_amount(share.amount))
            .sum::<Result<Money>>()
    }

    fn contribution(share: &Share) -> Result<(ParticipantId, Money)> {
        Ok((share.participant.clone(), Money::from_decimal(share.amount)?))
    }
}
