//! Core types for the settlement engine

use crate::{balance_sheet::BalanceSheet, strategy::StrategyKind, Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// Participant identifier
///
/// Numeric ids (user primary keys) and names are both accepted on the wire.
/// Ordering is total: numeric ids sort before names, each in natural order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParticipantId {
    /// Numeric user id
    Id(u64),
    /// Named participant
    Name(String),
}

impl ParticipantId {
    /// Create a named participant
    pub fn new(name: impl Into<String>) -> Self {
        ParticipantId::Name(name.into())
    }
}

impl From<u64> for ParticipantId {
    fn from(id: u64) -> Self {
        ParticipantId::Id(id)
    }
}

impl From<&str> for ParticipantId {
    fn from(name: &str) -> Self {
        ParticipantId::Name(name.to_string())
    }
}

impl From<String> for ParticipantId {
    fn from(name: String) -> Self {
        ParticipantId::Name(name)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParticipantId::Id(id) => write!(f, "user({})", id),
            ParticipantId::Name(name) => write!(f, "{}", name),
        }
    }
}

/// Exact money amount with two fractional digits
///
/// Positive balances are owed to the participant, negative balances are owed
/// by the participant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Fractional digits carried by every amount
    pub const SCALE: u32 = 2;

    /// Zero
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Largest amount a single expense record may carry (7 significant digits)
    pub const MAX_RECORD: Money = Money(Decimal::from_parts(9_999_999, 0, 0, false, 2));

    /// Largest magnitude accepted from a decimal (just under 10^15)
    pub const MAX_ABS: Money = Money(Decimal::from_parts(1_569_325_055, 23_283_064, 0, false, 2));

    /// Create from minor units (cents)
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, Self::SCALE))
    }

    /// Create from a decimal, rejecting sub-cent precision and magnitudes
    /// above [`Money::MAX_ABS`]
    pub fn from_decimal(value: Decimal) -> Result<Self> {
        if value.abs() > Self::MAX_ABS.0 {
            return Err(Error::InvalidAmount(format!(
                "{} exceeds the largest amount {}",
                value,
                Self::MAX_ABS
            )));
        }
        if value.normalize().scale() > Self::SCALE {
            return Err(Error::InvalidAmount(format!(
                "{} has more than {} fractional digits",
                value,
                Self::SCALE
            )));
        }
        let mut value = value;
        value.rescale(Self::SCALE);
        Ok(Money(value))
    }

    /// Validate an amount taken from a single expense record
    pub fn record_amount(value: Decimal) -> Result<Self> {
        let money = Self::from_decimal(value)?;
        if !money.is_positive() || money > Self::MAX_RECORD {
            return Err(Error::InvalidAmount(format!(
                "record amount {} must be in (0, {}]",
                money,
                Self::MAX_RECORD
            )));
        }
        Ok(money)
    }

    /// Underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if strictly positive (participant is owed money)
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Check if strictly negative (participant owes money)
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Absolute value
    pub fn abs(&self) -> Money {
        Money(self.0.abs())
    }
}

impl TryFrom<Decimal> for Money {
    type Error = Error;

    fn try_from(value: Decimal) -> Result<Self> {
        Money::from_decimal(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl FromStr for Money {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value = Decimal::from_str(s.trim())
            .map_err(|e| Error::InvalidAmount(format!("{:?}: {}", s, e)))?;
        Money::from_decimal(value)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

/// Planned transfer: `from` pays `to` the `amount`
///
/// Created by settlement strategies only. The amount is always positive and
/// the two parties are always distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord")]
pub struct Transaction {
    from: ParticipantId,
    to: ParticipantId,
    amount: Money,
}

impl Transaction {
    pub(crate) fn new(from: ParticipantId, to: ParticipantId, amount: Money) -> Self {
        debug_assert!(amount.is_positive(), "transaction amount must be positive");
        debug_assert!(from != to, "transaction parties must differ");
        Self { from, to, amount }
    }

    /// Payer
    pub fn from(&self) -> &ParticipantId {
        &self.from
    }

    /// Payee
    pub fn to(&self) -> &ParticipantId {
        &self.to
    }

    /// Amount paid
    pub fn amount(&self) -> Money {
        self.amount
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.from, self.to, self.amount)
    }
}

/// Settlement result: the planned transfers for one balance sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Strategy that produced the plan
    strategy: StrategyKind,

    /// Participants on the settled sheet
    participant_count: usize,

    /// Transfers in the order the strategy emitted them
    transactions: Vec<Transaction>,
}

impl Settlement {
    pub(crate) fn new(
        strategy: StrategyKind,
        participant_count: usize,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self {
            strategy,
            participant_count,
            transactions,
        }
    }

    /// Strategy used
    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    /// Planned transfers
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Take the planned transfers
    pub fn into_transactions(self) -> Vec<Transaction> {
        self.transactions
    }

    /// Number of planned transfers
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Total money moved
    pub fn total_amount(&self) -> Money {
        self.transactions.iter().map(Transaction::amount).sum()
    }

    /// Apply every transaction to a copy of `sheet` and check all balances reach zero
    pub fn verify(&self, sheet: &BalanceSheet) -> Result<()> {
        let mut remaining = sheet.clone();
        for transaction in &self.transactions {
            remaining.apply(transaction);
        }

        if !remaining.is_settled() {
            return Err(Error::InvariantViolation(format!(
                "{} settlement leaves balances {}",
                self.strategy, remaining
            )));
        }

        Ok(())
    }

    /// Summary statistics
    pub fn stats(&self) -> SettlementStats {
        let total_transferred = self.total_amount();
        let upper_bound = self.participant_count.saturating_sub(1);

        SettlementStats {
            participant_count: self.participant_count,
            transaction_count: self.transactions.len(),
            total_transferred,
            transfers_below_bound: upper_bound.saturating_sub(self.transactions.len()),
        }
    }
}

/// Settlement statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementStats {
    /// Participants on the sheet
    pub participant_count: usize,

    /// Transfers planned
    pub transaction_count: usize,

    /// Total money moved
    pub total_transferred: Money,

    /// How many transfers fewer than the N−1 bound
    pub transfers_below_bound: usize,
}

/// Wire shape of a transaction; `_from` is the legacy key for the payer
#[derive(Deserialize)]
struct TransactionRecord {
    #[serde(alias = "_from")]
    from: ParticipantId,
    to: ParticipantId,
    amount: Money,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = Error;

    fn try_from(record: TransactionRecord) -> Result<Self> {
        if !record.amount.is_positive() {
            return Err(Error::InvalidAmount(format!(
                "transaction amount {} must be positive",
                record.amount
            )));
        }
        if record.from == record.to {
            return Err(Error::Serialization(format!(
                "transaction from {} to itself",
                record.from
            )));
        }
        Ok(Transaction {
            from: record.from,
            to: record.to,
            amount: record.amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_exact_addition() {
        // 0.10 added ten times is exactly 1.00
        let dime = Money::from_cents(10);
        let total: Money = std::iter::repeat(dime).take(10).sum();
        assert_eq!(total, Money::from_cents(100));
        assert_eq!(total.to_string(), "1.00");
    }

    #[test]
    fn test_money_rejects_sub_cent() {
        assert!(Money::from_decimal(Decimal::new(1001, 3)).is_err());
        // Trailing zeros are not extra precision
        let money = Money::from_decimal(Decimal::new(1000, 3)).unwrap();
        assert_eq!(money, Money::from_cents(100));
    }

    #[test]
    fn test_money_parse_and_display() {
        let money: Money = " 12.5 ".parse().unwrap();
        assert_eq!(money.to_string(), "12.50");
        assert_eq!((-money).to_string(), "-12.50");
        assert!("abc".parse::<Money>().is_err());
    }

    #[test]
    fn test_money_rejects_oversized() {
        assert_eq!(Money::MAX_ABS.to_string(), "999999999999999.99");
        assert!(Money::from_decimal(Money::MAX_ABS.as_decimal()).is_ok());
        assert!(Money::from_decimal(-Money::MAX_ABS.as_decimal()).is_ok());
        assert!(matches!(
            Money::from_decimal(Decimal::MAX),
            Err(Error::InvalidAmount(_))
        ));
        assert!(serde_json::from_str::<Money>(r#""79228162514264337593543950335""#).is_err());
    }

    #[test]
    fn test_record_amount_bounds() {
        assert!(Money::record_amount(Decimal::new(9_999_999, 2)).is_ok());
        assert!(Money::record_amount(Decimal::new(10_000_000, 2)).is_err());
        assert!(Money::record_amount(Decimal::ZERO).is_err());
        assert!(Money::record_amount(Decimal::new(-100, 2)).is_err());
    }

    #[test]
    fn test_money_sign() {
        assert!(Money::from_cents(1).is_positive());
        assert!(Money::from_cents(-1).is_negative());
        assert!(Money::ZERO.is_zero());
        assert_eq!(Money::from_cents(-250).abs(), Money::from_cents(250));
    }

    #[test]
    fn test_participant_ordering() {
        assert!(ParticipantId::from(2u64) < ParticipantId::from(10u64));
        assert!(ParticipantId::from(99u64) < ParticipantId::from("alice"));
        assert!(ParticipantId::from("alice") < ParticipantId::from("bob"));
    }

    #[test]
    fn test_transaction_json() {
        let tx = Transaction::new(
            ParticipantId::from(2u64),
            ParticipantId::from(1u64),
            Money::from_cents(1050),
        );
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json, serde_json::json!({"from": 2, "to": 1, "amount": "10.50"}));
        assert_eq!(tx.to_string(), "user(2) -> user(1): 10.50");
    }

    #[test]
    fn test_transaction_legacy_key() {
        let tx: Transaction =
            serde_json::from_str(r#"{"_from": "bob", "to": "alice", "amount": "5.00"}"#).unwrap();
        assert_eq!(tx.from(), &ParticipantId::from("bob"));
        assert_eq!(tx.amount(), Money::from_cents(500));
    }

    #[test]
    fn test_settlement_stats() {
        let settlement = Settlement::new(
            StrategyKind::Greedy,
            4,
            vec![
                Transaction::new("D".into(), "A".into(), Money::from_cents(5000)),
                Transaction::new("C".into(), "A".into(), Money::from_cents(250)),
            ],
        );

        let stats = settlement.stats();
        assert_eq!(stats.transaction_count, 2);
        assert_eq!(stats.total_transferred, Money::from_cents(5250));
        assert_eq!(stats.transfers_below_bound, 1);
    }

    #[test]
    fn test_transaction_rejects_bad_wire_values() {
        assert!(serde_json::from_str::<Transaction>(
            r#"{"from": "bob", "to": "alice", "amount": "0"}"#
        )
        .is_err());
        assert!(serde_json::from_str::<Transaction>(
            r#"{"from": "bob", "to": "bob", "amount": "1"}"#
        )
        .is_err());
    }
}
