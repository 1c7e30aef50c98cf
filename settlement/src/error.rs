//! Error types for the settlement engine

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type for settlement operations
pub type Result<T> = std::result::Result<T, Error>;

/// Settlement errors
#[derive(Error, Debug)]
pub enum Error {
    /// Balances do not sum to zero; the sheet is rejected before any strategy runs
    #[error("Invalid balance sheet: total paid amount is not equal to the total owed amount (off by {total})")]
    InvalidBalanceSheet {
        /// Sum of all balances on the rejected sheet
        total: Decimal,
    },

    /// Strategy name not recognised by the selector
    #[error("Unknown settlement strategy: {0}")]
    UnknownStrategy(String),

    /// Pop on an empty priority queue
    #[error("Cannot pop from an empty priority queue")]
    EmptyQueue,

    /// Internal algorithm invariant broken
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Money value that cannot be represented
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Expense record whose totals disagree
    #[error("Invalid expense: {0}")]
    InvalidExpense(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error signals a bug in the engine rather than bad input
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::EmptyQueue | Error::InvariantViolation(_))
    }
}
