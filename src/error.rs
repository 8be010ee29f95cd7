//! Error types for the ledger.

use crate::money::Money;
use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur while operating on accounts or running a script.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Debit amount exceeds the current balance
    #[error("Insufficient funds: {holder} holds {balance}, requested {requested}")]
    InsufficientFunds {
        holder: String,
        balance: Money,
        requested: Money,
    },

    /// Result does not fit the decimal representation
    #[error("Amount overflow: {balance} + {amount} for {holder}")]
    Overflow {
        holder: String,
        balance: Money,
        amount: Money,
    },

    /// No registered account has this holder
    #[error("Unknown account holder: {0}")]
    UnknownHolder(String),

    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Missing input file argument
    #[error("Missing input file argument. Usage: bank-ledger <script.csv> [bank name]")]
    MissingArgument,
}

impl LedgerError {
    /// Returns `true` for the insufficient funds failure.
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, LedgerError::InsufficientFunds { .. })
    }
}
