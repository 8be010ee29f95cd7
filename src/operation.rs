//! Script records for the batch runner.

use crate::money::Money;
use serde::Deserialize;
use std::str::FromStr;

/// Raw operation record as read from CSV.
///
/// Columns are `op,holder,target,amount`. `target` is only meaningful for
/// transfers (receiving holder) and renames (new holder name).
#[derive(Debug, Deserialize)]
pub struct OperationRecord {
    /// Operation name: open, debit, credit, transfer, rename
    pub op: String,

    /// Holder the operation applies to
    pub holder: String,

    /// Receiving holder or new holder name
    pub target: Option<String>,

    /// Amount (absent for rename)
    pub amount: Option<String>,
}

impl OperationRecord {
    /// Parses the raw CSV record into a typed operation.
    ///
    /// Returns `None` if the record is invalid (unknown op, missing amount or target).
    pub fn parse(&self) -> Option<Operation> {
        let op = self.op.trim().to_lowercase();
        let holder = self.holder.trim().to_string();

        match op.as_str() {
            "open" => Some(Operation::Open {
                holder,
                balance: self.parse_amount()?,
            }),
            "debit" => Some(Operation::Debit {
                holder,
                amount: self.parse_amount()?,
            }),
            "credit" => Some(Operation::Credit {
                holder,
                amount: self.parse_amount()?,
            }),
            "transfer" => Some(Operation::Transfer {
                from: holder,
                to: self.parse_target()?,
                amount: self.parse_amount()?,
            }),
            "rename" => Some(Operation::Rename {
                holder,
                new_holder: self.parse_target()?,
            }),
            _ => None,
        }
    }

    fn parse_amount(&self) -> Option<Money> {
        let amount = self.amount.as_ref()?.trim();
        if amount.is_empty() {
            return None;
        }
        Money::from_str(amount).ok()
    }

    fn parse_target(&self) -> Option<String> {
        let target = self.target.as_ref()?.trim();
        if target.is_empty() {
            return None;
        }
        Some(target.to_string())
    }
}

/// A parsed operation ready to run against a bank.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Register a new account with an initial balance.
    Open { holder: String, balance: Money },

    /// Withdraw from an account; fails on insufficient funds.
    Debit { holder: String, amount: Money },

    /// Deposit into an account.
    Credit { holder: String, amount: Money },

    /// Debit `from` then credit `to`, atomically.
    Transfer {
        from: String,
        to: String,
        amount: Money,
    },

    /// Change an account's holder name.
    Rename { holder: String, new_holder: String },
}
