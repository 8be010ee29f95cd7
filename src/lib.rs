//! # Bank Ledger
//!
//! Bank accounts holding exact decimal balances, with debit/credit
//! operations, an insufficient funds failure, and atomic transfers between
//! accounts.
//!
//! ## Design Principles
//!
//! - **Exact arithmetic**: balances are `rust_decimal` values, never rounded
//! - **Value equality**: accounts compare by holder and balance
//! - **Per-account locking**: transfers lock both accounts in a fixed order
//! - **No ownership cycle**: accounts only hold a weak link to their bank
//!
//! ## Example
//!
//! ```
//! use bank_ledger::{Account, Bank, Money};
//! use std::str::FromStr;
//!
//! let mut bank = Bank::new("Banco del Estado");
//! let from = bank.add_account(Account::new("John Doe", Money::from(1000)));
//! let to = bank.add_account(Account::new("Andres", Money::from(500)));
//!
//! bank.transfer(&from, &to, Money::from_str("300").unwrap()).unwrap();
//! assert_eq!(from.balance().to_string(), "700");
//! assert_eq!(to.balance().to_string(), "800");
//!
//! assert!(bank.transfer(&from, &to, Money::from(1500)).is_err());
//! assert_eq!(from.balance().to_string(), "700");
//! ```

pub mod account;
pub mod bank;
pub mod error;
pub mod ledger;
pub mod money;
pub mod operation;

pub use account::{Account, AccountId, AccountSnapshot};
pub use bank::{Bank, BankProfile};
pub use error::{LedgerError, Result};
pub use ledger::Ledger;
pub use money::Money;
pub use operation::{Operation, OperationRecord};
