//! Batch runner driving a bank from a CSV operation script.
//!
//! Records are applied one at a time in file order. Records that fail to
//! parse or to apply are logged and skipped; the run continues.

use crate::account::Account;
use crate::bank::Bank;
use crate::error::{LedgerError, Result};
use crate::money::Money;
use crate::operation::{Operation, OperationRecord};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use log::{debug, warn};
use serde::Serialize;
use std::io::{Read, Write};
use std::sync::Arc;

/// Output row: one per registered account.
#[derive(Debug, Serialize)]
struct BalanceRow {
    bank: String,
    holder: String,
    balance: Money,
}

/// Applies script operations to a single bank.
///
/// Holders are resolved with [`Bank::find_by_holder`], so when several
/// accounts share a holder name the first registered one is used.
pub struct Ledger {
    bank: Bank,
}

impl Ledger {
    /// Creates a ledger over an empty bank.
    pub fn new(bank_name: impl Into<String>) -> Self {
        Ledger {
            bank: Bank::new(bank_name),
        }
    }

    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    /// Processes operations from a CSV reader in streaming fashion.
    ///
    /// Invalid records and failed operations are logged at warn level and skipped.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        for (row_idx, result) in csv_reader.deserialize::<OperationRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            match result {
                Ok(record) => {
                    if let Some(op) = record.parse() {
                        if let Err(e) = self.apply(op) {
                            warn!("Row {}: {}", row_num, e);
                        } else {
                            debug!("Row {}: applied {}", row_num, record.op);
                        }
                    } else {
                        warn!("Row {}: Failed to parse operation record", row_num);
                    }
                }
                Err(e) => {
                    warn!("Row {}: CSV parse error: {}", row_num, e);
                }
            }
        }

        Ok(())
    }

    /// Applies a single operation to the bank.
    pub fn apply(&mut self, op: Operation) -> Result<()> {
        match op {
            Operation::Open { holder, balance } => {
                self.bank.add_account(Account::new(holder, balance));
            }
            Operation::Debit { holder, amount } => {
                self.account(&holder)?.debit(amount)?;
            }
            Operation::Credit { holder, amount } => {
                self.account(&holder)?.credit(amount)?;
            }
            Operation::Transfer { from, to, amount } => {
                let from = self.account(&from)?;
                let to = self.account(&to)?;
                self.bank.transfer(&from, &to, amount)?;
            }
            Operation::Rename { holder, new_holder } => {
                self.account(&holder)?.set_holder(new_holder);
            }
        }

        Ok(())
    }

    fn account(&self, holder: &str) -> Result<Arc<Account>> {
        self.bank
            .find_by_holder(holder)
            .cloned()
            .ok_or_else(|| LedgerError::UnknownHolder(holder.to_string()))
    }

    /// Writes final balances to CSV in registration order.
    ///
    /// Balances are written in plain form with the scale they were computed at.
    pub fn write_output<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

        csv_writer.write_record(["bank", "holder", "balance"])?;

        for account in self.bank.accounts() {
            let snapshot = account.snapshot();
            let bank = account.bank().map(|profile| profile.name()).unwrap_or_default();
            csv_writer.serialize(BalanceRow {
                bank,
                holder: snapshot.holder,
                balance: snapshot.balance,
            })?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
