//! Bank: an ordered set of registered accounts and transfers between accounts.

use crate::account::Account;
use crate::error::Result;
use crate::money::Money;
use log::debug;
use parking_lot::RwLock;
use std::sync::Arc;

/// Name-bearing part of a bank.
///
/// Accounts hold a weak reference to this, never to the [`Bank`] itself, so
/// there is no ownership cycle between a bank and its accounts.
#[derive(Debug)]
pub struct BankProfile {
    name: RwLock<String>,
}

impl BankProfile {
    pub fn name(&self) -> String {
        self.name.read().clone()
    }
}

/// Owns accounts in registration order.
///
/// Registration does not detect duplicates, and transfers accept accounts
/// that were never registered here.
#[derive(Debug)]
pub struct Bank {
    profile: Arc<BankProfile>,
    accounts: Vec<Arc<Account>>,
}

impl Bank {
    /// Creates a bank with no accounts.
    pub fn new(name: impl Into<String>) -> Self {
        Bank {
            profile: Arc::new(BankProfile {
                name: RwLock::new(name.into()),
            }),
            accounts: Vec::new(),
        }
    }

    pub fn name(&self) -> String {
        self.profile.name()
    }

    /// Renames the bank. Registered accounts see the new name through their bank link.
    pub fn set_name(&self, name: impl Into<String>) {
        *self.profile.name.write() = name.into();
    }

    /// Appends `account` and points its bank link at this bank.
    ///
    /// Returns the shared handle now held by the bank.
    pub fn add_account(&mut self, account: impl Into<Arc<Account>>) -> Arc<Account> {
        let account = account.into();
        account.attach_to(&self.profile);
        self.accounts.push(Arc::clone(&account));
        account
    }

    /// Registered accounts, in registration order.
    pub fn accounts(&self) -> &[Arc<Account>] {
        &self.accounts
    }

    /// First account, in registration order, matching `predicate`.
    pub fn find_account<P>(&self, mut predicate: P) -> Option<&Arc<Account>>
    where
        P: FnMut(&Account) -> bool,
    {
        self.accounts.iter().find(|account| predicate(account))
    }

    /// First account, in registration order, whose holder is `holder`.
    pub fn find_by_holder(&self, holder: &str) -> Option<&Arc<Account>> {
        self.find_account(|account| account.holder() == holder)
    }

    /// Moves `amount` from `from` to `to`.
    ///
    /// Both accounts stay locked for the whole transfer, taken in ascending
    /// [`AccountId`](crate::AccountId) order. The debit is checked first: if
    /// it fails, its error is returned and neither balance changes.
    pub fn transfer(&self, from: &Account, to: &Account, amount: Money) -> Result<()> {
        if from.id() == to.id() {
            let state = from.lock();
            state.debited(amount)?;
            debug!("Transfer of {} from {} to itself", amount, from.id());
            return Ok(());
        }

        let (mut from_state, mut to_state) = if from.id() < to.id() {
            let from_state = from.lock();
            let to_state = to.lock();
            (from_state, to_state)
        } else {
            let to_state = to.lock();
            let from_state = from.lock();
            (from_state, to_state)
        };

        let from_balance = from_state.debited(amount)?;
        let to_balance = to_state.credited(amount)?;
        from_state.set_balance(from_balance);
        to_state.set_balance(to_balance);

        debug!(
            "Transferred {} from {} to {} in {}",
            amount,
            from.id(),
            to.id(),
            self.name()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use std::thread;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    #[test]
    fn test_new_bank_is_empty() {
        let bank = Bank::new("Banco del Estado");
        assert_eq!(bank.name(), "Banco del Estado");
        assert!(bank.accounts().is_empty());
    }

    #[test]
    fn test_add_account_links_account_to_bank() {
        let mut bank = Bank::new("First");
        let account = bank.add_account(Account::new("John Doe", money("2500")));

        assert_eq!(bank.accounts().len(), 1);
        assert_eq!(account.bank().unwrap().name(), "First");

        bank.set_name("Banco del Estado");
        assert_eq!(account.bank().unwrap().name(), "Banco del Estado");
    }

    #[test]
    fn test_bank_link_does_not_keep_bank_alive() {
        let mut bank = Bank::new("Gone");
        let account = bank.add_account(Account::new("John Doe", money("1")));
        drop(bank);

        assert!(account.bank().is_none());
        assert_eq!(account.balance(), money("1"));
    }

    #[test]
    fn test_add_account_does_not_detect_duplicates() {
        let mut bank = Bank::new("Dup");
        let account = Arc::new(Account::new("John Doe", money("1")));
        bank.add_account(Arc::clone(&account));
        bank.add_account(account);
        assert_eq!(bank.accounts().len(), 2);
    }

    #[test]
    fn test_find_returns_first_match_in_registration_order() {
        let mut bank = Bank::new("Find");
        bank.add_account(Account::new("John Doe", money("2500")));
        let first = bank.add_account(Account::new("Andres", money("1500.8989")));
        bank.add_account(Account::new("Andres", money("1")));

        let found = bank.find_by_holder("Andres").unwrap();
        assert!(Arc::ptr_eq(found, &first));
        assert!(bank.find_by_holder("Nobody").is_none());
        assert!(bank
            .find_account(|account| account.balance() > money("2000"))
            .is_some());
    }

    #[test]
    fn test_transfer_moves_funds() {
        let bank = Bank::new("Transfer");
        let from = Account::new("John Doe", money("1000"));
        let to = Account::new("Andres", money("500"));

        bank.transfer(&from, &to, money("300")).unwrap();

        assert_eq!(from.balance().to_string(), "700");
        assert_eq!(to.balance().to_string(), "800");
    }

    #[test]
    fn test_failed_transfer_leaves_both_accounts_untouched() {
        let bank = Bank::new("Atomic");
        let from = Account::new("John Doe", money("1000"));
        let to = Account::new("Andres", money("500"));

        let err = bank.transfer(&from, &to, money("1500")).unwrap_err();

        assert!(err.is_insufficient_funds());
        assert_eq!(from.balance().to_string(), "1000");
        assert_eq!(to.balance().to_string(), "500");
    }

    #[test]
    fn test_transfer_with_credit_overflow_leaves_both_accounts_untouched() {
        let bank = Bank::new("Overflow");
        let from = Account::new("John Doe", money("10"));
        let to = Account::new("Andres", Money::new(rust_decimal::Decimal::MAX));

        assert!(bank.transfer(&from, &to, money("1")).is_err());
        assert_eq!(from.balance().to_string(), "10");
        assert_eq!(to.balance(), Money::new(rust_decimal::Decimal::MAX));
    }

    #[test]
    fn test_transfer_to_same_account() {
        let bank = Bank::new("Self");
        let account = Account::new("Andres", money("100"));

        bank.transfer(&account, &account, money("100")).unwrap();
        assert_eq!(account.balance().to_string(), "100");

        assert!(bank.transfer(&account, &account, money("100.01")).is_err());
        assert_eq!(account.balance().to_string(), "100");
    }

    #[test]
    fn test_transfer_between_registered_accounts() {
        let mut bank = Bank::new("Banco del Estado");
        let john = bank.add_account(Account::new("Jhon Doe", money("2500")));
        let andres = bank.add_account(Account::new("Andres", money("1500.8989")));

        bank.transfer(&andres, &john, money("500")).unwrap();

        assert_eq!(andres.balance().to_string(), "1000.8989");
        assert_eq!(john.balance().to_string(), "3000");
        assert_eq!(bank.accounts().len(), 2);
        assert_eq!(john.bank().unwrap().name(), "Banco del Estado");
    }

    #[test]
    fn test_opposite_transfers_do_not_deadlock() {
        let bank = Arc::new(Bank::new("Concurrent"));
        let a = Arc::new(Account::new("A", money("1000")));
        let b = Arc::new(Account::new("B", money("1000")));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let bank = Arc::clone(&bank);
                let (from, to) = if i % 2 == 0 {
                    (Arc::clone(&a), Arc::clone(&b))
                } else {
                    (Arc::clone(&b), Arc::clone(&a))
                };
                thread::spawn(move || {
                    for _ in 0..500 {
                        bank.transfer(&from, &to, money("1")).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(a.balance() + b.balance(), money("2000"));
        assert_eq!(a.balance(), money("1000"));
    }
}
