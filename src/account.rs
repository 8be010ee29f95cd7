//! Account model and balance operations.
//!
//! An account's mutable state sits behind its own lock, so an `Arc<Account>`
//! can be debited and credited from several threads at once.

use crate::bank::BankProfile;
use crate::error::{LedgerError, Result};
use crate::money::Money;
use parking_lot::{Mutex, MutexGuard};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

static NEXT_ACCOUNT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique account identity.
///
/// Only used to order lock acquisition in transfers. It takes no part in
/// account equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(u64);

impl AccountId {
    fn next() -> Self {
        AccountId(NEXT_ACCOUNT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A holder name and an exact balance.
///
/// # Equality
///
/// Two accounts are equal when their holder and balance are equal, even if
/// they are distinct instances. Keep this in mind before using accounts as
/// set members or map keys: a balance change also changes the hash.
///
/// # Bank link
///
/// Registering the account with a [`Bank`](crate::Bank) stores a weak
/// reference to the bank's profile. The account never keeps its bank alive.
pub struct Account {
    id: AccountId,
    state: Mutex<AccountState>,
}

/// Lock-protected part of an account.
pub(crate) struct AccountState {
    holder: String,
    balance: Money,
    bank: Weak<BankProfile>,
}

/// Owned copy of an account's holder and balance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountSnapshot {
    pub holder: String,
    pub balance: Money,
}

impl Account {
    /// Creates an account. Any initial balance is accepted, zero and negative included.
    pub fn new(holder: impl Into<String>, initial_balance: Money) -> Self {
        Account {
            id: AccountId::next(),
            state: Mutex::new(AccountState {
                holder: holder.into(),
                balance: initial_balance,
                bank: Weak::new(),
            }),
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn holder(&self) -> String {
        self.state.lock().holder.clone()
    }

    pub fn set_holder(&self, holder: impl Into<String>) {
        self.state.lock().holder = holder.into();
    }

    /// Returns the current balance at full precision.
    pub fn balance(&self) -> Money {
        self.state.lock().balance
    }

    /// Withdraws `amount` from the balance.
    ///
    /// Fails with [`LedgerError::InsufficientFunds`] when `amount` is greater
    /// than the balance; an amount equal to the balance leaves zero. The
    /// balance is unchanged on failure.
    pub fn debit(&self, amount: Money) -> Result<()> {
        let mut state = self.state.lock();
        let balance = state.debited(amount)?;
        state.balance = balance;
        Ok(())
    }

    /// Adds `amount` to the balance.
    ///
    /// There is no upper bound; the only failure is a result too large for
    /// the decimal representation.
    pub fn credit(&self, amount: Money) -> Result<()> {
        let mut state = self.state.lock();
        let balance = state.credited(amount)?;
        state.balance = balance;
        Ok(())
    }

    /// Returns the profile of the bank this account was registered with, if
    /// that bank still exists.
    pub fn bank(&self) -> Option<Arc<BankProfile>> {
        self.state.lock().bank.upgrade()
    }

    /// Copies out holder and balance under a single lock.
    pub fn snapshot(&self) -> AccountSnapshot {
        let state = self.state.lock();
        AccountSnapshot {
            holder: state.holder.clone(),
            balance: state.balance,
        }
    }

    pub(crate) fn attach_to(&self, profile: &Arc<BankProfile>) {
        self.state.lock().bank = Arc::downgrade(profile);
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, AccountState> {
        self.state.lock()
    }
}

impl AccountState {
    /// Balance after debiting `amount`, without applying it.
    pub(crate) fn debited(&self, amount: Money) -> Result<Money> {
        if amount > self.balance {
            return Err(LedgerError::InsufficientFunds {
                holder: self.holder.clone(),
                balance: self.balance,
                requested: amount,
            });
        }

        self.balance
            .checked_sub(amount)
            .ok_or_else(|| self.overflow(amount))
    }

    /// Balance after crediting `amount`, without applying it.
    pub(crate) fn credited(&self, amount: Money) -> Result<Money> {
        self.balance
            .checked_add(amount)
            .ok_or_else(|| self.overflow(amount))
    }

    pub(crate) fn set_balance(&mut self, balance: Money) {
        self.balance = balance;
    }

    fn overflow(&self, amount: Money) -> LedgerError {
        LedgerError::Overflow {
            holder: self.holder.clone(),
            balance: self.balance,
            amount,
        }
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        // Identity implies equal values; skips two snapshots.
        if std::ptr::eq(self, other) {
            return true;
        }
        self.snapshot() == other.snapshot()
    }
}

impl Eq for Account {}

impl Hash for Account {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.snapshot().hash(state);
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("holder", &snapshot.holder)
            .field("balance", &snapshot.balance)
            .finish()
    }
}
