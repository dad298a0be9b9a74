use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::account::{Account, AccountNumber};
use crate::transaction::{LedgerError, Transaction, TransactionType};

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// The in-memory set of accounts and the only way to change their balances.
///
/// Accounts are kept in creation order and addressed by account number.
#[derive(Debug)]
pub struct Ledger {
    accounts: Vec<Account>,
    today: fn() -> NaiveDate,
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Ledger::with_clock(local_today)
    }

    /// Builds a ledger that dates every record with `today()`.
    pub fn with_clock(today: fn() -> NaiveDate) -> Self {
        Ledger {
            accounts: Vec::new(),
            today,
        }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn find_account(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.iter().find(|account| account.number == number)
    }

    fn position(&self, number: AccountNumber) -> Result<usize, LedgerError> {
        self.accounts
            .iter()
            .position(|account| account.number == number)
            .ok_or(LedgerError::AccountNotFound(number))
    }

    fn get_account_mut(&mut self, number: AccountNumber) -> Result<&mut Account, LedgerError> {
        let index = self.position(number)?;
        Ok(&mut self.accounts[index])
    }

    /// Opens a new account with an empty history.
    ///
    /// Neither the name nor the sign of the starting balance is checked.
    pub fn create_account(
        &mut self,
        name: impl Into<String>,
        number: AccountNumber,
        initial_balance: f64,
    ) -> Result<&Account, LedgerError> {
        if self.find_account(number).is_some() {
            warn!(account = number, "duplicate account number");
            return Err(LedgerError::DuplicateAccount(number));
        }

        let account = Account::new(number, name, initial_balance);
        info!(account = number, balance = initial_balance, "account created");

        self.accounts.push(account);
        Ok(&self.accounts[self.accounts.len() - 1])
    }

    pub fn balance(&self, number: AccountNumber) -> Result<f64, LedgerError> {
        self.find_account(number)
            .map(|account| account.balance)
            .ok_or(LedgerError::AccountNotFound(number))
    }

    /// Credits `amount` to the account. Negative amounts are not rejected.
    pub fn deposit(&mut self, number: AccountNumber, amount: f64) -> Result<(), LedgerError> {
        let date = (self.today)();
        let account = self.get_account_mut(number)?;

        account.balance += amount;
        account
            .transactions
            .push(Transaction::new(TransactionType::Deposit, amount, date));

        debug!(account = number, amount, balance = account.balance, "deposit");
        Ok(())
    }

    /// Debits `amount` from the account if the balance covers it.
    pub fn withdraw(&mut self, number: AccountNumber, amount: f64) -> Result<(), LedgerError> {
        let date = (self.today)();
        let account = self.get_account_mut(number)?;

        // Written as `>=` so a NaN amount is never covered.
        let covered = account.balance >= amount;
        if !covered {
            warn!(account = number, amount, balance = account.balance, "withdrawal rejected");
            return Err(LedgerError::InsufficientFunds {
                account: number,
                balance: account.balance,
                requested: amount,
            });
        }

        account.balance -= amount;
        account
            .transactions
            .push(Transaction::new(TransactionType::Withdrawal, amount, date));

        debug!(account = number, amount, balance = account.balance, "withdrawal");
        Ok(())
    }

    /// Moves `amount` from `source` to `destination`.
    ///
    /// Both accounts are resolved and the source balance checked before
    /// anything is written, so either both legs are recorded or neither is.
    /// A transfer to the same account is allowed and leaves the balance
    /// unchanged while still recording both legs.
    pub fn transfer(
        &mut self,
        source: AccountNumber,
        destination: AccountNumber,
        amount: f64,
    ) -> Result<(), LedgerError> {
        let date = (self.today)();
        let from = self.position(source)?;
        let to = self.position(destination)?;

        let balance = self.accounts[from].balance;
        let covered = balance >= amount;
        if !covered {
            warn!(source, destination, amount, balance, "transfer rejected");
            return Err(LedgerError::InsufficientFunds {
                account: source,
                balance,
                requested: amount,
            });
        }

        let out = Transaction::new(TransactionType::TransferOut, amount, date);
        let inbound = Transaction::new(TransactionType::TransferIn, amount, date);

        if from == to {
            let account = &mut self.accounts[from];
            account.balance -= amount;
            account.balance += amount;
            account.transactions.push(out);
            account.transactions.push(inbound);
        } else {
            let (sender, receiver) = pair_mut(&mut self.accounts, from, to);
            sender.balance -= amount;
            receiver.balance += amount;
            sender.transactions.push(out);
            receiver.transactions.push(inbound);
        }

        debug!(source, destination, amount, "transfer");
        Ok(())
    }

    /// The last `count` transactions of an account, oldest first.
    ///
    /// An account without any transactions yields an empty slice.
    pub fn transaction_history(
        &self,
        number: AccountNumber,
        count: usize,
    ) -> Result<&[Transaction], LedgerError> {
        self.find_account(number)
            .map(|account| account.recent_transactions(count))
            .ok_or(LedgerError::AccountNotFound(number))
    }
}

// `a` and `b` must differ.
fn pair_mut(accounts: &mut [Account], a: usize, b: usize) -> (&mut Account, &mut Account) {
    if a < b {
        let (left, right) = accounts.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = accounts.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
