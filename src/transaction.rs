use std::fmt::Display;

use chrono::NaiveDate;
use serde::Serialize;

use crate::account::AccountNumber;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// A deposit is a credit to the account, increasing its balance.
    ///
    /// Deposits are never rejected, not even for negative amounts.
    Deposit,

    /// A withdrawal is a debit to the account. It is only recorded
    /// when the balance covers the full amount.
    Withdrawal,

    /// The receiving leg of a transfer.
    TransferIn,

    /// The sending leg of a transfer. Always recorded together with
    /// a `TransferIn` on the destination account.
    TransferOut,
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TransactionType::Deposit => "Deposit",
            TransactionType::Withdrawal => "Withdrawal",
            TransactionType::TransferIn => "Transfer In",
            TransactionType::TransferOut => "Transfer Out",
        };

        f.write_str(label)
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum LedgerError {
    /// An account with this number already exists.
    #[error("account number {0} already exists")]
    DuplicateAccount(AccountNumber),

    /// No account with this number exists.
    #[error("account {0} not found")]
    AccountNotFound(AccountNumber),

    /// The account balance does not cover the requested amount.
    #[error("insufficient balance in account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        account: AccountNumber,
        balance: f64,
        requested: f64,
    },
}

/// A single balance-affecting event recorded on one account.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transaction {
    pub tx_type: TransactionType,

    /// Using an `f64` here is not advised but done for simplicity.
    /// Amounts should be stored with fixed precision to ensure
    /// correct and precise arithmetic operations.
    pub amount: f64,

    /// Calendar date the record was appended on.
    pub date: NaiveDate,
}

impl Transaction {
    pub fn new(tx_type: TransactionType, amount: f64, date: NaiveDate) -> Self {
        Transaction {
            tx_type,
            amount,
            date,
        }
    }
}

impl Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {}: Rs {}",
            self.date.format("%Y-%m-%d"),
            self.tx_type,
            self.amount
        )
    }
}
