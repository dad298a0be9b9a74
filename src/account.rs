use std::fmt::Display;

use serde::Serialize;

use crate::transaction::Transaction;

pub type AccountNumber = u32;

#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct Account {
    /// Account number. Unique within a ledger.
    #[serde(rename = "account")]
    pub number: AccountNumber,

    pub name: String,

    pub balance: f64,

    /// Append-only, oldest first.
    #[serde(skip)]
    pub(crate) transactions: Vec<Transaction>,
}

impl Account {
    pub fn new(number: AccountNumber, name: impl Into<String>, balance: f64) -> Self {
        Account {
            number,
            name: name.into(),
            balance,
            transactions: Vec::new(),
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The last `count` transactions, oldest first.
    pub fn recent_transactions(&self, count: usize) -> &[Transaction] {
        let start = self.transactions.len().saturating_sub(count);
        &self.transactions[start..]
    }
}

impl Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Name: {}, Account Number: {}, Balance: Rs {}",
            self.name, self.number, self.balance
        )
    }
}
