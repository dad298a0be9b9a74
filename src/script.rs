use std::io;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::account::AccountNumber;
use crate::ledger::Ledger;
use crate::transaction::{LedgerError, TransactionType};

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    /// Opens an account. Uses `account`, `name` and `amount` as the
    /// starting balance.
    ///
    /// |type       |account |counterparty |amount |name  |
    /// |-----------|--------|-------------|-------|------|
    /// |open       |100     |             |500    |Alice |
    Open,

    /// |type       |account |counterparty |amount |name  |
    /// |-----------|--------|-------------|-------|------|
    /// |deposit    |100     |             |200    |      |
    Deposit,

    /// |type       |account |counterparty |amount |name  |
    /// |-----------|--------|-------------|-------|------|
    /// |withdrawal |100     |             |50     |      |
    Withdrawal,

    /// Moves `amount` from `account` to `counterparty`.
    ///
    /// |type       |account |counterparty |amount |name  |
    /// |-----------|--------|-------------|-------|------|
    /// |transfer   |100     |200          |300    |      |
    Transfer,
}

/// One row of a replay script.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Operation {
    #[serde(rename = "type")]
    pub op_type: OperationType,

    pub account: AccountNumber,

    #[serde(default)]
    pub counterparty: Option<AccountNumber>,

    #[serde(default)]
    pub amount: Option<f64>,

    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ScriptError {
    /// A column the operation needs is empty, or the amount is not a
    /// finite number.
    #[error("malformed {op:?} row: missing or invalid {column}")]
    Malformed {
        op: OperationType,
        column: &'static str,
    },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl Operation {
    fn get_amount(&self) -> Result<f64, ScriptError> {
        self.amount
            .filter(|amount| amount.is_finite())
            .ok_or(ScriptError::Malformed {
                op: self.op_type,
                column: "amount",
            })
    }

    /// Applies this operation to the ledger.
    pub fn apply_to(&self, ledger: &mut Ledger) -> Result<(), ScriptError> {
        match self.op_type {
            OperationType::Open => {
                let amount = self.get_amount()?;
                let name = self.name.clone().unwrap_or_default();
                ledger.create_account(name, self.account, amount)?;
            }
            OperationType::Deposit => {
                ledger.deposit(self.account, self.get_amount()?)?;
            }
            OperationType::Withdrawal => {
                ledger.withdraw(self.account, self.get_amount()?)?;
            }
            OperationType::Transfer => {
                let destination = self.counterparty.ok_or(ScriptError::Malformed {
                    op: self.op_type,
                    column: "counterparty",
                })?;
                ledger.transfer(self.account, destination, self.get_amount()?)?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub applied: usize,
    pub rejected: usize,
}

/// Applies every row of a CSV script in order.
///
/// Rows the ledger refuses are logged and skipped; a row that cannot be
/// parsed at all stops the replay.
pub fn replay<R: io::Read>(reader: R, ledger: &mut Ledger) -> Result<ReplaySummary, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut summary = ReplaySummary::default();

    for (row, operation) in rdr.deserialize::<Operation>().enumerate() {
        let operation = operation?;

        match operation.apply_to(ledger) {
            Ok(()) => summary.applied += 1,
            Err(err) => {
                warn!(row = row + 1, error = %err, "operation skipped");
                summary.rejected += 1;
            }
        }
    }

    info!(
        applied = summary.applied,
        rejected = summary.rejected,
        "script replayed"
    );
    Ok(summary)
}

/// Writes one `account,name,balance` row per account, in creation order.
pub fn write_accounts<W: io::Write>(ledger: &Ledger, writer: W) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    for account in ledger.accounts() {
        wtr.serialize(account)?;
    }

    wtr.flush()?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct TransactionRow {
    account: AccountNumber,
    #[serde(rename = "type")]
    tx_type: TransactionType,
    amount: f64,
    date: chrono::NaiveDate,
}

/// Writes every recorded transaction, grouped by account.
pub fn write_transactions<W: io::Write>(ledger: &Ledger, writer: W) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    for account in ledger.accounts() {
        for tx in account.transactions() {
            wtr.serialize(TransactionRow {
                account: account.number,
                tx_type: tx.tx_type,
                amount: tx.amount,
                date: tx.date,
            })?;
        }
    }

    wtr.flush()?;
    Ok(())
}
