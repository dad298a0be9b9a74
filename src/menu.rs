//! Interactive console front end.
//!
//! Reads choices from any `BufRead`, writes prompts and results to any
//! `Write`, and drives the ledger, payroll and converter. Unparseable input
//! is re-prompted; end of input ends the session as if Exit was chosen.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use tracing::debug;

use crate::account::AccountNumber;
use crate::currency::{Conversion, CurrencyConverter};
use crate::employee::{Employee, EmployeeKind};
use crate::ledger::Ledger;
use crate::transaction::LedgerError;

/// Number of records shown by the ATM history option.
pub const ATM_HISTORY_LEN: usize = 10;

pub struct Console<R, W> {
    input: R,
    output: W,
    ledger: Ledger,
    converter: CurrencyConverter,
    closed: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, ledger: Ledger, converter: CurrencyConverter) -> Self {
        Console {
            input,
            output,
            ledger,
            converter,
            closed: false,
        }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (W, Ledger) {
        (self.output, self.ledger)
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.closed = true;
            return Ok(None);
        }

        Ok(Some(line.trim().to_string()))
    }

    fn prompt_line(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Prompts until the answer parses as `T`. `None` once input runs out.
    fn prompt<T: FromStr>(&mut self, label: &str) -> io::Result<Option<T>> {
        loop {
            let line = match self.prompt_line(label)? {
                Some(line) => line,
                None => return Ok(None),
            };

            match line.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "Invalid input, try again.")?,
            }
        }
    }

    /// Like `prompt`, but also refuses NaN and infinities.
    fn prompt_amount<T>(&mut self, label: &str) -> io::Result<Option<T>>
    where
        T: FromStr + Into<f64> + Copy,
    {
        loop {
            match self.prompt::<T>(label)? {
                Some(value) if !Into::<f64>::into(value).is_finite() => {
                    writeln!(self.output, "Invalid input, try again.")?
                }
                value => return Ok(value),
            }
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        while !self.closed {
            writeln!(self.output, "\n====== Banking System Management ======")?;
            writeln!(
                self.output,
                "1. Employee Management\n2. Bank Account Management\n3. Currency Converter\n4. ATM Services\n5. Exit"
            )?;

            let choice = match self.prompt::<u32>("Choose option: ")? {
                Some(choice) => choice,
                None => break,
            };
            debug!(choice, "main menu");

            match choice {
                1 => self.employee_menu()?,
                2 => self.account_menu()?,
                3 => self.currency_menu()?,
                4 => self.atm_session()?,
                5 => {
                    writeln!(self.output, "Thank you for using the banking system. Goodbye!")?;
                    break;
                }
                _ => writeln!(self.output, "Invalid option. Please try again.")?,
            }
        }

        self.output.flush()
    }

    fn employee_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n-- Employee Management --")?;
        writeln!(self.output, "1. Visiting Employee\n2. Permanent Employee")?;

        let visiting = match self.prompt::<u32>("Choose: ")? {
            Some(1) => true,
            Some(2) => false,
            Some(_) => return writeln!(self.output, "Invalid choice."),
            None => return Ok(()),
        };

        let Some(id) = self.prompt::<u32>("Enter Employee ID: ")? else {
            return Ok(());
        };
        let Some(name) = self.prompt_line("Enter Employee Name: ")? else {
            return Ok(());
        };

        let kind = if visiting {
            let Some(daily_wage) = self.prompt_amount("Enter daily wage: ")? else {
                return Ok(());
            };
            let Some(worked_days) = self.prompt::<u32>("Enter number of worked days: ")? else {
                return Ok(());
            };
            EmployeeKind::Visiting {
                daily_wage,
                worked_days,
            }
        } else {
            let Some(monthly_salary) = self.prompt::<u32>("Enter monthly salary: ")? else {
                return Ok(());
            };
            EmployeeKind::Permanent { monthly_salary }
        };

        let employee = Employee::new(id, name, kind);
        writeln!(self.output, "\nEmployee Details:\n{}", employee)?;
        writeln!(
            self.output,
            "{}: Rs {}",
            employee.salary_label(),
            employee.compute_salary()
        )
    }

    fn account_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n-- Bank Account Management --")?;
        writeln!(
            self.output,
            "1. Create New Account\n2. Show All Accounts\n3. Search Account"
        )?;

        match self.prompt::<u32>("Choose: ")? {
            Some(1) => self.create_account(),
            Some(2) => self.show_accounts(),
            Some(3) => {
                writeln!(self.output, "Search Account:")?;
                let Some(number) =
                    self.prompt::<AccountNumber>("Enter Account Number to Search: ")?
                else {
                    return Ok(());
                };
                match self.ledger.find_account(number) {
                    Some(account) => writeln!(self.output, "{}", account),
                    None => writeln!(self.output, "Account not found."),
                }
            }
            Some(_) => writeln!(self.output, "Invalid choice."),
            None => Ok(()),
        }
    }

    fn create_account(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt_line("Enter Name: ")? else {
            return Ok(());
        };
        let Some(number) = self.prompt::<AccountNumber>("Enter Account Number: ")? else {
            return Ok(());
        };
        let Some(balance) = self.prompt_amount("Enter Initial Balance (Rs): ")? else {
            return Ok(());
        };

        match self.ledger.create_account(name, number, balance) {
            Ok(_) => writeln!(self.output, "Account Created Successfully."),
            Err(LedgerError::DuplicateAccount(_)) => {
                writeln!(self.output, "Account number already exists!")
            }
            Err(err) => writeln!(self.output, "{}", err),
        }
    }

    fn show_accounts(&mut self) -> io::Result<()> {
        writeln!(self.output, "All Account Holders:")?;
        if self.ledger.accounts().is_empty() {
            return writeln!(self.output, "No accounts found.");
        }

        for account in self.ledger.accounts() {
            writeln!(self.output, "{}", account)?;
        }

        Ok(())
    }

    fn currency_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n-- Currency Converter --")?;
        writeln!(self.output, "{}", self.converter)?;
        writeln!(self.output, "1. USD to Euro\n2. Euro to USD\n3. USD to Rs\n4. Rs to Euro")?;

        let Some(choice) = self.prompt::<u32>("Choose conversion: ")? else {
            return Ok(());
        };
        let Some(amount) = self.prompt_amount("Enter Amount: ")? else {
            return Ok(());
        };

        let conversion = match choice {
            1 => Conversion::UsdToEuro,
            2 => Conversion::EuroToUsd,
            3 => Conversion::UsdToInr,
            4 => Conversion::InrToEuro,
            _ => return writeln!(self.output, "Invalid choice."),
        };

        let converted = self.converter.convert(conversion, amount);
        writeln!(
            self.output,
            "{}",
            format_conversion(conversion, amount, converted)
        )
    }

    fn atm_session(&mut self) -> io::Result<()> {
        let Some(number) = self.prompt::<AccountNumber>("Enter your Account Number: ")? else {
            return Ok(());
        };
        if self.ledger.find_account(number).is_none() {
            return writeln!(self.output, "Account not found.");
        }

        loop {
            writeln!(self.output, "\n--- ATM Menu ---")?;
            writeln!(
                self.output,
                "1. Check Balance\n2. Deposit\n3. Withdraw\n4. Transfer\n5. Transaction History\n6. Exit"
            )?;

            let Some(choice) = self.prompt::<u32>("Choose option: ")? else {
                return Ok(());
            };
            debug!(account = number, choice, "atm menu");

            match choice {
                1 => {
                    let balance = self.ledger.balance(number);
                    self.report(balance.map(|balance| format!("Balance: Rs {}", balance)))?;
                }
                2 => {
                    let Some(amount) = self.prompt_amount("Deposit Amount (Rs): ")? else {
                        return Ok(());
                    };
                    let result = self.ledger.deposit(number, amount);
                    self.report(result.map(|_| "Deposit successful.".to_string()))?;
                }
                3 => {
                    let Some(amount) = self.prompt_amount("Withdraw Amount (Rs): ")? else {
                        return Ok(());
                    };
                    let result = self.ledger.withdraw(number, amount);
                    self.report(result.map(|_| "Withdraw successful.".to_string()))?;
                }
                4 => self.atm_transfer(number)?,
                5 => self.print_history(number, ATM_HISTORY_LEN)?,
                6 => return writeln!(self.output, "Exiting ATM..."),
                _ => writeln!(self.output, "Invalid option. Try again.")?,
            }
        }
    }

    fn atm_transfer(&mut self, source: AccountNumber) -> io::Result<()> {
        let Some(recipient) =
            self.prompt::<AccountNumber>("Enter Recipient Account Number: ")?
        else {
            return Ok(());
        };
        if self.ledger.find_account(recipient).is_none() {
            return writeln!(self.output, "Recipient account not found.");
        }

        let Some(amount) = self.prompt_amount("Enter Transfer Amount (Rs): ")? else {
            return Ok(());
        };

        match self.ledger.transfer(source, recipient, amount) {
            Ok(()) => writeln!(self.output, "Transfer successful."),
            Err(LedgerError::InsufficientFunds { .. }) => {
                writeln!(self.output, "Insufficient Balance for Transfer.")?;
                writeln!(self.output, "Insufficient balance.")
            }
            Err(err) => writeln!(self.output, "{}", err),
        }
    }

    fn print_history(&mut self, number: AccountNumber, count: usize) -> io::Result<()> {
        writeln!(
            self.output,
            "Last {} transactions for Account {}:",
            count, number
        )?;

        match self.ledger.transaction_history(number, count) {
            Ok([]) => writeln!(self.output, "No transactions yet."),
            Ok(history) => {
                for tx in history {
                    writeln!(self.output, "{}", tx)?;
                }
                Ok(())
            }
            Err(err) => writeln!(self.output, "{}", err),
        }
    }

    fn report(&mut self, result: Result<String, LedgerError>) -> io::Result<()> {
        match result {
            Ok(message) => writeln!(self.output, "{}", message),
            Err(LedgerError::InsufficientFunds { .. }) => {
                writeln!(self.output, "Insufficient Balance.")
            }
            Err(err) => writeln!(self.output, "{}", err),
        }
    }
}

fn format_conversion(conversion: Conversion, amount: f64, converted: f64) -> String {
    match conversion.units() {
        (from, "Rs") => format!("{} {} = Rs {}", amount, from, converted),
        (from, to) => format!("{} {} = {} {}", amount, from, converted, to),
    }
}
