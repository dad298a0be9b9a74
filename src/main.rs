mod account;
mod currency;
mod employee;
mod ledger;
mod menu;
mod script;
mod transaction;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::currency::CurrencyConverter;
use crate::ledger::Ledger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    /// One row per account.
    Accounts,
    /// One row per recorded transaction.
    Transactions,
}

/// Console banking system: accounts, ATM, payroll and currency conversion.
#[derive(Debug, Parser)]
#[clap(version)]
struct Cli {
    /// CSV file of ledger operations to replay instead of starting the
    /// interactive menu.
    #[clap(value_parser)]
    script: Option<PathBuf>,

    /// What to print after replaying a script.
    #[clap(short, long, value_enum, default_value_t = Output::Accounts)]
    output: Output,

    #[clap(flatten)]
    rates: CurrencyConverter,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout belongs to the menu and CSV output.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match &cli.script {
        Some(path) => run_script(path, cli.output),
        None => {
            let stdin = std::io::stdin();
            let mut console = menu::Console::new(
                stdin.lock(),
                std::io::stdout(),
                Ledger::new(),
                cli.rates,
            );
            console.run().context("console session failed")
        }
    }
}

fn run_script(path: &Path, output: Output) -> anyhow::Result<()> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;

    let mut ledger = Ledger::new();
    script::replay(file, &mut ledger)
        .with_context(|| format!("failed to parse script {}", path.display()))?;

    let stdout = std::io::stdout();
    match output {
        Output::Accounts => script::write_accounts(&ledger, stdout.lock()),
        Output::Transactions => script::write_transactions(&ledger, stdout.lock()),
    }
    .context("failed to write to stdout")
}
