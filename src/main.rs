//! Bank Ledger CLI
//!
//! Runs a CSV operation script against a single bank and prints the final
//! balances of every account.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- script.csv "Banco del Estado" > balances.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use bank_ledger::{Ledger, LedgerError, Result};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

const DEFAULT_BANK_NAME: &str = "Bank";

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(LedgerError::MissingArgument);
    }

    let input_path = &args[1];
    let bank_name = args.get(2).map(String::as_str).unwrap_or(DEFAULT_BANK_NAME);

    let file = File::open(input_path)?;
    let reader = BufReader::new(file);

    let mut ledger = Ledger::new(bank_name);
    ledger.process_csv(reader)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    ledger.write_output(handle)?;

    Ok(())
}
