use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use bank_ledger::bin_utils::Service;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Runs a CSV script of ledger operations and prints the resulting accounts.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Operation script with header `op,account,to,amount,kind,customer_id,name,email`
    input: PathBuf,
    /// Print every account's statement after the accounts report
    #[arg(long)]
    statements: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let file = File::open(&args.input)
        .with_context(|| format!("Failed to open `{}`", args.input.display()))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        print_statements: args.statements,
        error_printer: Box::new(|line, err| eprintln!("Error at line {line}: {err}")),
    };
    service.run()
}
