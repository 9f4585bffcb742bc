//! Batch front end: runs a CSV operation script against a fresh [`Ledger`] and prints
//! the resulting accounts. Could live in the binary, but integration tests drive it too.

use std::io::{Read, Write};

use crate::{
    command::{CommandArgs, CommandError, LedgerCommand, OperationKind},
    ledger::{Ledger, LedgerError},
    processor::{
        TransactionError, TransactionProcessor, in_memory_processor::InMemoryTransactionProcessor,
    },
};
use anyhow::Result;
use csv_parser::CsvOperationParser;
use csv_printer::{AccountRow, StatementRow, print_records};
use thiserror::Error;
use tracing::info;
pub mod csv_parser;
pub mod csv_printer;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Malformed row: {0}")]
    CsvErr(#[from] csv::Error),
    #[error(transparent)]
    CommandErr(#[from] CommandError),
    #[error(transparent)]
    LedgerErr(#[from] LedgerError),
    #[error(transparent)]
    TransactionErr(#[from] TransactionError),
}

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    /// Also print every account's statement after the accounts report
    pub print_statements: bool,
    pub error_printer: Box<dyn FnMut(u64, ServiceError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvOperationParser::new(self.input);

        let mut ledger = Ledger::default();

        for (line, row) in parser {
            if let Err(err) = row
                .map_err(ServiceError::from)
                .and_then(|row| execute(&mut ledger, row.into_parts()))
            {
                (self.error_printer)(line, err);
            }
        }

        print_records(
            &mut *self.output,
            ledger.get_all_accounts().map(AccountRow::from),
        )?;

        if self.print_statements {
            writeln!(self.output)?;
            print_records(
                &mut *self.output,
                ledger.get_all_accounts().flat_map(|acc| {
                    ledger
                        .get_statements(acc.number())
                        .iter()
                        .map(move |entry| StatementRow::new(acc.number(), entry))
                }),
            )?;
        }
        Ok(())
    }
}

fn execute(
    ledger: &mut Ledger,
    (op, args): (OperationKind, CommandArgs),
) -> Result<(), ServiceError> {
    match LedgerCommand::parse_command(op, args)? {
        LedgerCommand::Create {
            kind,
            customer,
            initial_deposit,
        } => {
            let acc = ledger.create_account(&kind, customer, initial_deposit)?;
            info!("{}", acc.info());
        }
        LedgerCommand::Deposit { account, amount } => {
            InMemoryTransactionProcessor::new(ledger).deposit(&account, amount)?;
        }
        LedgerCommand::Withdraw { account, amount } => {
            InMemoryTransactionProcessor::new(ledger).withdraw(&account, amount)?;
        }
        LedgerCommand::Transfer { from, to, amount } => {
            InMemoryTransactionProcessor::new(ledger).transfer_money(&from, &to, amount)?;
        }
        LedgerCommand::Balance { account } => {
            let balance = InMemoryTransactionProcessor::new(ledger).account_balance(&account)?;
            info!(account = %account, %balance, "balance");
        }
        LedgerCommand::Statement { account } => {
            let processor = InMemoryTransactionProcessor::new(ledger);
            for entry in processor.generate_statement(&account)? {
                info!(account = %account, "{entry}");
            }
        }
        LedgerCommand::Delete { account } => {
            ledger.delete_account(&account)?;
        }
    }
    Ok(())
}
