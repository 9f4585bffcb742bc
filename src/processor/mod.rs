use rust_decimal::Decimal;
use thiserror::Error;

use crate::{account::AccountError, ledger::LedgerError, statement::StatementEntry};

pub mod in_memory_processor;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Transfer amount must be positive, got {amount}")]
    InvalidAmount { amount: Decimal },
    #[error(transparent)]
    LedgerErr(#[from] LedgerError),
    #[error(transparent)]
    AccountErr(#[from] AccountError),
}

impl TransactionError {
    pub fn is_account_not_found(&self) -> bool {
        matches!(self, Self::LedgerErr(LedgerError::AccountNotFound(_)))
    }

    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, Self::AccountErr(AccountError::InsufficientFunds { .. }))
    }
}

/// Money movements and queries on top of a ledger.
pub trait TransactionProcessor {
    /// Deposits into an account and returns the new balance.
    fn deposit(&mut self, number: &str, amount: Decimal) -> Result<Decimal, TransactionError>;

    /// Withdraws from an account and returns the new balance.
    fn withdraw(&mut self, number: &str, amount: Decimal) -> Result<Decimal, TransactionError>;

    /// Moves `amount` from one account to another. Either both legs happen or
    /// neither does.
    fn transfer_money(
        &mut self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<(), TransactionError>;

    fn account_balance(&self, number: &str) -> Result<Decimal, TransactionError>;

    /// Statement of an existing account. Unknown accounts are an error here,
    /// unlike [`Ledger::get_statements`].
    ///
    /// [`Ledger::get_statements`]: crate::ledger::Ledger::get_statements
    fn generate_statement(&self, number: &str) -> Result<&[StatementEntry], TransactionError>;
}
