use std::collections::HashMap;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    account::{Account, AccountKind, AccountNumber, Customer, UnknownAccountKind},
    statement::StatementEntry,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Initial deposit cannot be negative, got {amount}")]
    InvalidAmount { amount: Decimal },
    #[error(transparent)]
    InvalidAccountType(#[from] UnknownAccountKind),
    #[error("Account {0} not found")]
    AccountNotFound(AccountNumber),
}

/// Sole owner of all accounts and their statements.
///
/// Accounts are handed out as borrows of the live ledger, never as copies,
/// so every balance change is visible to the next reader.
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: HashMap<AccountNumber, Account>,
    /// insertion order of `accounts`
    order: Vec<AccountNumber>,
    statements: HashMap<AccountNumber, Vec<StatementEntry>>,
    savings_counter: u32,
    current_counter: u32,
}

impl Ledger {
    /// Creates an account from a loosely spelled kind, see [`AccountKind::from_str`].
    ///
    /// [`AccountKind::from_str`]: std::str::FromStr::from_str
    pub fn create_account(
        &mut self,
        kind: &str,
        customer: Option<Customer>,
        initial_deposit: Decimal,
    ) -> Result<&Account, LedgerError> {
        if initial_deposit < Decimal::ZERO {
            warn!(%initial_deposit, "rejected negative initial deposit");
            return Err(LedgerError::InvalidAmount {
                amount: initial_deposit,
            });
        }
        let kind: AccountKind = kind.parse()?;
        Ok(self.open_account(kind, customer, initial_deposit))
    }

    fn open_account(
        &mut self,
        kind: AccountKind,
        customer: Option<Customer>,
        initial_deposit: Decimal,
    ) -> &Account {
        let number = self.next_account_number(kind);
        debug!(account = %number, %kind, %initial_deposit, "account created");

        self.order.push(number.clone());
        self.statements.insert(number.clone(), Vec::new());
        self.record_statement(
            &number,
            format!("Account created with initial deposit {initial_deposit:.2}"),
        );
        self.accounts
            .entry(number.clone())
            .insert_entry(Account::new(number, kind, customer, initial_deposit))
            .into_mut()
    }

    fn next_account_number(&mut self, kind: AccountKind) -> AccountNumber {
        let counter = match kind {
            AccountKind::Savings => &mut self.savings_counter,
            AccountKind::Current => &mut self.current_counter,
        };
        *counter += 1;
        format!("{}{:03}", kind.prefix(), *counter)
    }

    pub fn get_account(&self, number: &str) -> Result<&Account, LedgerError> {
        self.accounts
            .get(number)
            .ok_or_else(|| LedgerError::AccountNotFound(number.to_owned()))
    }

    pub fn get_account_mut(&mut self, number: &str) -> Result<&mut Account, LedgerError> {
        self.accounts
            .get_mut(number)
            .ok_or_else(|| LedgerError::AccountNotFound(number.to_owned()))
    }

    /// All accounts in the order they were created.
    pub fn get_all_accounts(&self) -> impl Iterator<Item = &Account> + '_ {
        self.order
            .iter()
            .filter_map(|number| self.accounts.get(number))
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Removes the account together with its statements. The number is never
    /// minted again.
    pub fn delete_account(&mut self, number: &str) -> Result<Account, LedgerError> {
        let account = self
            .accounts
            .remove(number)
            .ok_or_else(|| LedgerError::AccountNotFound(number.to_owned()))?;
        self.order.retain(|n| n != number);
        self.statements.remove(number);
        debug!(account = number, "account deleted");
        Ok(account)
    }

    /// Appends a timestamped entry. Unknown numbers get a fresh, empty
    /// statement first; this never fails.
    pub fn record_statement(&mut self, number: &str, description: impl Into<String>) {
        self.statements
            .entry(number.to_owned())
            .or_default()
            .push(StatementEntry::now(description));
    }

    /// Statement of the account, empty when the account is unknown.
    pub fn get_statements(&self, number: &str) -> &[StatementEntry] {
        self.statements
            .get(number)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
