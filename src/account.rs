use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use thiserror::Error;

pub type AccountNumber = String;

/// Closed set of account kinds. The only rule that differs between them is
/// how far a withdrawal may take the balance down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountKind {
    Savings,
    Current,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid account type `{0}`. Choose Savings or Current")]
pub struct UnknownAccountKind(pub String);

impl AccountKind {
    /// Prefix of the account numbers minted for this kind.
    pub fn prefix(self) -> &'static str {
        match self {
            AccountKind::Savings => "SAV",
            AccountKind::Current => "CUR",
        }
    }

    /// Lowest balance a withdrawal is allowed to leave behind.
    pub fn floor(self) -> Decimal {
        match self {
            // minimum balance
            AccountKind::Savings => Decimal::new(500_00, 2),
            // overdraft limit
            AccountKind::Current => Decimal::new(-1000_00, 2),
        }
    }

    /// Balance after withdrawing `amount`, or `None` when it would cross the floor.
    pub fn projected_withdrawal(self, balance: Decimal, amount: Decimal) -> Option<Decimal> {
        balance
            .checked_sub(amount)
            .filter(|projected| *projected >= self.floor())
    }

    fn type_name(self) -> &'static str {
        match self {
            AccountKind::Savings => "SavingsAccount",
            AccountKind::Current => "CurrentAccount",
        }
    }
}

impl FromStr for AccountKind {
    type Err = UnknownAccountKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SAVINGS" | "SAV" | "SAVINGSACCOUNT" => Ok(AccountKind::Savings),
            "CURRENT" | "CUR" | "CURRENTACCOUNT" => Ok(AccountKind::Current),
            _ => Err(UnknownAccountKind(s.to_owned())),
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountKind::Savings => f.write_str("Savings"),
            AccountKind::Current => f.write_str("Current"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    id: String,
    name: String,
    email: String,
}

impl Customer {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum AccountEventKind {
    Deposited,
    Withdrawn,
}

#[derive(Debug)]
pub struct AccountEvent {
    amount: Decimal,
    kind: AccountEventKind,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Amount must be positive, got {amount}")]
    InvalidAmount { amount: Decimal },
    #[error("{}. Current balance: {balance:.2}", breach_description(.kind))]
    InsufficientFunds { kind: AccountKind, balance: Decimal },
    #[error("Depositing {amount} would overflow balance {balance}")]
    BalanceOverflow { balance: Decimal, amount: Decimal },
}

fn breach_description(kind: &AccountKind) -> String {
    match kind {
        AccountKind::Savings => format!(
            "Withdrawal would breach minimum balance ({:.2})",
            kind.floor()
        ),
        AccountKind::Current => format!(
            "Insufficient funds. Overdraft limit is {:.2}",
            -kind.floor()
        ),
    }
}

#[derive(Debug)]
pub struct Account {
    number: AccountNumber,
    kind: AccountKind,
    customer: Option<Customer>,
    balance: Decimal,
}

impl Account {
    pub(crate) fn new(
        number: AccountNumber,
        kind: AccountKind,
        customer: Option<Customer>,
        initial_balance: Decimal,
    ) -> Self {
        Self {
            number,
            kind,
            customer,
            balance: initial_balance,
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Applies an event produced by this account's own `handle_*`. Events are
    /// the source of truth, there's no validation happening here.
    pub(crate) fn apply(&mut self, event: &AccountEvent) {
        match event.kind {
            AccountEventKind::Deposited => self.balance += event.amount,
            AccountEventKind::Withdrawn => self.balance -= event.amount,
        }
    }

    pub fn handle_deposit(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount { amount });
        }
        if self.balance.checked_add(amount).is_none() {
            return Err(AccountError::BalanceOverflow {
                balance: self.balance,
                amount,
            });
        }
        Ok(AccountEvent {
            amount,
            kind: AccountEventKind::Deposited,
        })
    }

    pub fn handle_withdraw(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount { amount });
        }
        match self.kind.projected_withdrawal(self.balance, amount) {
            Some(_) => Ok(AccountEvent {
                amount,
                kind: AccountEventKind::Withdrawn,
            }),
            None => Err(AccountError::InsufficientFunds {
                kind: self.kind,
                balance: self.balance,
            }),
        }
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        let event = self.handle_deposit(amount)?;
        self.apply(&event);
        Ok(())
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), AccountError> {
        let event = self.handle_withdraw(amount)?;
        self.apply(&event);
        Ok(())
    }

    pub fn info(&self) -> AccountInfo<'_> {
        AccountInfo { account: self }
    }
}

/// Read-only summary of an account, rendered through [`fmt::Display`].
pub struct AccountInfo<'a> {
    account: &'a Account,
}

impl AccountInfo<'_> {
    pub fn holder(&self) -> &str {
        self.account.customer().map_or("N/A", Customer::name)
    }
}

impl fmt::Display for AccountInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AccountNumber: {} | Type: {} | Holder: {} | Balance: {:.2}",
            self.account.number,
            self.account.kind.type_name(),
            self.holder(),
            self.account.balance
        )
    }
}
