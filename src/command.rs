use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::account::{AccountNumber, Customer};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Create,
    Deposit,
    Withdraw,
    Transfer,
    Balance,
    Statement,
    Delete,
}

/// Loosely typed arguments of one operation, as they come from the front end.
#[derive(Debug, Clone, Default)]
pub struct CommandArgs {
    pub account: Option<AccountNumber>,
    pub to: Option<AccountNumber>,
    pub amount: Option<Decimal>,
    pub account_kind: Option<String>,
    pub customer_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Account number is required for {op:?}")]
    AccountRequired { op: OperationKind },
    #[error("Destination account number is required for {op:?}")]
    DestinationRequired { op: OperationKind },
    #[error("Amount is required for {op:?}")]
    AmountRequired { op: OperationKind },
    #[error("Account type is required for {op:?}")]
    AccountKindRequired { op: OperationKind },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCommand {
    Create {
        kind: String,
        customer: Option<Customer>,
        initial_deposit: Decimal,
    },
    Deposit {
        account: AccountNumber,
        amount: Decimal,
    },
    Withdraw {
        account: AccountNumber,
        amount: Decimal,
    },
    Transfer {
        from: AccountNumber,
        to: AccountNumber,
        amount: Decimal,
    },
    Balance {
        account: AccountNumber,
    },
    Statement {
        account: AccountNumber,
    },
    Delete {
        account: AccountNumber,
    },
}

impl LedgerCommand {
    /// Checks that every argument the operation needs is present. Values
    /// themselves are validated by the ledger.
    pub fn parse_command(op: OperationKind, args: CommandArgs) -> Result<Self, CommandError> {
        let CommandArgs {
            account,
            to,
            amount,
            account_kind,
            customer_id,
            name,
            email,
        } = args;

        let account = account.ok_or(CommandError::AccountRequired { op });
        let amount = amount.ok_or(CommandError::AmountRequired { op });

        match op {
            OperationKind::Create => {
                let kind = account_kind.ok_or(CommandError::AccountKindRequired { op })?;
                let customer = if customer_id.is_none() && name.is_none() && email.is_none() {
                    None
                } else {
                    Some(Customer::new(
                        customer_id.unwrap_or_default(),
                        name.unwrap_or_default(),
                        email.unwrap_or_default(),
                    ))
                };
                Ok(Self::Create {
                    kind,
                    customer,
                    // opening an empty account is allowed
                    initial_deposit: amount.unwrap_or_default(),
                })
            }
            OperationKind::Deposit => Ok(Self::Deposit {
                account: account?,
                amount: amount?,
            }),
            OperationKind::Withdraw => Ok(Self::Withdraw {
                account: account?,
                amount: amount?,
            }),
            OperationKind::Transfer => Ok(Self::Transfer {
                from: account?,
                to: to.ok_or(CommandError::DestinationRequired { op })?,
                amount: amount?,
            }),
            OperationKind::Balance => Ok(Self::Balance { account: account? }),
            OperationKind::Statement => Ok(Self::Statement { account: account? }),
            OperationKind::Delete => Ok(Self::Delete { account: account? }),
        }
    }
}
