/// Single account and its kind-specific withdrawal rule.
/// Balances change through events, which are produced by handling deposits and withdrawals
pub mod account;

/// Timestamped audit log entries.
pub mod statement;

/// Owner of all accounts and statements, mints account numbers.
pub mod ledger;

/// Typed front-end commands, later executed against [`ledger`] and [`processor`].
pub mod command;

/// Money movements over a ledger: the [`processor::TransactionProcessor`] trait
/// and an implementation borrowing an in-memory [`ledger::Ledger`].
///
/// NOTE: a multi-caller variant would put the ledger behind a mutex and keep
/// this interface unchanged.
pub mod processor;

/// CSV script runner used by the binary and the integration tests.
pub mod bin_utils;
