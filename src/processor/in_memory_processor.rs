use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::{ledger::Ledger, statement::StatementEntry};

use super::{TransactionError, TransactionProcessor};

/// Stateless engine borrowing the ledger it works on.
pub struct InMemoryTransactionProcessor<'l> {
    ledger: &'l mut Ledger,
}

impl<'l> InMemoryTransactionProcessor<'l> {
    pub fn new(ledger: &'l mut Ledger) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &Ledger {
        &*self.ledger
    }
}

impl TransactionProcessor for InMemoryTransactionProcessor<'_> {
    fn deposit(&mut self, number: &str, amount: Decimal) -> Result<Decimal, TransactionError> {
        let account = self.ledger.get_account_mut(number)?;
        account.deposit(amount)?;
        let balance = account.balance();
        self.ledger.record_statement(
            number,
            format!("Deposit {amount:.2} (Balance: {balance:.2})"),
        );
        Ok(balance)
    }

    fn withdraw(&mut self, number: &str, amount: Decimal) -> Result<Decimal, TransactionError> {
        let account = self.ledger.get_account_mut(number)?;
        if let Err(err) = account.withdraw(amount) {
            warn!(account = number, %amount, %err, "withdrawal rejected");
            return Err(err.into());
        }
        let balance = account.balance();
        self.ledger.record_statement(
            number,
            format!("Withdrawal {amount:.2} (Balance: {balance:.2})"),
        );
        Ok(balance)
    }

    fn transfer_money(
        &mut self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<(), TransactionError> {
        if amount <= Decimal::ZERO {
            return Err(TransactionError::InvalidAmount { amount });
        }
        let source = self.ledger.get_account(from)?;
        let destination = self.ledger.get_account(to)?;

        // both legs are validated before either is applied
        let withdrawal = source.handle_withdraw(amount).inspect_err(|err| {
            warn!(from, to, %amount, %err, "transfer rejected");
        })?;
        let deposit = destination.handle_deposit(amount)?;

        let source = self.ledger.get_account_mut(from)?;
        source.apply(&withdrawal);
        let from_balance = source.balance();
        let destination = self.ledger.get_account_mut(to)?;
        destination.apply(&deposit);
        let to_balance = destination.balance();

        self.ledger.record_statement(
            from,
            format!("Transfer OUT {amount:.2} to {to} (Balance: {from_balance:.2})"),
        );
        self.ledger.record_statement(
            to,
            format!("Transfer IN {amount:.2} from {from} (Balance: {to_balance:.2})"),
        );
        info!(from, to, %amount, "transfer completed");
        Ok(())
    }

    fn account_balance(&self, number: &str) -> Result<Decimal, TransactionError> {
        Ok(self.ledger.get_account(number)?.balance())
    }

    fn generate_statement(&self, number: &str) -> Result<&[StatementEntry], TransactionError> {
        self.ledger.get_account(number)?;
        Ok(self.ledger.get_statements(number))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::{
        account::{AccountError, AccountKind},
        ledger::LedgerError,
    };

    use super::*;

    fn ledger_with(accounts: &[(&str, Decimal)]) -> Ledger {
        let mut ledger = Ledger::default();
        for (kind, initial) in accounts {
            ledger.create_account(kind, None, *initial).unwrap();
        }
        ledger
    }

    fn statement_len(ledger: &Ledger, number: &str) -> usize {
        ledger.get_statements(number).len()
    }

    #[test]
    fn deposit_and_withdraw() {
        let mut ledger = ledger_with(&[("Savings", dec!(1000.00))]);
        let mut processor = InMemoryTransactionProcessor::new(&mut ledger);

        assert_eq!(processor.deposit("SAV001", dec!(250.50)).unwrap(), dec!(1250.50));
        assert_eq!(processor.withdraw("SAV001", dec!(750.50)).unwrap(), dec!(500.00));

        let err = processor.withdraw("SAV001", dec!(0.01)).unwrap_err();
        assert!(err.is_insufficient_funds());
        let err = processor.deposit("SAV001", dec!(0)).unwrap_err();
        assert_eq!(
            err,
            TransactionError::AccountErr(AccountError::InvalidAmount { amount: dec!(0) })
        );
        assert!(processor.deposit("SAV404", dec!(1)).unwrap_err().is_account_not_found());

        let statements = processor.generate_statement("SAV001").unwrap();
        let descriptions: Vec<_> = statements.iter().map(StatementEntry::description).collect();
        assert_eq!(
            descriptions,
            [
                "Account created with initial deposit 1000.00",
                "Deposit 250.50 (Balance: 1250.50)",
                "Withdrawal 750.50 (Balance: 500.00)",
            ]
        );
    }

    #[test]
    fn transfer_money() {
        let mut ledger = ledger_with(&[("Savings", dec!(1000.00)), ("Current", dec!(0))]);
        let mut processor = InMemoryTransactionProcessor::new(&mut ledger);

        processor.transfer_money("SAV001", "CUR001", dec!(100.00)).unwrap();
        assert_eq!(processor.account_balance("SAV001").unwrap(), dec!(900.00));
        assert_eq!(processor.account_balance("CUR001").unwrap(), dec!(100.00));

        let out = processor.generate_statement("SAV001").unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(
            out[1].description(),
            "Transfer OUT 100.00 to CUR001 (Balance: 900.00)"
        );
        let inbound = processor.generate_statement("CUR001").unwrap();
        assert_eq!(inbound.len(), 2);
        assert_eq!(
            inbound[1].description(),
            "Transfer IN 100.00 from SAV001 (Balance: 100.00)"
        );
    }

    #[test]
    fn overdraft_transfer() {
        let mut ledger = ledger_with(&[("Current", dec!(0)), ("Savings", dec!(500))]);
        let mut processor = InMemoryTransactionProcessor::new(&mut ledger);

        processor.transfer_money("CUR001", "SAV001", dec!(1000)).unwrap();
        assert_eq!(processor.account_balance("CUR001").unwrap(), dec!(-1000));
        assert_eq!(processor.account_balance("SAV001").unwrap(), dec!(1500));

        let err = processor
            .transfer_money("CUR001", "SAV001", dec!(0.01))
            .unwrap_err();
        assert_eq!(
            err,
            TransactionError::AccountErr(AccountError::InsufficientFunds {
                kind: AccountKind::Current,
                balance: dec!(-1000),
            })
        );
    }

    #[test]
    fn failed_transfer_changes_nothing() {
        let mut ledger = ledger_with(&[("Savings", dec!(50.00)), ("Current", dec!(10.00))]);
        let mut processor = InMemoryTransactionProcessor::new(&mut ledger);

        let err = processor
            .transfer_money("SAV001", "CUR001", dec!(100.00))
            .unwrap_err();
        assert!(err.is_insufficient_funds());

        let ledger = processor.ledger();
        assert_eq!(ledger.get_account("SAV001").unwrap().balance(), dec!(50.00));
        assert_eq!(ledger.get_account("CUR001").unwrap().balance(), dec!(10.00));
        assert_eq!(statement_len(ledger, "SAV001"), 1);
        assert_eq!(statement_len(ledger, "CUR001"), 1);
    }

    #[test]
    fn transfer_rejects_bad_input() {
        let mut ledger = ledger_with(&[("Savings", dec!(1000)), ("Current", dec!(0))]);
        let mut processor = InMemoryTransactionProcessor::new(&mut ledger);

        for amount in [dec!(0), dec!(-5)] {
            assert_eq!(
                processor.transfer_money("SAV001", "CUR001", amount),
                Err(TransactionError::InvalidAmount { amount })
            );
        }
        assert_eq!(
            processor.transfer_money("SAV001", "CUR404", dec!(1)),
            Err(TransactionError::LedgerErr(LedgerError::AccountNotFound(
                "CUR404".to_string()
            )))
        );
        assert!(
            processor
                .transfer_money("SAV404", "CUR001", dec!(1))
                .unwrap_err()
                .is_account_not_found()
        );

        let ledger = processor.ledger();
        assert_eq!(ledger.get_account("SAV001").unwrap().balance(), dec!(1000));
        assert_eq!(ledger.get_account("CUR001").unwrap().balance(), dec!(0));
        assert_eq!(statement_len(ledger, "SAV001"), 1);
        assert_eq!(statement_len(ledger, "CUR001"), 1);
    }

    #[test]
    fn transfer_overflow_leaves_source_untouched() {
        let mut ledger = ledger_with(&[("Current", dec!(0)), ("Current", Decimal::MAX)]);
        let mut processor = InMemoryTransactionProcessor::new(&mut ledger);

        let err = processor
            .transfer_money("CUR001", "CUR002", dec!(10))
            .unwrap_err();
        assert!(matches!(
            err,
            TransactionError::AccountErr(AccountError::BalanceOverflow { .. })
        ));
        assert_eq!(processor.account_balance("CUR001").unwrap(), dec!(0));
        assert_eq!(statement_len(processor.ledger(), "CUR001"), 1);
    }

    #[test]
    fn transfer_to_same_account() {
        let mut ledger = ledger_with(&[("Current", dec!(100))]);
        let mut processor = InMemoryTransactionProcessor::new(&mut ledger);

        processor.transfer_money("CUR001", "CUR001", dec!(40)).unwrap();
        assert_eq!(processor.account_balance("CUR001").unwrap(), dec!(100));
        assert_eq!(statement_len(processor.ledger(), "CUR001"), 3);
    }

    #[test]
    fn queries_on_unknown_accounts() {
        let mut ledger = Ledger::default();
        ledger.record_statement("SAV001", "orphan entry");
        let processor = InMemoryTransactionProcessor::new(&mut ledger);

        assert!(processor.account_balance("SAV001").unwrap_err().is_account_not_found());
        assert!(
            processor
                .generate_statement("SAV001")
                .unwrap_err()
                .is_account_not_found()
        );
        assert_eq!(processor.ledger().get_statements("SAV001").len(), 1);
    }
}
