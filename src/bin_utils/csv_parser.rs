use std::io::Read;

use crate::command::{CommandArgs, OperationKind};
use csv::{DeserializeRecordsIntoIter, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Operation {
    pub op: OperationKind,
    pub account: Option<String>,
    pub to: Option<String>,
    /// parsed from the literal text, so `1000.00` keeps its scale
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub amount: Option<Decimal>,
    pub kind: Option<String>,
    pub customer_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Operation {
    pub fn into_parts(self) -> (OperationKind, CommandArgs) {
        (
            self.op,
            CommandArgs {
                account: self.account,
                to: self.to,
                amount: self.amount,
                account_kind: self.kind,
                customer_id: self.customer_id,
                name: self.name,
                email: self.email,
            },
        )
    }
}

/// Parses an operation script in CSV format, yielding every row together
/// with the line it starts on.
pub struct CsvOperationParser<R> {
    iter: DeserializeRecordsIntoIter<R, Operation>,
}

impl<R> CsvOperationParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_deserialize(),
        }
    }
}

impl<R> Iterator for CsvOperationParser<R>
where
    R: Read,
{
    type Item = (u64, csv::Result<Operation>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row))
    }
}
