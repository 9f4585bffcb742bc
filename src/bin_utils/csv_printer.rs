use std::io::Write;

use csv::Writer;
use serde::Serialize;

use crate::{
    account::Account,
    statement::{StatementEntry, TIMESTAMP_FORMAT},
};

#[derive(Debug, Serialize)]
pub struct AccountRow {
    pub account: String,
    pub kind: String,
    pub holder: String,
    /// always two decimal places
    pub balance: String,
}

impl From<&Account> for AccountRow {
    fn from(acc: &Account) -> Self {
        Self {
            account: acc.number().to_owned(),
            kind: acc.kind().to_string(),
            holder: acc.info().holder().to_owned(),
            balance: format!("{:.2}", acc.balance()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatementRow {
    pub account: String,
    pub timestamp: String,
    pub description: String,
}

impl StatementRow {
    pub fn new(account: &str, entry: &StatementEntry) -> Self {
        Self {
            account: account.to_owned(),
            timestamp: entry.timestamp().format(TIMESTAMP_FORMAT).to_string(),
            description: entry.description().to_owned(),
        }
    }
}

pub fn print_records<W, T>(output: &mut W, records: impl Iterator<Item = T>) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize,
{
    let mut writer = Writer::from_writer(output);
    for record in records {
        if let Err(err) = writer.serialize(record) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    // Ensure all data is flushed to the output
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}
