use std::fmt;

use chrono::{DateTime, Utc};

/// Rendering of statement timestamps, shared by every printer.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// One timestamped line of an account's audit log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementEntry {
    timestamp: DateTime<Utc>,
    description: String,
}

impl StatementEntry {
    pub fn new(timestamp: DateTime<Utc>, description: impl Into<String>) -> Self {
        Self {
            timestamp,
            description: description.into(),
        }
    }

    /// Entry stamped with the current wall-clock time.
    pub fn now(description: impl Into<String>) -> Self {
        Self::new(Utc::now(), description)
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for StatementEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.description
        )
    }
}
