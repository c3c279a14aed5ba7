// file: src/models/log_record.rs
// description: structured access log record produced by the line parser
// reference: apache common log format

use chrono::{DateTime, FixedOffset};

/// One parsed access log line. Method, status and byte count are not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub address: String,
    pub path: String,
    /// `None` when the bracketed timestamp could not be parsed.
    pub timestamp: Option<DateTime<FixedOffset>>,
}

impl LogRecord {
    pub fn new(
        address: impl Into<String>,
        path: impl Into<String>,
        timestamp: Option<DateTime<FixedOffset>>,
    ) -> Self {
        Self {
            address: address.into(),
            path: path.into(),
            timestamp,
        }
    }

    pub fn has_timestamp(&self) -> bool {
        self.timestamp.is_some()
    }
}
