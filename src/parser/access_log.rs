// file: src/parser/access_log.rs
// description: apache common log format line parser producing structured records
// reference: https://httpd.apache.org/docs/current/logs.html#common

use crate::models::LogRecord;
use crate::parser::patterns::{ACCESS_LOG_LINE, CLF_TIMESTAMP_FORMAT};
use crate::utils::Validator;
use chrono::{DateTime, FixedOffset};
use tracing::debug;

/// Records parsed from a batch of lines along with what was dropped.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub records: Vec<LogRecord>,
    pub lines_read: usize,
    pub skipped: usize,
    pub missing_timestamps: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AccessLogParser;

impl AccessLogParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a single line. Lines that do not have the Common Log Format shape
    /// yield `None`; an unreadable timestamp only blanks the timestamp.
    pub fn parse_line(&self, line: &str) -> Option<LogRecord> {
        let caps = ACCESS_LOG_LINE.captures(line.trim_end())?;

        let raw_timestamp = &caps["timestamp"];
        let timestamp = parse_timestamp(raw_timestamp);
        if timestamp.is_none() {
            debug!("Unparsable timestamp '{}', keeping record", raw_timestamp);
        }

        Some(LogRecord::new(&caps["address"], &caps["path"], timestamp))
    }

    pub fn parse_lines<'a, I>(&self, lines: I) -> ParseOutcome
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut outcome = ParseOutcome::default();

        for (index, line) in lines.into_iter().enumerate() {
            outcome.lines_read += 1;

            match self.parse_line(line) {
                Some(record) => {
                    if !record.has_timestamp() {
                        outcome.missing_timestamps += 1;
                    }
                    outcome.records.push(record);
                }
                None => {
                    debug!(
                        "Skipping malformed line {}: {}",
                        index + 1,
                        Validator::truncate_text(line, 80)
                    );
                    outcome.skipped += 1;
                }
            }
        }

        outcome
    }
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw.trim(), CLF_TIMESTAMP_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"10.0.0.5 - - [15/Dec/2024:14:30:25 +0000] "GET /forms-request-demo/ HTTP/1.1" 200 15000"#;

    #[test]
    fn test_parse_line_extracts_fields() {
        let record = AccessLogParser::new().parse_line(SAMPLE).unwrap();

        assert_eq!(record.address, "10.0.0.5");
        assert_eq!(record.path, "/forms-request-demo/");
        assert_eq!(
            record.timestamp.unwrap().with_timezone(&Utc),
            Utc.with_ymd_and_hms(2024, 12, 15, 14, 30, 25).unwrap()
        );
    }

    #[test]
    fn test_parse_line_is_deterministic() {
        let parser = AccessLogParser::new();
        assert_eq!(parser.parse_line(SAMPLE), parser.parse_line(SAMPLE));
    }

    #[test]
    fn test_parse_line_accepts_other_methods() {
        let line = r#"8.8.8.8 - - [15/Dec/2024:14:30:25 +0000] "POST /contact-us/ HTTP/1.1" 201 512"#;
        let record = AccessLogParser::new().parse_line(line).unwrap();
        assert_eq!(record.path, "/contact-us/");
    }

    #[test]
    fn test_bad_timestamp_keeps_record() {
        let line = r#"8.8.8.8 - - [yesterday afternoon] "GET /careers/ HTTP/1.1" 200 900"#;
        let record = AccessLogParser::new().parse_line(line).unwrap();

        assert_eq!(record.address, "8.8.8.8");
        assert_eq!(record.path, "/careers/");
        assert!(record.timestamp.is_none());
    }

    #[test]
    fn test_timestamp_offset_is_honored() {
        let ts = parse_timestamp("16/Dec/2024:11:00:00 +0200").unwrap();
        assert_eq!(
            ts.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2024, 12, 16, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_malformed_line_yields_none() {
        let parser = AccessLogParser::new();
        assert!(parser.parse_line("10.0.0.5 - - [15/Dec/2024:14:30:25 +0000] 200 15000").is_none());
        assert!(parser.parse_line("not a log line").is_none());
        assert!(parser.parse_line("").is_none());
    }

    #[test]
    fn test_parse_lines_counts_outcomes() {
        let lines = [
            SAMPLE,
            "garbage",
            r#"8.8.8.8 - - [bad] "GET /careers/ HTTP/1.1" 200 900"#,
        ];

        let outcome = AccessLogParser::new().parse_lines(lines);
        assert_eq!(outcome.lines_read, 3);
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.missing_timestamps, 1);
    }
}
