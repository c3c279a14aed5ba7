// file: src/parser/patterns.rs
// description: compiled regex patterns for access log parsing
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

/// strftime layout of the bracketed Common Log Format timestamp.
pub const CLF_TIMESTAMP_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

lazy_static! {
    // <address> - - [<timestamp>] "<METHOD> <path> HTTP/<version>" <status> <bytes>
    pub static ref ACCESS_LOG_LINE: Regex = Regex::new(
        r#"^(?P<address>\S+)\s+-\s+-\s+\[(?P<timestamp>[^\]]*)\]\s+"(?P<method>\S+)\s+(?P<path>\S+)\s+HTTP/\d+(?:\.\d+)?"\s+(?P<status>\d{3})\s+(?P<bytes>\d+|-)"#
    ).expect("ACCESS_LOG_LINE regex is valid");
}
