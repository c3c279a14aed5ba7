// file: src/parser/mod.rs
// description: access log parsing module exports
// reference: internal module structure

pub mod access_log;
pub mod patterns;

pub use access_log::{AccessLogParser, ParseOutcome, parse_timestamp};
