// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod lead;
pub mod log_record;

pub use lead::LeadSummary;
pub use log_record::LogRecord;
