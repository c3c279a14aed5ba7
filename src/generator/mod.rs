// file: src/generator/mod.rs
// description: synthetic access log generation module exports
// reference: internal module structure

pub mod ip_pool;
pub mod log_lines;

pub use ip_pool::generate_ip_pool;
pub use log_lines::{GenerationReport, LogGenerator};
