// file: src/scoring/mod.rs
// description: visit aggregation and lead scoring module exports
// reference: internal module structure

pub mod aggregator;
pub mod visits;

pub use aggregator::LeadScorer;
pub use visits::{OrganizationVisitSet, Visit};
