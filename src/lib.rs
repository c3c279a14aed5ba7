// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod generator;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod resolver;
pub mod scoring;
pub mod taxonomy;
pub mod utils;

pub use config::{Config, GeneratorConfig, InputConfig, LookupConfig, OutputConfig};
pub use error::{PipelineError, Result};
pub use exporter::JsonExporter;
pub use generator::{GenerationReport, LogGenerator};
pub use models::{LeadSummary, LogRecord};
pub use parser::{AccessLogParser, ParseOutcome};
pub use pipeline::{LeadPipeline, PipelineStats, ProgressTracker};
pub use resolver::{
    IpApiClient, OrgLookup, OrganizationResolver, ResolutionCache, ResolverStats,
    is_private_address,
};
pub use scoring::{LeadScorer, OrganizationVisitSet, Visit};
pub use taxonomy::{PathRule, Tier, UrlTaxonomy};
pub use utils::Validator;
