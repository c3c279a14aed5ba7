// file: src/pipeline/orchestrator.rs
// description: coordinates log parsing, organization resolution, scoring, and export
// reference: sequential lead scoring workflow

use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::exporter::JsonExporter;
use crate::parser::AccessLogParser;
use crate::pipeline::progress::{PipelineStats, ProgressTracker};
use crate::resolver::{IpApiClient, OrgLookup, OrganizationResolver};
use crate::scoring::LeadScorer;
use crate::taxonomy::UrlTaxonomy;
use crate::utils::Validator;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

pub struct LeadPipeline {
    config: Config,
    parser: AccessLogParser,
    scorer: LeadScorer,
    show_progress: bool,
}

impl LeadPipeline {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            parser: AccessLogParser::new(),
            scorer: LeadScorer::new(UrlTaxonomy::standard()),
            show_progress: true,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub async fn run(&self, input: &Path, output: &Path) -> Result<PipelineStats> {
        let client = IpApiClient::new(&self.config.lookup)?;
        self.run_with_lookup(client, input, output).await
    }

    /// Score `input` and write the report to `output`. Only an unreadable input
    /// or an unwritable report is an error; bad lines and failed lookups are
    /// absorbed and counted.
    pub async fn run_with_lookup<L: OrgLookup>(
        &self,
        lookup: L,
        input: &Path,
        output: &Path,
    ) -> Result<PipelineStats> {
        info!("Starting lead scoring for {}", input.display());

        let contents = read_input(input).inspect_err(|e| error!("{}", e))?;
        let total_lines = contents.lines().count();

        let progress = if self.show_progress {
            ProgressTracker::new(total_lines)
        } else {
            ProgressTracker::hidden(total_lines)
        };

        progress.set_message("Parsing access log");
        let outcome = self
            .parser
            .parse_lines(contents.lines().inspect(|_| progress.inc_lines_read()));

        if outcome.skipped > 0 {
            warn!(
                "Skipped {} of {} malformed lines",
                outcome.skipped, outcome.lines_read
            );
        }

        let mut resolver = OrganizationResolver::new(lookup);

        let workers = self.config.lookup.workers;
        if workers > 1 {
            progress.set_message("Prefetching organizations");
            resolver
                .prefetch(
                    outcome.records.iter().map(|record| record.address.as_str()),
                    workers,
                )
                .await;
        }

        progress.set_message("Resolving organizations");
        let summaries = self.scorer.score_records(&outcome.records, &mut resolver).await;

        progress.set_message("Writing report");
        JsonExporter::new(output, self.config.output.pretty).write(&summaries)?;

        progress.finish();

        let resolver_stats = resolver.stats();
        let stats = PipelineStats {
            lines_read: outcome.lines_read,
            records_parsed: outcome.records.len(),
            lines_skipped: outcome.skipped,
            missing_timestamps: outcome.missing_timestamps,
            external_lookups: resolver_stats.external_lookups,
            failed_lookups: resolver_stats.failed_lookups,
            cache_hits: resolver_stats.cache_hits,
            organizations: summaries.len(),
            duration_secs: progress.elapsed().as_secs_f64(),
        };

        let internal = summaries.iter().filter(|summary| summary.is_internal()).count();
        info!(
            "Scored {} organizations ({} internal) from {} records, {:.1}% parsed ({} lookups, {} failed)",
            stats.organizations,
            internal,
            stats.records_parsed,
            stats.parse_success_rate(),
            stats.external_lookups,
            stats.failed_lookups
        );

        Ok(stats)
    }
}

/// Read the whole log. Invalid UTF-8 is replaced rather than rejected so a
/// single corrupt line cannot fail the run.
fn read_input(path: &Path) -> Result<String> {
    Validator::validate_input_file(path)?;

    let bytes = fs::read(path).map_err(|source| PipelineError::FileOperation {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
