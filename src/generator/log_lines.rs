// file: src/generator/log_lines.rs
// description: weighted synthesis of common log format lines over the url taxonomy
// reference: https://docs.rs/rand

use crate::config::GeneratorConfig;
use crate::error::{PipelineError, Result};
use crate::generator::ip_pool::generate_ip_pool;
use crate::taxonomy::{Tier, UrlTaxonomy};
use chrono::{DateTime, Duration, Utc};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

const STATUS_CODES: [u16; 7] = [200, 200, 200, 200, 200, 404, 500];
const STATUS_WEIGHTS: [u32; 7] = [85, 85, 85, 85, 85, 10, 5];

#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    pub entries: usize,
    pub unique_addresses: usize,
    pub tier_counts: BTreeMap<&'static str, usize>,
    pub unmapped: usize,
}

pub struct LogGenerator {
    config: GeneratorConfig,
    taxonomy: UrlTaxonomy,
    rng: StdRng,
    paths: Vec<&'static str>,
    path_weights: WeightedIndex<u32>,
    status_weights: WeightedIndex<u32>,
}

impl LogGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Reproducible generator: the same seed yields the same lines.
    pub fn with_seed(config: GeneratorConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GeneratorConfig, rng: StdRng) -> Result<Self> {
        if config.ip_pool_size == 0 {
            return Err(PipelineError::Generation(
                "ip_pool_size must be greater than 0".to_string(),
            ));
        }

        let taxonomy = UrlTaxonomy::standard();
        let paths: Vec<&'static str> = taxonomy.paths().collect();
        let weights = taxonomy.rules().iter().map(|rule| rule.tier.sampling_weight());

        let path_weights = WeightedIndex::new(weights)
            .map_err(|e| PipelineError::Generation(format!("Invalid path weights: {}", e)))?;
        let status_weights = WeightedIndex::new(STATUS_WEIGHTS)
            .map_err(|e| PipelineError::Generation(format!("Invalid status weights: {}", e)))?;

        Ok(Self {
            config,
            taxonomy,
            rng,
            paths,
            path_weights,
            status_weights,
        })
    }

    pub fn sample_path(&mut self) -> &'static str {
        self.paths[self.path_weights.sample(&mut self.rng)]
    }

    fn sample_timestamp(&mut self, now: DateTime<Utc>) -> String {
        let span = self.config.days_back * 24 * 60 * 60;
        let offset = self.rng.gen_range(0..=span);
        let when = now - Duration::days(self.config.days_back) + Duration::seconds(offset);
        when.format("%d/%b/%Y:%H:%M:%S +0000").to_string()
    }

    fn entry(&mut self, address: &str, now: DateTime<Utc>) -> String {
        let timestamp = self.sample_timestamp(now);
        let path = self.sample_path();
        let status = STATUS_CODES[self.status_weights.sample(&mut self.rng)];
        let bytes = self.rng.gen_range(1000..=50000u32);

        format!(
            r#"{} - - [{}] "GET {} HTTP/1.1" {} {}"#,
            address, timestamp, path, status, bytes
        )
    }

    /// Generate `config.entries` lines, each from a visitor drawn out of a
    /// freshly generated address pool, timestamped within `days_back` of `now`.
    pub fn generate_entries(&mut self, now: DateTime<Utc>) -> Vec<String> {
        let pool = generate_ip_pool(
            &mut self.rng,
            self.config.ip_pool_size,
            self.config.private_ips,
        );

        let mut entries = Vec::with_capacity(self.config.entries);
        for _ in 0..self.config.entries {
            // pool is non-empty: with_rng rejects a zero ip_pool_size
            let Some(address) = pool.choose(&mut self.rng).cloned() else {
                break;
            };
            entries.push(self.entry(&address, now));
        }
        entries
    }

    pub fn write_to(&mut self, path: &Path) -> Result<GenerationReport> {
        let entries = self.generate_entries(Utc::now());

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path).map_err(|source| PipelineError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        for (i, entry) in entries.iter().enumerate() {
            writeln!(writer, "{}", entry)?;

            if (i + 1) % 100 == 0 {
                info!("Generated {} entries...", i + 1);
            }
        }
        writer.flush()?;

        let report = self.report(&entries);
        info!(
            "Generated {} entries from {} unique addresses into {}",
            report.entries,
            report.unique_addresses,
            path.display()
        );
        for (tier, count) in &report.tier_counts {
            info!("  {}: {} entries", tier, count);
        }

        Ok(report)
    }

    pub fn report(&self, entries: &[String]) -> GenerationReport {
        let mut tier_counts: BTreeMap<&'static str, usize> =
            Tier::ALL.iter().map(|tier| (tier.as_str(), 0)).collect();
        let mut addresses = HashSet::new();
        let mut unmapped = 0;

        for entry in entries {
            if let Some(address) = entry.split_whitespace().next() {
                addresses.insert(address);
            }

            let path = entry
                .split('"')
                .nth(1)
                .and_then(|request| request.split_whitespace().nth(1));

            match path.and_then(|path| self.taxonomy.tier_of(path)) {
                Some(tier) => *tier_counts.entry(tier.as_str()).or_insert(0) += 1,
                None => unmapped += 1,
            }
        }

        GenerationReport {
            entries: entries.len(),
            unique_addresses: addresses.len(),
            tier_counts,
            unmapped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::parser::AccessLogParser;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn config(entries: usize) -> GeneratorConfig {
        GeneratorConfig {
            entries,
            ..Config::default_config().generator
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 31, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_generated_lines_parse() {
        let mut generator = LogGenerator::with_seed(config(200), 1).unwrap();
        let entries = generator.generate_entries(now());

        let outcome = AccessLogParser::new().parse_lines(entries.iter().map(String::as_str));
        assert_eq!(outcome.records.len(), 200);
        assert_eq!(outcome.skipped, 0);
        assert_eq!(outcome.missing_timestamps, 0);

        let earliest = now() - Duration::days(30);
        for record in &outcome.records {
            let ts = record.timestamp.unwrap();
            assert!(ts >= earliest && ts <= now());
        }
    }

    #[test]
    fn test_empty_pool_is_rejected() {
        let config = GeneratorConfig {
            ip_pool_size: 0,
            private_ips: 0,
            ..config(10)
        };
        assert!(matches!(
            LogGenerator::with_seed(config, 1),
            Err(PipelineError::Generation(_))
        ));
    }

    #[test]
    fn test_seeded_output_is_reproducible() {
        let a = LogGenerator::with_seed(config(50), 99)
            .unwrap()
            .generate_entries(now());
        let b = LogGenerator::with_seed(config(50), 99)
            .unwrap()
            .generate_entries(now());
        assert_eq!(a, b);
    }

    #[test]
    fn test_sampled_paths_come_from_taxonomy() {
        let mut generator = LogGenerator::with_seed(config(1), 5).unwrap();
        let taxonomy = UrlTaxonomy::standard();
        for _ in 0..500 {
            assert!(taxonomy.tier_of(generator.sample_path()).is_some());
        }
    }

    #[test]
    fn test_tier_three_dominates_large_sample() {
        let mut generator = LogGenerator::with_seed(config(5000), 17).unwrap();
        let entries = generator.generate_entries(now());
        let report = generator.report(&entries);

        assert_eq!(report.entries, 5000);
        assert_eq!(report.unmapped, 0);
        let tier3 = report.tier_counts[Tier::Tier3.as_str()];
        let tier1 = report.tier_counts[Tier::Tier1.as_str()];
        assert!(tier3 > tier1 * 5, "tier3={} tier1={}", tier3, tier1);
    }

    #[test]
    fn test_write_to_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("logs/access.log");

        let report = LogGenerator::with_seed(config(25), 3)
            .unwrap()
            .write_to(&path)
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 25);
        assert_eq!(report.entries, 25);
        assert!(report.unique_addresses <= 25);
    }
}
