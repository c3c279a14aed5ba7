// file: src/scoring/aggregator.rs
// description: groups resolved visits by organization and derives lead summaries
// reference: additive tiered lead scoring

use crate::models::{LeadSummary, LogRecord};
use crate::resolver::{OrgLookup, OrganizationResolver};
use crate::scoring::visits::{OrganizationVisitSet, Visit};
use crate::taxonomy::UrlTaxonomy;
use std::collections::BTreeSet;
use tracing::debug;

pub struct LeadScorer {
    taxonomy: UrlTaxonomy,
}

impl LeadScorer {
    pub fn new(taxonomy: UrlTaxonomy) -> Self {
        Self { taxonomy }
    }

    /// Resolve every record and group it under its organization. Records that
    /// resolve to an empty organization are dropped.
    pub async fn collect_visits<L: OrgLookup>(
        &self,
        records: &[LogRecord],
        resolver: &mut OrganizationResolver<L>,
    ) -> OrganizationVisitSet {
        let mut visits = OrganizationVisitSet::new();

        for record in records {
            let organization = resolver.resolve(&record.address).await;
            if organization.is_empty() {
                debug!("No organization for {}, dropping visit", record.address);
                continue;
            }

            visits.record(
                &organization,
                Visit {
                    path: record.path.clone(),
                    timestamp: record.timestamp,
                },
            );
        }

        visits
    }

    /// One summary per organization, highest score first, ties broken by name.
    pub fn summarize(&self, visits: &OrganizationVisitSet) -> Vec<LeadSummary> {
        let mut summaries: Vec<LeadSummary> = visits
            .iter()
            .map(|(organization, visits)| self.summarize_organization(organization, visits))
            .collect();

        summaries.sort_by(|a, b| {
            b.lead_score
                .cmp(&a.lead_score)
                .then_with(|| a.company_name.cmp(&b.company_name))
        });

        summaries
    }

    pub fn summarize_organization(&self, organization: &str, visits: &[Visit]) -> LeadSummary {
        let lead_score = visits
            .iter()
            .map(|visit| self.taxonomy.points_for(&visit.path))
            .sum();

        let key_interests: BTreeSet<String> = visits
            .iter()
            .filter_map(|visit| self.taxonomy.label_for(&visit.path))
            .map(str::to_string)
            .collect();

        let last_visit = visits
            .iter()
            .filter_map(|visit| visit.timestamp)
            .max()
            .map(|timestamp| timestamp.to_rfc3339());

        LeadSummary {
            company_name: organization.to_string(),
            lead_score,
            key_interests,
            last_visit,
            visit_count: visits.len(),
        }
    }

    pub async fn score_records<L: OrgLookup>(
        &self,
        records: &[LogRecord],
        resolver: &mut OrganizationResolver<L>,
    ) -> Vec<LeadSummary> {
        let visits = self.collect_visits(records, resolver).await;
        self.summarize(&visits)
    }
}

impl Default for LeadScorer {
    fn default() -> Self {
        Self::new(UrlTaxonomy::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{AccessLogParser, parse_timestamp};
    use crate::resolver::organization::tests::FakeLookup;
    use pretty_assertions::assert_eq;

    fn visit(path: &str, timestamp: Option<&str>) -> Visit {
        Visit {
            path: path.to_string(),
            timestamp: timestamp.and_then(parse_timestamp),
        }
    }

    #[test]
    fn test_score_is_additive_over_repeat_visits() {
        let scorer = LeadScorer::default();
        let visits = vec![
            visit("/forms-request-demo/", None),
            visit("/forms-request-demo/", None),
            visit("/forms-request-demo/", None),
            visit("/careers/", None),
        ];

        let summary = scorer.summarize_organization("Acme", &visits);
        assert_eq!(summary.lead_score, 3 * 25 + 1);
        assert_eq!(summary.visit_count, 4);
    }

    #[test]
    fn test_no_visits_scores_zero() {
        let summary = LeadScorer::default().summarize_organization("Acme", &[]);
        assert_eq!(summary.lead_score, 0);
        assert!(summary.key_interests.is_empty());
        assert!(summary.last_visit.is_none());
    }

    #[test]
    fn test_interests_collapse_duplicates_and_skip_unlabeled() {
        let scorer = LeadScorer::default();
        let once = scorer.summarize_organization("Acme", &[visit("/roi-calculator/", None)]);
        let many = scorer.summarize_organization(
            "Acme",
            &[
                visit("/roi-calculator/", None),
                visit("/roi-calculator/", None),
                visit("/careers/", None),
                visit("/unknown-path/", None),
            ],
        );

        assert_eq!(once.key_interests, many.key_interests);
        assert_eq!(
            many.key_interests.into_iter().collect::<Vec<_>>(),
            vec!["ROI Analysis".to_string()]
        );
        assert_eq!(many.lead_score, 15 + 15 + 1);
    }

    #[test]
    fn test_last_visit_is_latest_instant() {
        let scorer = LeadScorer::default();
        let summary = scorer.summarize_organization(
            "Acme",
            &[
                visit("/careers/", Some("16/Dec/2024:10:00:00 +0200")),
                visit("/careers/", None),
                visit("/careers/", Some("16/Dec/2024:09:30:00 +0000")),
                visit("/careers/", Some("01/Dec/2024:23:59:59 +0000")),
            ],
        );

        assert_eq!(summary.last_visit.as_deref(), Some("2024-12-16T09:30:00+00:00"));
        assert_eq!(summary.visit_count, 4);
    }

    #[test]
    fn test_summaries_ordered_by_score_then_name() {
        let mut visits = OrganizationVisitSet::new();
        visits.record("Beta", visit("/careers/", None));
        visits.record("Alpha", visit("/careers/", None));
        visits.record("Gamma", visit("/contact-us/", None));

        let names: Vec<String> = LeadScorer::default()
            .summarize(&visits)
            .into_iter()
            .map(|summary| summary.company_name)
            .collect();
        assert_eq!(names, vec!["Gamma", "Alpha", "Beta"]);
    }

    #[tokio::test]
    async fn test_end_to_end_internal_user() {
        let lines = [
            r#"10.0.0.5 - - [15/Dec/2024:14:30:25 +0000] "GET /forms-request-demo/ HTTP/1.1" 200 15000"#,
            r#"10.0.0.5 - - [16/Dec/2024:09:00:00 +0000] "GET /forms-request-demo/ HTTP/1.1" 200 12000"#,
        ];
        let outcome = AccessLogParser::new().parse_lines(lines);
        let fake = FakeLookup::default();
        let mut resolver = OrganizationResolver::new(&fake);

        let summaries = LeadScorer::default()
            .score_records(&outcome.records, &mut resolver)
            .await;

        assert_eq!(
            summaries,
            vec![LeadSummary {
                company_name: "Internal User (10.0.0.5)".to_string(),
                lead_score: 50,
                key_interests: ["Requested Demo".to_string()].into_iter().collect(),
                last_visit: Some("2024-12-16T09:00:00+00:00".to_string()),
                visit_count: 2,
            }]
        );
        assert_eq!(fake.calls(), 0);
    }

    #[tokio::test]
    async fn test_unmapped_path_counts_visit_only() {
        let lines = [
            r#"10.0.0.5 - - [15/Dec/2024:14:30:25 +0000] "GET /forms-request-demo/ HTTP/1.1" 200 15000"#,
            r#"10.0.0.5 - - [15/Dec/2024:14:31:00 +0000] "GET /unknown-path/ HTTP/1.1" 404 300"#,
            r#"10.0.0.5 - - [15/Dec/2024:14:32:00 +0000] 200 15000"#,
        ];
        let outcome = AccessLogParser::new().parse_lines(lines);
        assert_eq!(outcome.skipped, 1);

        let fake = FakeLookup::default();
        let mut resolver = OrganizationResolver::new(&fake);
        let summaries = LeadScorer::default()
            .score_records(&outcome.records, &mut resolver)
            .await;

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].visit_count, 2);
        assert_eq!(summaries[0].lead_score, 25);
        assert_eq!(summaries[0].key_interests.len(), 1);
    }

    #[tokio::test]
    async fn test_unresolved_addresses_are_excluded() {
        let records = vec![
            LogRecord::new("8.8.8.8", "/ai-agent/", None),
            LogRecord::new("203.0.113.50", "/contact-us/", None),
            LogRecord::new("8.8.8.8", "/contact-us/", None),
        ];
        let fake = FakeLookup::with(&[("8.8.8.8", "Google LLC")]);
        let mut resolver = OrganizationResolver::new(&fake);

        let scorer = LeadScorer::default();
        let visits = scorer.collect_visits(&records, &mut resolver).await;

        assert_eq!(visits.organization_count(), 1);
        assert!(visits.visits_for("").is_none());

        let summaries = scorer.summarize(&visits);
        assert_eq!(summaries[0].company_name, "Google LLC");
        assert_eq!(summaries[0].lead_score, 40);
        assert_eq!(summaries[0].visit_count, 2);
        assert_eq!(fake.calls(), 2);
    }
}
