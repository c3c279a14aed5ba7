// file: src/scoring/visits.rs
// description: per-organization visit grouping in first-seen order

use chrono::{DateTime, FixedOffset};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub path: String,
    pub timestamp: Option<DateTime<FixedOffset>>,
}

/// Organization name to visits, in the order the visits were recorded.
#[derive(Debug, Clone, Default)]
pub struct OrganizationVisitSet {
    index: HashMap<String, usize>,
    groups: Vec<(String, Vec<Visit>)>,
}

impl OrganizationVisitSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, organization: &str, visit: Visit) {
        let slot = match self.index.get(organization) {
            Some(&slot) => slot,
            None => {
                self.groups.push((organization.to_string(), Vec::new()));
                self.index
                    .insert(organization.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[slot].1.push(visit);
    }

    pub fn visits_for(&self, organization: &str) -> Option<&[Visit]> {
        self.index
            .get(organization)
            .map(|&slot| self.groups[slot].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Visit])> {
        self.groups
            .iter()
            .map(|(organization, visits)| (organization.as_str(), visits.as_slice()))
    }

    pub fn organization_count(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
