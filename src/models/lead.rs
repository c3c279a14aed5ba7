// file: src/models/lead.rs
// description: per-organization lead summary written to the json report
// reference: internal data structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSummary {
    pub company_name: String,
    pub lead_score: u64,
    pub key_interests: BTreeSet<String>,
    /// RFC 3339 rendering of the most recent timestamped visit.
    pub last_visit: Option<String>,
    pub visit_count: usize,
}

impl LeadSummary {
    pub fn is_internal(&self) -> bool {
        self.company_name.starts_with(crate::resolver::INTERNAL_LABEL_PREFIX)
    }
}
