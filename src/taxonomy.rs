// file: src/taxonomy.rs
// description: static url taxonomy mapping site paths to intent tiers and interest labels
// reference: tiered lead scoring model

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    /// Highest intent: demo requests, trials, contact.
    Tier1,
    /// Product research.
    Tier2,
    /// Industry interest.
    Tier3,
    /// Low interest: company pages, careers, media.
    Tier4,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Tier1, Tier::Tier2, Tier::Tier3, Tier::Tier4];

    pub fn points(&self) -> u64 {
        match self {
            Tier::Tier1 => 25,
            Tier::Tier2 => 15,
            Tier::Tier3 => 5,
            Tier::Tier4 => 1,
        }
    }

    /// Relative weight of each path in this tier when synthesizing traffic.
    pub fn sampling_weight(&self) -> u32 {
        match self {
            Tier::Tier1 => 10,
            Tier::Tier2 => 20,
            Tier::Tier3 => 45,
            Tier::Tier4 => 25,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Tier1 => "Tier 1 (Highest Intent)",
            Tier::Tier2 => "Tier 2 (Research)",
            Tier::Tier3 => "Tier 3 (Industry Interest)",
            Tier::Tier4 => "Tier 4 (Low Interest)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathRule {
    pub path: &'static str,
    pub tier: Tier,
    pub label: Option<&'static str>,
}

const fn rule(path: &'static str, tier: Tier, label: Option<&'static str>) -> PathRule {
    PathRule { path, tier, label }
}

pub static URL_TAXONOMY: &[PathRule] = &[
    rule("/forms-request-demo/", Tier::Tier1, Some("Requested Demo")),
    rule("/try-ai-agent/", Tier::Tier1, Some("AI Agent Trial")),
    rule("/try-ai-knowledge-hub/", Tier::Tier1, Some("Knowledge Hub Trial")),
    rule("/contact-us/", Tier::Tier1, Some("Contacted Sales")),
    rule("/roi-calculator/", Tier::Tier2, Some("ROI Analysis")),
    rule("/ai-agent/", Tier::Tier2, Some("AI Agent")),
    rule("/ai-knowledge-hub/", Tier::Tier2, Some("AI Knowledge Hub")),
    rule("/conversation-hub/", Tier::Tier2, Some("Conversation Hub")),
    rule("/products/analytics/", Tier::Tier2, Some("Analytics")),
    rule(
        "/whats-in-knowledge-management-in-banking/",
        Tier::Tier3,
        Some("Banking"),
    ),
    rule(
        "/whats-in-knowledge-management-in-financial-services/",
        Tier::Tier3,
        Some("Financial Services"),
    ),
    rule(
        "/whats-in-knowledge-management-in-government/",
        Tier::Tier3,
        Some("Government"),
    ),
    rule(
        "/whats-in-knowledge-management-in-healthcare-providers/",
        Tier::Tier3,
        Some("Healthcare Providers"),
    ),
    rule(
        "/whats-in-knowledge-management-in-health-insurance/",
        Tier::Tier3,
        Some("Health Insurance"),
    ),
    rule(
        "/whats-in-knowledge-management-in-healthcare/",
        Tier::Tier3,
        Some("Healthcare"),
    ),
    rule(
        "/whats-in-knowledge-management-in-insurance/",
        Tier::Tier3,
        Some("Insurance"),
    ),
    rule(
        "/whats-in-knowledge-management-in-manufacturing/",
        Tier::Tier3,
        Some("Manufacturing"),
    ),
    rule(
        "/whats-in-knowledge-management-in-retail/",
        Tier::Tier3,
        Some("Retail"),
    ),
    rule(
        "/whats-in-knowledge-management-in-technology-sector/",
        Tier::Tier3,
        Some("Technology"),
    ),
    rule(
        "/whats-in-knowledge-management-in-telecommunications/",
        Tier::Tier3,
        Some("Telecommunications"),
    ),
    rule(
        "/whats-in-knowledge-management-in-the-public-sector/",
        Tier::Tier3,
        Some("Public Sector"),
    ),
    rule(
        "/whats-in-knowledge-management-in-travel-hospitality-airlines/",
        Tier::Tier3,
        Some("Travel & Hospitality"),
    ),
    rule(
        "/whats-in-knowledge-management-in-utilities/",
        Tier::Tier3,
        Some("Utilities"),
    ),
    rule("/company/about-us/", Tier::Tier4, None),
    rule("/careers/", Tier::Tier4, None),
    rule("/podcasts/", Tier::Tier4, None),
    rule(
        "/resources/egain-innovation-best-practices-webinars/",
        Tier::Tier4,
        Some("Webinars"),
    ),
    rule("/resources/case-studies/", Tier::Tier4, Some("Case Studies")),
    rule("/company/news/", Tier::Tier4, None),
    rule("/company/events/", Tier::Tier4, None),
];

/// Path-indexed view over [`URL_TAXONOMY`].
#[derive(Debug, Clone)]
pub struct UrlTaxonomy {
    rules: &'static [PathRule],
    by_path: HashMap<&'static str, PathRule>,
}

impl UrlTaxonomy {
    pub fn standard() -> Self {
        Self::from_rules(URL_TAXONOMY)
    }

    pub fn from_rules(rules: &'static [PathRule]) -> Self {
        let by_path = rules.iter().map(|rule| (rule.path, *rule)).collect();
        Self { rules, by_path }
    }

    pub fn rule_for(&self, path: &str) -> Option<&PathRule> {
        self.by_path.get(path)
    }

    pub fn tier_of(&self, path: &str) -> Option<Tier> {
        self.rule_for(path).map(|rule| rule.tier)
    }

    /// Score contribution of a single visit. Unknown paths score 0.
    pub fn points_for(&self, path: &str) -> u64 {
        self.tier_of(path).map(|tier| tier.points()).unwrap_or(0)
    }

    pub fn label_for(&self, path: &str) -> Option<&'static str> {
        self.rule_for(path).and_then(|rule| rule.label)
    }

    pub fn rules(&self) -> &'static [PathRule] {
        self.rules
    }

    pub fn paths(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.path)
    }

    pub fn paths_in(&self, tier: Tier) -> impl Iterator<Item = &'static str> + '_ {
        self.rules
            .iter()
            .filter(move |rule| rule.tier == tier)
            .map(|rule| rule.path)
    }
}

impl Default for UrlTaxonomy {
    fn default() -> Self {
        Self::standard()
    }
}
