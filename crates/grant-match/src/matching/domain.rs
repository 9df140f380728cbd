use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for catalog grants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantId(pub String);

impl fmt::Display for GrantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Legal form of the applying organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationType {
    Private,
    Public,
    Nonprofit,
    Academic,
    Government,
}

impl OrganizationType {
    pub const fn label(self) -> &'static str {
        match self {
            OrganizationType::Private => "private",
            OrganizationType::Public => "public",
            OrganizationType::Nonprofit => "nonprofit",
            OrganizationType::Academic => "academic",
            OrganizationType::Government => "government",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InnovationLevel {
    Low,
    Medium,
    High,
}

impl InnovationLevel {
    pub const fn label(self) -> &'static str {
        match self {
            InnovationLevel::Low => "low",
            InnovationLevel::Medium => "medium",
            InnovationLevel::High => "high",
        }
    }
}

/// Effort tier of an application, driving the preparation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyTier {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl DifficultyTier {
    pub const fn label(self) -> &'static str {
        match self {
            DifficultyTier::Easy => "easy",
            DifficultyTier::Medium => "medium",
            DifficultyTier::Hard => "hard",
            DifficultyTier::Expert => "expert",
        }
    }
}

/// Caller supplied organization snapshot. Every field may be absent; the normalizer
/// resolves gaps to neutral defaults before scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrganizationProfile {
    pub name: Option<String>,
    pub organization_type: Option<OrganizationType>,
    pub employee_count: Option<u32>,
    pub annual_revenue: Option<f64>,
    pub sectors: Option<BTreeSet<String>>,
    pub location: Option<String>,
    pub previous_grants: Option<u32>,
    pub innovation_capability: Option<InnovationLevel>,
    pub capabilities: Option<BTreeMap<String, bool>>,
}

/// Funding bounds offered by a grant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingRange {
    pub min: f64,
    pub max: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "EUR".to_string()
}

impl FundingRange {
    /// True when the range shares at least one amount with `[lower, upper]`.
    pub fn overlaps(&self, lower: Option<f64>, upper: Option<f64>) -> bool {
        let above_lower = lower.map(|lower| self.max >= lower).unwrap_or(true);
        let below_upper = upper.map(|upper| self.min <= upper).unwrap_or(true);
        above_lower && below_upper
    }
}

/// Eligibility restrictions published with a grant call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EligibilityRules {
    pub organization_types: Vec<OrganizationType>,
    pub min_employees: Option<u32>,
    pub max_employees: Option<u32>,
    pub regions: Option<BTreeSet<String>>,
}

/// Outcome statistics from previous rounds of the same programme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrantStatistics {
    /// Percentage of applications funded, 0-100.
    pub success_rate: Option<f64>,
    pub typical_applicants: Option<u32>,
}

/// Catalog entry describing one funding opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grant {
    pub id: GrantId,
    #[serde(default)]
    pub title: String,
    pub funding: FundingRange,
    pub deadline: DateTime<Utc>,
    #[serde(default)]
    pub eligibility: EligibilityRules,
    #[serde(default)]
    pub sectors: BTreeSet<String>,
    #[serde(default)]
    pub required_capabilities: BTreeMap<String, bool>,
    #[serde(default)]
    pub requires_innovation: bool,
    #[serde(default)]
    pub difficulty: Option<DifficultyTier>,
    #[serde(default)]
    pub statistics: GrantStatistics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn funding_overlap_treats_missing_bounds_as_open() {
        let range = FundingRange {
            min: 50_000.0,
            max: 250_000.0,
            currency: "EUR".to_string(),
        };

        assert!(range.overlaps(None, None));
        assert!(range.overlaps(Some(200_000.0), None));
        assert!(range.overlaps(None, Some(50_000.0)));
        assert!(!range.overlaps(Some(300_000.0), None));
        assert!(!range.overlaps(None, Some(10_000.0)));
    }

    #[test]
    fn grant_deserializes_with_sparse_fields() {
        let grant: Grant = serde_json::from_str(
            r#"{
                "id": "horizon-eic",
                "funding": { "min": 0, "max": 100000 },
                "deadline": "2026-12-01T00:00:00Z"
            }"#,
        )
        .expect("sparse grant parses");

        assert_eq!(grant.id, GrantId("horizon-eic".to_string()));
        assert_eq!(grant.funding.currency, "EUR");
        assert!(grant.sectors.is_empty());
        assert!(grant.difficulty.is_none());
        assert!(grant.statistics.typical_applicants.is_none());
    }

    #[test]
    fn profile_rejects_negative_employee_count_at_parse() {
        let parsed = serde_json::from_str::<OrganizationProfile>(r#"{ "employeeCount": -3 }"#);
        assert!(parsed.is_err());
    }
}
