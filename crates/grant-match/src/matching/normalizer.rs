use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

use super::domain::{
    DifficultyTier, Grant, GrantId, InnovationLevel, OrganizationProfile, OrganizationType,
};

/// Fully populated profile consumed by the factor calculators.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedProfile {
    pub organization_type: OrganizationType,
    pub employee_count: u32,
    pub annual_revenue: f64,
    pub sectors: BTreeSet<String>,
    pub location: String,
    pub previous_grants: u32,
    pub innovation_capability: InnovationLevel,
    pub capabilities: BTreeMap<String, bool>,
}

/// Fully populated grant consumed by the factor calculators.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedGrant {
    pub id: GrantId,
    pub max_amount: f64,
    pub deadline: DateTime<Utc>,
    pub organization_types: Vec<OrganizationType>,
    pub min_employees: Option<u32>,
    pub max_employees: Option<u32>,
    /// Empty when the grant is open to every region.
    pub regions: BTreeSet<String>,
    pub sectors: BTreeSet<String>,
    /// Only the capabilities the grant actually demands (flag set to `true`).
    pub required_capabilities: BTreeSet<String>,
    pub requires_innovation: bool,
    pub difficulty: DifficultyTier,
    pub success_rate: f64,
    pub typical_applicants: u32,
}

pub(crate) fn normalize_tag(value: &str) -> String {
    value.trim().to_ascii_lowercase()
}

fn normalize_tags<'a, I>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a String>,
{
    values
        .into_iter()
        .map(|value| normalize_tag(value))
        .filter(|value| !value.is_empty())
        .collect()
}

pub fn normalize_profile(profile: &OrganizationProfile) -> NormalizedProfile {
    NormalizedProfile {
        organization_type: profile
            .organization_type
            .unwrap_or(OrganizationType::Private),
        employee_count: profile.employee_count.unwrap_or(0),
        annual_revenue: profile.annual_revenue.unwrap_or(0.0),
        sectors: profile
            .sectors
            .as_ref()
            .map(|sectors| normalize_tags(sectors))
            .unwrap_or_default(),
        location: profile
            .location
            .as_deref()
            .map(normalize_tag)
            .unwrap_or_default(),
        previous_grants: profile.previous_grants.unwrap_or(0),
        innovation_capability: profile
            .innovation_capability
            .unwrap_or(InnovationLevel::Medium),
        capabilities: profile.capabilities.clone().unwrap_or_default(),
    }
}

pub fn normalize_grant(grant: &Grant) -> NormalizedGrant {
    NormalizedGrant {
        id: grant.id.clone(),
        max_amount: grant.funding.max,
        deadline: grant.deadline,
        organization_types: grant.eligibility.organization_types.clone(),
        min_employees: grant.eligibility.min_employees,
        max_employees: grant.eligibility.max_employees,
        regions: grant
            .eligibility
            .regions
            .as_ref()
            .map(|regions| normalize_tags(regions))
            .unwrap_or_default(),
        sectors: normalize_tags(&grant.sectors),
        required_capabilities: grant
            .required_capabilities
            .iter()
            .filter(|(_, required)| **required)
            .map(|(name, _)| name.clone())
            .collect(),
        requires_innovation: grant.requires_innovation,
        difficulty: grant.difficulty.unwrap_or(DifficultyTier::Medium),
        success_rate: grant.statistics.success_rate.unwrap_or(0.0),
        typical_applicants: grant.statistics.typical_applicants.unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_profile_resolves_to_neutral_defaults() {
        let normalized = normalize_profile(&OrganizationProfile::default());

        assert_eq!(normalized.organization_type, OrganizationType::Private);
        assert_eq!(normalized.employee_count, 0);
        assert_eq!(normalized.annual_revenue, 0.0);
        assert!(normalized.sectors.is_empty());
        assert!(normalized.location.is_empty());
        assert_eq!(normalized.previous_grants, 0);
        assert_eq!(normalized.innovation_capability, InnovationLevel::Medium);
        assert!(normalized.capabilities.is_empty());
    }

    #[test]
    fn sector_tags_are_trimmed_and_lowercased() {
        let profile = OrganizationProfile {
            sectors: Some(
                [" Technology ", "FinTech", "  "]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            ),
            location: Some(" Bavaria".to_string()),
            ..OrganizationProfile::default()
        };

        let normalized = normalize_profile(&profile);

        let expected: BTreeSet<String> = ["fintech", "technology"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(normalized.sectors, expected);
        assert_eq!(normalized.location, "bavaria");
    }
}
