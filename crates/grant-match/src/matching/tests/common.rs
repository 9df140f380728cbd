use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::matching::domain::{
    DifficultyTier, EligibilityRules, FundingRange, Grant, GrantId, GrantStatistics,
    InnovationLevel, OrganizationProfile, OrganizationType,
};
use crate::matching::{BatchRanker, MatchEngine};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn tags(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(super) fn engine() -> MatchEngine {
    MatchEngine::default()
}

pub(super) fn ranker() -> BatchRanker {
    BatchRanker::new(engine())
}

/// Established private technology company with a strong award history.
pub(super) fn tech_profile() -> OrganizationProfile {
    OrganizationProfile {
        name: Some("Nordlicht Robotics GmbH".to_string()),
        organization_type: Some(OrganizationType::Private),
        employee_count: Some(12),
        annual_revenue: Some(1_000_000.0),
        sectors: Some(tags(&["technology"])),
        location: Some("Bavaria".to_string()),
        previous_grants: Some(8),
        innovation_capability: Some(InnovationLevel::High),
        capabilities: Some(BTreeMap::new()),
    }
}

/// Only organization type and head count are known.
pub(super) fn sparse_profile() -> OrganizationProfile {
    OrganizationProfile {
        organization_type: Some(OrganizationType::Private),
        employee_count: Some(12),
        ..OrganizationProfile::default()
    }
}

pub(super) fn accelerator_grant() -> Grant {
    Grant {
        id: GrantId("eic-accelerator".to_string()),
        title: "EIC Accelerator".to_string(),
        funding: FundingRange {
            min: 50_000.0,
            max: 250_000.0,
            currency: "EUR".to_string(),
        },
        deadline: now() + Duration::days(60),
        eligibility: EligibilityRules {
            organization_types: vec![OrganizationType::Private],
            min_employees: None,
            max_employees: None,
            regions: None,
        },
        sectors: tags(&["technology"]),
        required_capabilities: BTreeMap::new(),
        requires_innovation: true,
        difficulty: Some(DifficultyTier::Medium),
        statistics: GrantStatistics {
            success_rate: Some(30.0),
            typical_applicants: Some(40),
        },
    }
}

pub(super) fn grant_with(id: &str, mutate: impl FnOnce(&mut Grant)) -> Grant {
    let mut grant = accelerator_grant();
    grant.id = GrantId(id.to_string());
    grant.title = id.to_string();
    mutate(&mut grant);
    grant
}

/// Four grants of clearly separated quality, listed worst first.
pub(super) fn mixed_catalog() -> Vec<Grant> {
    vec![
        grant_with("culture-fund", |grant| {
            grant.eligibility.organization_types = vec![OrganizationType::Nonprofit];
            grant.sectors = tags(&["culture"]);
            grant.statistics.success_rate = Some(8.0);
            grant.statistics.typical_applicants = Some(900);
            grant.deadline = now() + Duration::days(3);
        }),
        grant_with("regional-digital", |grant| {
            grant.sectors = tags(&["fintech"]);
            grant.statistics.typical_applicants = Some(120);
            grant.funding.max = 900_000.0;
        }),
        grant_with("eic-accelerator", |_| {}),
        grant_with("open-innovation", |grant| {
            grant.sectors = BTreeSet::new();
            grant.statistics.success_rate = Some(45.0);
            grant.funding = FundingRange {
                min: 10_000.0,
                max: 60_000.0,
                currency: "EUR".to_string(),
            };
        }),
    ]
}
