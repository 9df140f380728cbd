//! The seven independent sub-score calculators.
//!
//! Each calculator is a pure function of the normalized profile and grant (plus the scoring
//! configuration and clock carried in [`FactorContext`]) returning a 0-100 sub-score and the
//! findings that justify it.

mod competition;
mod deadline;
mod eligibility;
mod historical;
mod organizational_fit;
mod requirements;
mod sector;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::ScoringConfig;
use super::findings::Finding;
use super::normalizer::{NormalizedGrant, NormalizedProfile};
use super::sectors::SectorSimilarity;

/// Sub-score dimensions, in aggregation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Eligibility,
    SectorRelevance,
    OrganizationalFit,
    HistoricalSuccess,
    Competition,
    DeadlineViability,
    RequirementsFulfillment,
}

impl Factor {
    pub const ALL: [Factor; 7] = [
        Factor::Eligibility,
        Factor::SectorRelevance,
        Factor::OrganizationalFit,
        Factor::HistoricalSuccess,
        Factor::Competition,
        Factor::DeadlineViability,
        Factor::RequirementsFulfillment,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Factor::Eligibility => "eligibility",
            Factor::SectorRelevance => "sector relevance",
            Factor::OrganizationalFit => "organizational fit",
            Factor::HistoricalSuccess => "historical success",
            Factor::Competition => "competition",
            Factor::DeadlineViability => "deadline viability",
            Factor::RequirementsFulfillment => "requirements fulfillment",
        }
    }
}

/// Inputs shared by every calculator for one (profile, grant) pair.
pub(crate) struct FactorContext<'a> {
    pub profile: &'a NormalizedProfile,
    pub grant: &'a NormalizedGrant,
    pub config: &'a ScoringConfig,
    pub sectors: &'a SectorSimilarity,
    pub now: DateTime<Utc>,
}

/// Sub-score plus the findings emitted while computing it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FactorScore {
    pub factor: Factor,
    pub score: u8,
    pub findings: Vec<Finding>,
}

impl FactorScore {
    pub(crate) fn new(factor: Factor, points: f64, findings: Vec<Finding>) -> Self {
        Self {
            factor,
            score: clamp_score(points),
            findings,
        }
    }
}

pub(crate) fn clamp_score(points: f64) -> u8 {
    if points.is_nan() {
        return 0;
    }
    points.round().clamp(0.0, 100.0) as u8
}

/// Run every calculator in [`Factor::ALL`] order.
pub(crate) fn evaluate_all(ctx: &FactorContext<'_>) -> [FactorScore; 7] {
    [
        eligibility::score(ctx),
        sector::score(ctx),
        organizational_fit::score(ctx),
        historical::score(ctx),
        competition::score(ctx),
        deadline::score(ctx),
        requirements::score(ctx),
    ]
}
