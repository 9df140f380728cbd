//! Grant-to-organization compatibility scoring.
//!
//! Inputs pass through boundary validation, then the normalizer fills absent fields with
//! neutral defaults. Seven independent factor calculators produce 0-100 sub-scores with
//! structured findings, which the engine combines through fixed weights. The batch ranker
//! applies the engine across a catalog and sorts the results.

pub mod config;
mod confidence;
pub mod domain;
mod engine;
mod factors;
pub mod findings;
mod normalizer;
mod ranking;
pub mod sectors;
mod validation;

#[cfg(test)]
mod tests;

pub use config::{
    PreparationWindows, ScoringConfig, ScoringConfigError, ScoringWeights, DEFAULT_WEIGHTS,
};
pub use confidence::estimate as estimate_confidence;
pub use domain::{
    DifficultyTier, EligibilityRules, FundingRange, Grant, GrantId, GrantStatistics,
    InnovationLevel, OrganizationProfile, OrganizationType,
};
pub use engine::{MatchEngine, MatchScore, MatchTier, SubScores};
pub use factors::Factor;
pub use findings::{Finding, FindingCode, FindingDetail};
pub use normalizer::{normalize_grant, normalize_profile, NormalizedGrant, NormalizedProfile};
pub use ranking::{BatchRanker, RankedGrant, RankedMatches, RankingFilter};
pub use sectors::SectorSimilarity;
pub use validation::{validate_grant, validate_profile, ValidationError};
