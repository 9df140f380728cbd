use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::{ScoringConfig, ScoringConfigError, ScoringWeights};
use super::confidence;
use super::domain::{Grant, GrantId, OrganizationProfile};
use super::factors::{clamp_score, evaluate_all, Factor, FactorContext, FactorScore};
use super::findings::Finding;
use super::normalizer::{normalize_grant, normalize_profile, NormalizedProfile};
use super::sectors::SectorSimilarity;
use super::validation::{validate_grant, validate_profile, ValidationError};

/// The seven named sub-scores behind an overall match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScores {
    pub eligibility: u8,
    pub sector_relevance: u8,
    pub organizational_fit: u8,
    pub historical_success: u8,
    pub competition: u8,
    pub deadline_viability: u8,
    pub requirements_fulfillment: u8,
}

impl SubScores {
    pub fn get(&self, factor: Factor) -> u8 {
        match factor {
            Factor::Eligibility => self.eligibility,
            Factor::SectorRelevance => self.sector_relevance,
            Factor::OrganizationalFit => self.organizational_fit,
            Factor::HistoricalSuccess => self.historical_success,
            Factor::Competition => self.competition,
            Factor::DeadlineViability => self.deadline_viability,
            Factor::RequirementsFulfillment => self.requirements_fulfillment,
        }
    }

    pub fn as_array(&self) -> [u8; 7] {
        Factor::ALL.map(|factor| self.get(factor))
    }

    /// Weighted sum, rounded and clamped to 0-100.
    pub fn weighted(&self, weights: &ScoringWeights) -> u8 {
        let total: f64 = self
            .as_array()
            .iter()
            .zip(weights.as_array())
            .map(|(score, weight)| f64::from(*score) * weight)
            .sum();
        clamp_score(total)
    }

    fn from_factors(scores: &[FactorScore; 7]) -> Self {
        let [eligibility, sector, fit, historical, competition, deadline, requirements] =
            scores;
        Self {
            eligibility: eligibility.score,
            sector_relevance: sector.score,
            organizational_fit: fit.score,
            historical_success: historical.score,
            competition: competition.score,
            deadline_viability: deadline.score,
            requirements_fulfillment: requirements.score,
        }
    }
}

/// Coarse band for presenting an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl MatchTier {
    pub const fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => MatchTier::Excellent,
            60..=79 => MatchTier::Good,
            40..=59 => MatchTier::Fair,
            _ => MatchTier::Poor,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            MatchTier::Excellent => "excellent",
            MatchTier::Good => "good",
            MatchTier::Fair => "fair",
            MatchTier::Poor => "poor",
        }
    }
}

/// Explainable compatibility result for one (profile, grant) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    pub grant_id: GrantId,
    pub overall: u8,
    pub sub_scores: SubScores,
    pub confidence: u8,
    pub tier: MatchTier,
    /// Findings in calculator declaration order.
    pub findings: Vec<Finding>,
}

impl MatchScore {
    pub fn reasoning(&self) -> Vec<&str> {
        self.messages(|finding| matches!(finding, Finding::Reasoning(_)))
    }

    pub fn recommendations(&self) -> Vec<&str> {
        self.messages(|finding| matches!(finding, Finding::Recommendation(_)))
    }

    pub fn risk_factors(&self) -> Vec<&str> {
        self.messages(Finding::is_risk)
    }

    fn messages(&self, keep: impl Fn(&Finding) -> bool) -> Vec<&str> {
        self.findings
            .iter()
            .filter(|&finding| keep(finding))
            .map(Finding::message)
            .collect()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} match ({}/100, confidence {}%)",
            self.tier.label(),
            self.overall,
            self.confidence
        )
    }
}

/// Stateless scorer that applies a [`ScoringConfig`] to profile and grant pairs.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    config: ScoringConfig,
    sectors: Arc<SectorSimilarity>,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self {
            config: ScoringConfig::default(),
            sectors: SectorSimilarity::shared(),
        }
    }
}

impl MatchEngine {
    pub fn new(config: ScoringConfig) -> Result<Self, ScoringConfigError> {
        Self::with_sectors(config, SectorSimilarity::shared())
    }

    pub fn with_sectors(
        config: ScoringConfig,
        sectors: Arc<SectorSimilarity>,
    ) -> Result<Self, ScoringConfigError> {
        config.validate()?;
        Ok(Self { config, sectors })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn sectors(&self) -> &SectorSimilarity {
        &self.sectors
    }

    /// Score against the current UTC time.
    pub fn score(
        &self,
        profile: &OrganizationProfile,
        grant: &Grant,
    ) -> Result<MatchScore, ValidationError> {
        self.score_at(profile, grant, Utc::now())
    }

    pub fn score_at(
        &self,
        profile: &OrganizationProfile,
        grant: &Grant,
        now: DateTime<Utc>,
    ) -> Result<MatchScore, ValidationError> {
        validate_profile(profile)?;
        validate_grant(grant)?;

        let normalized = normalize_profile(profile);
        let confidence = confidence::estimate(profile);
        Ok(self.score_validated(&normalized, confidence, grant, now))
    }

    /// Score a grant that already passed validation against a normalized profile.
    pub(crate) fn score_validated(
        &self,
        profile: &NormalizedProfile,
        confidence: u8,
        grant: &Grant,
        now: DateTime<Utc>,
    ) -> MatchScore {
        let grant = normalize_grant(grant);
        let ctx = FactorContext {
            profile,
            grant: &grant,
            config: &self.config,
            sectors: &self.sectors,
            now,
        };

        let factor_scores = evaluate_all(&ctx);
        let sub_scores = SubScores::from_factors(&factor_scores);
        let overall = sub_scores.weighted(&self.config.weights);
        let findings = factor_scores
            .into_iter()
            .flat_map(|factor| factor.findings)
            .collect();

        debug!(grant = %grant.id, overall, confidence, "scored grant");

        MatchScore {
            grant_id: grant.id,
            overall,
            sub_scores,
            confidence,
            tier: MatchTier::from_score(overall),
            findings,
        }
    }
}
