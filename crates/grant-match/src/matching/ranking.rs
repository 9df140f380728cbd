use std::io::Write;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::confidence;
use super::domain::{FundingRange, Grant, OrganizationProfile};
use super::engine::{MatchEngine, MatchScore};
use super::factors::Factor;
use super::normalizer::normalize_profile;
use super::validation::{validate_grant, validate_profile, ValidationError};

/// A scored grant together with the catalog facts the filters narrow on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedGrant {
    pub title: String,
    pub funding: FundingRange,
    pub deadline: DateTime<Utc>,
    pub score: MatchScore,
}

/// Post-hoc narrowing of an already ranked result. Unset bounds do not filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingFilter {
    pub min_score: Option<u8>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub deadline_after: Option<DateTime<Utc>>,
    pub deadline_before: Option<DateTime<Utc>>,
}

impl RankingFilter {
    pub fn matches(&self, entry: &RankedGrant) -> bool {
        if let Some(threshold) = self.min_score {
            if entry.score.overall < threshold {
                return false;
            }
        }

        if !entry.funding.overlaps(self.min_amount, self.max_amount) {
            return false;
        }

        if let Some(after) = self.deadline_after {
            if entry.deadline < after {
                return false;
            }
        }

        if let Some(before) = self.deadline_before {
            if entry.deadline > before {
                return false;
            }
        }

        true
    }
}

/// Catalog scored against one profile, sorted by overall score descending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedMatches {
    entries: Vec<RankedGrant>,
}

impl RankedMatches {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedGrant> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[RankedGrant] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<RankedGrant> {
        self.entries
    }

    pub fn top(&self, limit: usize) -> &[RankedGrant] {
        &self.entries[..limit.min(self.entries.len())]
    }

    /// Keep only the best `limit` entries.
    pub fn truncate(&mut self, limit: usize) {
        self.entries.truncate(limit);
    }

    /// Narrow the ranking without rescoring; relative order is preserved.
    pub fn filter(&self, filter: &RankingFilter) -> RankedMatches {
        RankedMatches {
            entries: self
                .entries
                .iter()
                .filter(|entry| filter.matches(entry))
                .cloned()
                .collect(),
        }
    }

    /// One CSV row per grant: identity, overall score, confidence, and every sub-score.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut out = csv::Writer::from_writer(writer);

        let mut header = vec![
            "rank".to_string(),
            "grant_id".to_string(),
            "title".to_string(),
            "overall".to_string(),
            "tier".to_string(),
            "confidence".to_string(),
        ];
        header.extend(
            Factor::ALL
                .iter()
                .map(|factor| factor.label().replace(' ', "_")),
        );
        header.push("deadline".to_string());
        out.write_record(&header)?;

        for (index, entry) in self.entries.iter().enumerate() {
            let score = &entry.score;
            let mut row = vec![
                (index + 1).to_string(),
                score.grant_id.to_string(),
                entry.title.clone(),
                score.overall.to_string(),
                score.tier.label().to_string(),
                score.confidence.to_string(),
            ];
            row.extend(score.sub_scores.as_array().iter().map(u8::to_string));
            row.push(entry.deadline.to_rfc3339());
            out.write_record(&row)?;
        }

        out.flush()?;
        Ok(())
    }
}

/// Scores a whole catalog against one profile and orders the results.
#[derive(Debug, Clone, Default)]
pub struct BatchRanker {
    engine: MatchEngine,
}

impl BatchRanker {
    pub fn new(engine: MatchEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    pub fn rank_now(
        &self,
        profile: &OrganizationProfile,
        grants: &[Grant],
    ) -> Result<RankedMatches, ValidationError> {
        self.rank(profile, grants, Utc::now())
    }

    /// Validate every input up front, then score grants in parallel.
    ///
    /// Ties keep catalog order.
    pub fn rank(
        &self,
        profile: &OrganizationProfile,
        grants: &[Grant],
        now: DateTime<Utc>,
    ) -> Result<RankedMatches, ValidationError> {
        validate_profile(profile).inspect_err(|err| warn!(%err, "rejected profile"))?;
        for grant in grants {
            validate_grant(grant).inspect_err(|err| warn!(%err, "rejected catalog"))?;
        }

        let normalized = normalize_profile(profile);
        let confidence = confidence::estimate(profile);

        let mut entries: Vec<RankedGrant> = grants
            .par_iter()
            .map(|grant| RankedGrant {
                title: grant.title.clone(),
                funding: grant.funding.clone(),
                deadline: grant.deadline,
                score: self
                    .engine
                    .score_validated(&normalized, confidence, grant, now),
            })
            .collect();

        entries.sort_by(|left, right| right.score.overall.cmp(&left.score.overall));

        info!(
            grants = entries.len(),
            best = entries.first().map(|entry| entry.score.overall),
            confidence,
            "ranked grant catalog"
        );

        Ok(RankedMatches { entries })
    }
}
