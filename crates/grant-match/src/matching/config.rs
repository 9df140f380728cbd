use std::io::Read;

use serde::{Deserialize, Serialize};

use super::domain::DifficultyTier;

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Aggregation weights for the seven sub-scores.
///
/// These are calibration choices, not derived quantities; validate against real award
/// outcomes before relying on absolute score values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub eligibility: f64,
    pub sector: f64,
    pub organizational_fit: f64,
    pub historical: f64,
    pub competition: f64,
    pub deadline: f64,
    pub requirements: f64,
}

pub const DEFAULT_WEIGHTS: ScoringWeights = ScoringWeights {
    eligibility: 0.25,
    sector: 0.20,
    organizational_fit: 0.15,
    historical: 0.15,
    competition: 0.10,
    deadline: 0.10,
    requirements: 0.05,
};

impl ScoringWeights {
    pub fn as_array(&self) -> [f64; 7] {
        [
            self.eligibility,
            self.sector,
            self.organizational_fit,
            self.historical,
            self.competition,
            self.deadline,
            self.requirements,
        ]
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

/// Days of preparation a typical applicant needs per difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreparationWindows {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
    pub expert: u32,
}

impl PreparationWindows {
    pub fn required_days(&self, tier: DifficultyTier) -> u32 {
        match tier {
            DifficultyTier::Easy => self.easy,
            DifficultyTier::Medium => self.medium,
            DifficultyTier::Hard => self.hard,
            DifficultyTier::Expert => self.expert,
        }
    }
}

impl Default for PreparationWindows {
    fn default() -> Self {
        Self {
            easy: 14,
            medium: 30,
            hard: 60,
            expert: 90,
        }
    }
}

/// Tunable constants consumed by the match engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    /// Spreads typical 5-40% success rates across the 0-100 range.
    pub historical_multiplier: f64,
    pub preparation: PreparationWindows,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            historical_multiplier: 2.0,
            preparation: PreparationWindows::default(),
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        if let Some(weight) = self
            .weights
            .as_array()
            .into_iter()
            .find(|weight| !weight.is_finite() || *weight < 0.0)
        {
            return Err(ScoringConfigError::NegativeWeight(weight));
        }

        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ScoringConfigError::WeightSum(sum));
        }

        if !self.historical_multiplier.is_finite() || self.historical_multiplier <= 0.0 {
            return Err(ScoringConfigError::HistoricalMultiplier(
                self.historical_multiplier,
            ));
        }

        let windows = self.preparation;
        if [windows.easy, windows.medium, windows.hard, windows.expert].contains(&0) {
            return Err(ScoringConfigError::ZeroPreparationWindow);
        }

        Ok(())
    }

    /// Parse and validate a JSON override; omitted fields keep their defaults.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ScoringConfigError> {
        let config: ScoringConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("scoring weights must sum to 1.0 (found {0:.6})")]
    WeightSum(f64),
    #[error("scoring weights must be finite and non-negative (found {0})")]
    NegativeWeight(f64),
    #[error("historical multiplier must be a positive finite number (found {0})")]
    HistoricalMultiplier(f64),
    #[error("preparation windows must be at least one day")]
    ZeroPreparationWindow,
    #[error("invalid scoring configuration document: {0}")]
    Parse(#[from] serde_json::Error),
}
