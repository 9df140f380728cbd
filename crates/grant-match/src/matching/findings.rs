use serde::{Deserialize, Serialize};

use super::factors::Factor;

/// Machine-readable explanation codes so callers can localize or filter findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCode {
    OrganizationTypeEligible,
    OrganizationTypeMismatch,
    BelowMinimumEmployees,
    AboveMaximumEmployees,
    RegionEligible,
    RegionIneligible,
    OpenSectorCall,
    SectorMatch,
    AdjacentSector,
    NoSectorAlignment,
    FundingWellSuited,
    FundingOperationalImpact,
    DisproportionateFunding,
    StrongTrackRecord,
    FirstApplication,
    InnovationAligned,
    InnovationNarrative,
    InnovationGap,
    HighSuccessRate,
    ModerateSuccessRate,
    LowHistoricalSuccess,
    LowCompetition,
    ModerateCompetition,
    HighCompetition,
    AmplePreparationTime,
    AdequatePreparationTime,
    CompressedPreparation,
    TightDeadline,
    DeadlinePassed,
    RequirementsMet,
    UnmetRequirements,
}

/// Context shared by every finding variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingDetail {
    pub factor: Factor,
    pub code: FindingCode,
    pub message: String,
}

/// Explanation emitted by a factor calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    Reasoning(FindingDetail),
    Recommendation(FindingDetail),
    Risk(FindingDetail),
}

impl Finding {
    pub fn detail(&self) -> &FindingDetail {
        match self {
            Finding::Reasoning(detail)
            | Finding::Recommendation(detail)
            | Finding::Risk(detail) => detail,
        }
    }

    pub fn message(&self) -> &str {
        &self.detail().message
    }

    pub fn code(&self) -> FindingCode {
        self.detail().code
    }

    pub fn factor(&self) -> Factor {
        self.detail().factor
    }

    pub fn is_risk(&self) -> bool {
        matches!(self, Finding::Risk(_))
    }
}

/// Per-factor accumulator that stamps each finding with its originating factor.
#[derive(Debug)]
pub(crate) struct FindingLog {
    factor: Factor,
    findings: Vec<Finding>,
}

impl FindingLog {
    pub(crate) fn new(factor: Factor) -> Self {
        Self {
            factor,
            findings: Vec::new(),
        }
    }

    fn detail(&self, code: FindingCode, message: String) -> FindingDetail {
        FindingDetail {
            factor: self.factor,
            code,
            message,
        }
    }

    pub(crate) fn reasoning(&mut self, code: FindingCode, message: impl Into<String>) {
        let detail = self.detail(code, message.into());
        self.findings.push(Finding::Reasoning(detail));
    }

    pub(crate) fn recommend(&mut self, code: FindingCode, message: impl Into<String>) {
        let detail = self.detail(code, message.into());
        self.findings.push(Finding::Recommendation(detail));
    }

    pub(crate) fn risk(&mut self, code: FindingCode, message: impl Into<String>) {
        let detail = self.detail(code, message.into());
        self.findings.push(Finding::Risk(detail));
    }

    pub(crate) fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}
