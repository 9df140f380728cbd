use super::domain::{Grant, GrantId, OrganizationProfile};

/// Type-contract violations rejected before normalization.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("annual revenue must be a non-negative finite amount (found {found})")]
    InvalidRevenue { found: f64 },
    #[error("grant {grant}: funding bounds must be non-negative finite amounts (min {min}, max {max})")]
    InvalidFundingBounds { grant: GrantId, min: f64, max: f64 },
    #[error("grant {grant}: maximum funding {max} is below minimum {min}")]
    InvertedFundingRange { grant: GrantId, min: f64, max: f64 },
    #[error("grant {grant}: maximum employees {max} is below minimum {min}")]
    InvertedEmployeeBounds { grant: GrantId, min: u32, max: u32 },
    #[error("grant {grant}: success rate must lie within 0-100 (found {found})")]
    InvalidSuccessRate { grant: GrantId, found: f64 },
}

pub fn validate_profile(profile: &OrganizationProfile) -> Result<(), ValidationError> {
    if let Some(revenue) = profile.annual_revenue {
        if !revenue.is_finite() || revenue < 0.0 {
            return Err(ValidationError::InvalidRevenue { found: revenue });
        }
    }

    Ok(())
}

pub fn validate_grant(grant: &Grant) -> Result<(), ValidationError> {
    let funding = &grant.funding;
    let bounds_valid = [funding.min, funding.max]
        .iter()
        .all(|amount| amount.is_finite() && *amount >= 0.0);
    if !bounds_valid {
        return Err(ValidationError::InvalidFundingBounds {
            grant: grant.id.clone(),
            min: funding.min,
            max: funding.max,
        });
    }

    if funding.max < funding.min {
        return Err(ValidationError::InvertedFundingRange {
            grant: grant.id.clone(),
            min: funding.min,
            max: funding.max,
        });
    }

    if let (Some(min), Some(max)) = (
        grant.eligibility.min_employees,
        grant.eligibility.max_employees,
    ) {
        if max < min {
            return Err(ValidationError::InvertedEmployeeBounds {
                grant: grant.id.clone(),
                min,
                max,
            });
        }
    }

    if let Some(rate) = grant.statistics.success_rate {
        if !rate.is_finite() || !(0.0..=100.0).contains(&rate) {
            return Err(ValidationError::InvalidSuccessRate {
                grant: grant.id.clone(),
                found: rate,
            });
        }
    }

    Ok(())
}
