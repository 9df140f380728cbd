use super::{Factor, FactorContext, FactorScore};
use crate::matching::findings::{FindingCode, FindingLog};

const TYPE_POINTS: f64 = 40.0;
const EMPLOYEE_BOUND_POINTS: f64 = 20.0;
const REGION_POINTS: f64 = 20.0;

pub(super) fn score(ctx: &FactorContext<'_>) -> FactorScore {
    let profile = ctx.profile;
    let grant = ctx.grant;
    let mut log = FindingLog::new(Factor::Eligibility);
    let mut points = 0.0;

    let allowed = &grant.organization_types;
    if allowed.is_empty() || allowed.contains(&profile.organization_type) {
        points += TYPE_POINTS;
        log.reasoning(
            FindingCode::OrganizationTypeEligible,
            format!(
                "{} organizations are eligible",
                profile.organization_type.label()
            ),
        );
    } else {
        let accepted = allowed
            .iter()
            .map(|kind| kind.label())
            .collect::<Vec<_>>()
            .join(", ");
        log.risk(
            FindingCode::OrganizationTypeMismatch,
            format!(
                "organization type {} is not eligible (accepted: {accepted})",
                profile.organization_type.label()
            ),
        );
    }

    match grant.min_employees {
        Some(min) if profile.employee_count < min => log.risk(
            FindingCode::BelowMinimumEmployees,
            format!(
                "{} employees is below the required minimum of {min}",
                profile.employee_count
            ),
        ),
        _ => points += EMPLOYEE_BOUND_POINTS,
    }

    match grant.max_employees {
        Some(max) if profile.employee_count > max => log.risk(
            FindingCode::AboveMaximumEmployees,
            format!(
                "{} employees exceeds the permitted maximum of {max}",
                profile.employee_count
            ),
        ),
        _ => points += EMPLOYEE_BOUND_POINTS,
    }

    if grant.regions.is_empty() {
        points += REGION_POINTS;
    } else if grant.regions.contains(&profile.location) {
        points += REGION_POINTS;
        log.reasoning(
            FindingCode::RegionEligible,
            format!("location {} is within the eligible regions", profile.location),
        );
    } else {
        let location = if profile.location.is_empty() {
            "unspecified"
        } else {
            profile.location.as_str()
        };
        log.risk(
            FindingCode::RegionIneligible,
            format!("location {location} is outside the eligible regions"),
        );
    }

    FactorScore::new(Factor::Eligibility, points, log.into_findings())
}
