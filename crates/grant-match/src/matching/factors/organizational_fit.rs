use super::{Factor, FactorContext, FactorScore};
use crate::matching::domain::InnovationLevel;
use crate::matching::findings::{FindingCode, FindingLog};

pub(super) fn score(ctx: &FactorContext<'_>) -> FactorScore {
    let profile = ctx.profile;
    let grant = ctx.grant;
    let mut log = FindingLog::new(Factor::OrganizationalFit);
    let mut points = 0.0;

    let amount = grant.max_amount;
    let revenue = profile.annual_revenue;
    if amount <= revenue * 0.5 {
        points += 40.0;
        log.reasoning(
            FindingCode::FundingWellSuited,
            "grant size is well-suited to the organization's revenue",
        );
    } else if amount <= revenue * 1.5 {
        points += 25.0;
        log.recommend(
            FindingCode::FundingOperationalImpact,
            "note the operational impact of a grant this size relative to annual revenue",
        );
    } else {
        points += 10.0;
        log.risk(
            FindingCode::DisproportionateFunding,
            format!("grant amount {amount:.0} is disproportionately large for annual revenue {revenue:.0}"),
        );
    }

    match profile.previous_grants {
        0 => {
            points += 10.0;
            log.recommend(
                FindingCode::FirstApplication,
                "no prior awards on record; consider seeking application support",
            );
        }
        count @ 1..=5 => {
            points += 20.0;
            log.reasoning(
                FindingCode::StrongTrackRecord,
                format!("{count} previously awarded grant(s)"),
            );
        }
        count => {
            points += 30.0;
            log.reasoning(
                FindingCode::StrongTrackRecord,
                format!("strong track record with {count} previously awarded grants"),
            );
        }
    }

    if grant.requires_innovation {
        match profile.innovation_capability {
            InnovationLevel::High => {
                points += 30.0;
                log.reasoning(
                    FindingCode::InnovationAligned,
                    "high innovation capability matches the grant's innovation focus",
                );
            }
            InnovationLevel::Medium => {
                points += 15.0;
                log.recommend(
                    FindingCode::InnovationNarrative,
                    "foreground the innovation narrative in the application",
                );
            }
            InnovationLevel::Low => {
                log.risk(
                    FindingCode::InnovationGap,
                    "grant expects innovation that the organization's capability does not yet show",
                );
            }
        }
    }

    FactorScore::new(Factor::OrganizationalFit, points, log.into_findings())
}
