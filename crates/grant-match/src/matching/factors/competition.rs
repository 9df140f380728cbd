use super::{Factor, FactorContext, FactorScore};
use crate::matching::findings::{FindingCode, FindingLog};

pub(super) fn score(ctx: &FactorContext<'_>) -> FactorScore {
    let applicants = ctx.grant.typical_applicants;
    let mut log = FindingLog::new(Factor::Competition);

    let points = if applicants < 50 {
        log.reasoning(
            FindingCode::LowCompetition,
            format!("lower competition (about {applicants} applicants per round)"),
        );
        80.0
    } else if applicants < 200 {
        log.reasoning(
            FindingCode::ModerateCompetition,
            format!("moderate competition (about {applicants} applicants per round)"),
        );
        60.0
    } else {
        log.risk(
            FindingCode::HighCompetition,
            format!("high competition expected with about {applicants} applicants"),
        );
        30.0
    };

    FactorScore::new(Factor::Competition, points, log.into_findings())
}

#[cfg(test)]
mod tests {
    use super::super::testing::{grant, profile, run};
    use super::*;

    fn with_applicants(applicants: u32) -> FactorScore {
        let mut grant = grant();
        grant.typical_applicants = applicants;
        run(&profile(), &grant, score)
    }

    #[test]
    fn applicant_count_selects_tier() {
        assert_eq!(with_applicants(0).score, 80);
        assert_eq!(with_applicants(49).score, 80);
        assert_eq!(with_applicants(50).score, 60);
        assert_eq!(with_applicants(199).score, 60);
        assert_eq!(with_applicants(200).score, 30);
    }

    #[test]
    fn crowded_calls_name_the_applicant_count() {
        let result = with_applicants(850);
        assert!(result.findings[0].is_risk());
        assert!(result.findings[0].message().contains("850"));
    }
}
