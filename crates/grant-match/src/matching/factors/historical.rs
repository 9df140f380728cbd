use super::{Factor, FactorContext, FactorScore};
use crate::matching::findings::{FindingCode, FindingLog};

pub(super) fn score(ctx: &FactorContext<'_>) -> FactorScore {
    let rate = ctx.grant.success_rate;
    let mut log = FindingLog::new(Factor::HistoricalSuccess);

    if rate > 30.0 {
        log.reasoning(
            FindingCode::HighSuccessRate,
            format!("high historical success rate ({rate:.0}%)"),
        );
    } else if rate >= 15.0 {
        log.reasoning(
            FindingCode::ModerateSuccessRate,
            format!("moderate historical success rate ({rate:.0}%)"),
        );
    } else {
        log.risk(
            FindingCode::LowHistoricalSuccess,
            format!("low historical success rate ({rate:.0}%)"),
        );
    }

    let points = (rate * ctx.config.historical_multiplier).min(100.0);
    FactorScore::new(Factor::HistoricalSuccess, points, log.into_findings())
}

#[cfg(test)]
mod tests {
    use super::super::testing::{grant, profile, run};
    use super::*;

    fn with_rate(rate: f64) -> FactorScore {
        let mut grant = grant();
        grant.success_rate = rate;
        run(&profile(), &grant, score)
    }

    #[test]
    fn doubles_raw_rate_up_to_cap() {
        assert_eq!(with_rate(30.0).score, 60);
        assert_eq!(with_rate(12.5).score, 25);
        assert_eq!(with_rate(75.0).score, 100);
    }

    #[test]
    fn tiers_follow_raw_rate() {
        assert_eq!(with_rate(31.0).findings[0].code(), FindingCode::HighSuccessRate);
        assert_eq!(with_rate(30.0).findings[0].code(), FindingCode::ModerateSuccessRate);
        assert_eq!(with_rate(15.0).findings[0].code(), FindingCode::ModerateSuccessRate);

        let low = with_rate(14.9);
        assert!(low.findings[0].is_risk());
        assert_eq!(low.findings[0].code(), FindingCode::LowHistoricalSuccess);
    }
}
