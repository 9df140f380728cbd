use super::{Factor, FactorContext, FactorScore};
use crate::matching::findings::{FindingCode, FindingLog};

pub(super) fn score(ctx: &FactorContext<'_>) -> FactorScore {
    let grant = ctx.grant;
    let mut log = FindingLog::new(Factor::DeadlineViability);

    let days = (grant.deadline - ctx.now).num_seconds().div_euclid(86_400);
    let required = ctx.config.preparation.required_days(grant.difficulty);
    let required_f = f64::from(required);
    let days_f = days as f64;
    let tier = grant.difficulty.label();

    let points = if days_f >= 1.5 * required_f {
        log.reasoning(
            FindingCode::AmplePreparationTime,
            format!("{days} days remain, ample for a {tier} application ({required} days typical)"),
        );
        100.0
    } else if days_f >= required_f {
        log.reasoning(
            FindingCode::AdequatePreparationTime,
            format!("{days} days remain, enough for a {tier} application ({required} days typical)"),
        );
        70.0
    } else if days_f >= 0.7 * required_f {
        log.recommend(
            FindingCode::CompressedPreparation,
            format!("only {days} days remain; prioritize the essential application components"),
        );
        40.0
    } else if days < 0 {
        log.risk(
            FindingCode::DeadlinePassed,
            format!("deadline passed {} day(s) ago", -days),
        );
        10.0
    } else {
        log.risk(
            FindingCode::TightDeadline,
            format!("tight deadline: {days} days remain against {required} days typically needed"),
        );
        10.0
    };

    FactorScore::new(Factor::DeadlineViability, points, log.into_findings())
}
