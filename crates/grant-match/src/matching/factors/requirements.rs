use super::{Factor, FactorContext, FactorScore};
use crate::matching::findings::{FindingCode, FindingLog};

pub(super) fn score(ctx: &FactorContext<'_>) -> FactorScore {
    let required = &ctx.grant.required_capabilities;
    let capabilities = &ctx.profile.capabilities;
    let mut log = FindingLog::new(Factor::RequirementsFulfillment);

    if required.is_empty() {
        log.reasoning(
            FindingCode::RequirementsMet,
            "grant declares no mandatory capabilities",
        );
        return FactorScore::new(Factor::RequirementsFulfillment, 100.0, log.into_findings());
    }

    let unmet: Vec<&str> = required
        .iter()
        .filter(|name| !capabilities.get(name.as_str()).copied().unwrap_or(false))
        .map(String::as_str)
        .collect();
    let met = required.len() - unmet.len();

    if unmet.is_empty() {
        log.reasoning(
            FindingCode::RequirementsMet,
            format!("all {} required capabilities are in place", required.len()),
        );
    } else {
        log.recommend(
            FindingCode::UnmetRequirements,
            format!("prepare the missing capabilities: {}", unmet.join(", ")),
        );
    }

    let points = 100.0 * met as f64 / required.len() as f64;
    FactorScore::new(Factor::RequirementsFulfillment, points, log.into_findings())
}
