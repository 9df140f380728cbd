use std::collections::BTreeSet;

use super::{Factor, FactorContext, FactorScore};
use crate::matching::findings::{FindingCode, FindingLog};

const ADJACENT_SECTOR_SCORE: f64 = 60.0;

pub(super) fn score(ctx: &FactorContext<'_>) -> FactorScore {
    let profile_sectors = &ctx.profile.sectors;
    let grant_sectors = &ctx.grant.sectors;
    let mut log = FindingLog::new(Factor::SectorRelevance);

    if grant_sectors.is_empty() {
        log.reasoning(
            FindingCode::OpenSectorCall,
            "grant is open to every sector",
        );
        return FactorScore::new(Factor::SectorRelevance, 100.0, log.into_findings());
    }

    let matched: Vec<&str> = profile_sectors
        .intersection(grant_sectors)
        .map(String::as_str)
        .collect();

    let mut points = 0.0;
    if !matched.is_empty() {
        points = 100.0 * matched.len() as f64 / grant_sectors.len() as f64;
        log.reasoning(
            FindingCode::SectorMatch,
            format!("matching sectors: {}", matched.join(", ")),
        );
    }

    // Adjacency acts as a floor so that gaining a direct match never costs points.
    // Only sectors without a direct match may lift the score to the adjacency floor.
    if points < ADJACENT_SECTOR_SCORE {
        let unmatched: BTreeSet<String> =
            profile_sectors.difference(grant_sectors).cloned().collect();
        let adjacent = ctx.sectors.adjacent_pairs(&unmatched, grant_sectors);
        if !adjacent.is_empty() {
            let pairs = adjacent
                .iter()
                .map(|(profile, grant)| format!("{profile} ~ {grant}"))
                .collect::<Vec<_>>()
                .join(", ");
            log.reasoning(
                FindingCode::AdjacentSector,
                format!("potential relevance through related sectors: {pairs}"),
            );
            points = ADJACENT_SECTOR_SCORE;
        }
    }

    if points > 0.0 {
        return FactorScore::new(Factor::SectorRelevance, points, log.into_findings());
    }

    let required = grant_sectors
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    log.risk(
        FindingCode::NoSectorAlignment,
        format!("no alignment with the targeted sectors ({required})"),
    );
    FactorScore::new(Factor::SectorRelevance, 0.0, log.into_findings())
}
