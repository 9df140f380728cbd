use std::io::{self, Write};

use clap::ValueEnum;
use grant_match::error::AppError;
use grant_match::matching::{Factor, Grant, MatchScore, RankedMatches};

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

pub(crate) fn render_ranking<W: Write>(
    ranked: &RankedMatches,
    format: OutputFormat,
    mut out: W,
) -> Result<(), AppError> {
    match format {
        OutputFormat::Table => render_table(ranked, &mut out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, ranked.entries())?;
            writeln!(out)?;
        }
        OutputFormat::Csv => ranked.write_csv(out)?,
    }
    Ok(())
}

fn render_table<W: Write>(ranked: &RankedMatches, out: &mut W) -> io::Result<()> {
    if ranked.is_empty() {
        writeln!(out, "No grants matched the given filters.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<5} {:>5} {:<10} {:>5}  {:<10}  {}",
        "rank", "score", "tier", "conf", "deadline", "grant"
    )?;
    for (index, entry) in ranked.iter().enumerate() {
        let score = &entry.score;
        writeln!(
            out,
            "{:<5} {:>5} {:<10} {:>4}%  {:<10}  {} ({})",
            index + 1,
            score.overall,
            score.tier.label(),
            score.confidence,
            entry.deadline.format("%Y-%m-%d"),
            entry.title,
            score.grant_id
        )?;
    }
    Ok(())
}

pub(crate) fn render_explanation<W: Write>(
    grant: &Grant,
    score: &MatchScore,
    mut out: W,
) -> io::Result<()> {
    let title = if grant.title.is_empty() {
        grant.id.0.as_str()
    } else {
        grant.title.as_str()
    };
    writeln!(out, "{} ({})", title, grant.id)?;
    writeln!(out, "{}", score.summary())?;

    writeln!(out, "\nSub-scores:")?;
    for factor in Factor::ALL {
        writeln!(out, "  - {:<26}{:>3}", factor.label(), score.sub_scores.get(factor))?;
    }

    write_section(&mut out, "Reasoning", &score.reasoning())?;
    write_section(&mut out, "Recommendations", &score.recommendations())?;
    write_section(&mut out, "Risk factors", &score.risk_factors())?;
    Ok(())
}

fn write_section<W: Write>(out: &mut W, heading: &str, lines: &[&str]) -> io::Result<()> {
    if lines.is_empty() {
        return Ok(());
    }
    writeln!(out, "\n{heading}:")?;
    for line in lines {
        writeln!(out, "  - {line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use grant_match::matching::{BatchRanker, MatchEngine, OrganizationProfile};

    fn catalog() -> Vec<Grant> {
        serde_json::from_str(
            r#"[
                {
                    "id": "digital-vouchers",
                    "title": "Digital Vouchers",
                    "funding": { "min": 1000, "max": 20000 },
                    "deadline": "2026-04-30T00:00:00Z",
                    "sectors": ["software"],
                    "statistics": { "successRate": 40, "typicalApplicants": 25 }
                },
                {
                    "id": "heritage-restoration",
                    "funding": { "min": 10000, "max": 900000 },
                    "deadline": "2026-03-05T00:00:00Z",
                    "eligibility": { "organizationTypes": ["nonprofit"] },
                    "sectors": ["heritage"],
                    "requiredCapabilities": { "conservationPlan": true },
                    "statistics": { "successRate": 5, "typicalApplicants": 300 }
                }
            ]"#,
        )
        .expect("catalog fixture parses")
    }

    fn profile() -> OrganizationProfile {
        serde_json::from_str(
            r#"{
                "organizationType": "private",
                "employeeCount": 8,
                "annualRevenue": 600000,
                "sectors": ["software"],
                "location": "lisbon"
            }"#,
        )
        .expect("profile fixture parses")
    }

    fn ranked() -> RankedMatches {
        let now = Utc
            .with_ymd_and_hms(2026, 3, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp");
        BatchRanker::default()
            .rank(&profile(), &catalog(), now)
            .expect("catalog ranks")
    }

    fn render(format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        render_ranking(&ranked(), format, &mut buffer).expect("render succeeds");
        String::from_utf8(buffer).expect("utf-8 output")
    }

    #[test]
    fn table_lists_grants_best_first() {
        let table = render(OutputFormat::Table);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("rank"));
        assert!(lines[1].contains("Digital Vouchers (digital-vouchers)"));
        assert!(lines[2].contains("heritage-restoration"));
    }

    #[test]
    fn empty_ranking_prints_notice() {
        let mut buffer = Vec::new();
        render_ranking(&RankedMatches::default(), OutputFormat::Table, &mut buffer)
            .expect("render succeeds");
        assert_eq!(
            String::from_utf8(buffer).expect("utf-8 output").trim(),
            "No grants matched the given filters."
        );
    }

    #[test]
    fn json_output_is_an_array_of_entries() {
        let value: serde_json::Value =
            serde_json::from_str(&render(OutputFormat::Json)).expect("valid json");
        let entries = value.as_array().expect("array output");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["score"]["grant_id"], "digital-vouchers");
    }

    #[test]
    fn csv_output_has_header_and_rows() {
        let csv = render(OutputFormat::Csv);
        let mut lines = csv.lines();
        assert!(lines
            .next()
            .expect("header row")
            .starts_with("rank,grant_id,title,overall"));
        assert_eq!(lines.count(), 2);
    }

    #[test]
    fn explanation_groups_findings_by_kind() {
        let grants = catalog();
        let grant = &grants[1];
        let now = Utc
            .with_ymd_and_hms(2026, 3, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp");
        let score = MatchEngine::default()
            .score_at(&profile(), grant, now)
            .expect("grant scores");

        let mut buffer = Vec::new();
        render_explanation(grant, &score, &mut buffer).expect("render succeeds");
        let text = String::from_utf8(buffer).expect("utf-8 output");

        assert!(text.starts_with("heritage-restoration (heritage-restoration)"));
        assert!(text.contains("Sub-scores:"));
        assert!(text.contains("requirements fulfillment"));
        let recommendations = text
            .split("Recommendations:")
            .nth(1)
            .expect("recommendations section");
        assert!(recommendations.contains("  - prepare the missing capabilities: conservationPlan"));
        assert!(text.contains("Risk factors:"));
    }
}
