use std::io;
use std::path::PathBuf;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::{Args, Parser, Subcommand};
use grant_match::config::AppConfig;
use grant_match::error::AppError;
use grant_match::matching::{BatchRanker, MatchEngine, RankingFilter};
use grant_match::telemetry;
use tracing::info;

use crate::catalog::{find_grant, load_catalog, load_profile};
use crate::output::{render_explanation, render_ranking, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "grant-match",
    about = "Score and rank funding opportunities against an organization profile",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank every grant in a catalog for one organization
    Rank(RankArgs),
    /// Show the sub-scores and findings behind one grant's score
    Explain(ExplainArgs),
}

#[derive(Args, Debug, Clone)]
struct InputArgs {
    /// Organization profile (JSON)
    #[arg(long)]
    profile: PathBuf,
    /// Grant catalog (JSON array)
    #[arg(long)]
    catalog: PathBuf,
    /// Evaluation date (YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = parse_date)]
    as_of: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct RankArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Drop grants scoring below this overall score
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    min_score: Option<u8>,
    /// Keep grants whose funding reaches at least this amount
    #[arg(long)]
    min_amount: Option<f64>,
    /// Keep grants whose funding starts at or below this amount
    #[arg(long)]
    max_amount: Option<f64>,
    /// Keep grants due on or after this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    deadline_after: Option<NaiveDate>,
    /// Keep grants due on or before this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    deadline_before: Option<NaiveDate>,
    /// Show at most this many grants
    #[arg(long)]
    limit: Option<usize>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct ExplainArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Identifier of the grant to explain
    #[arg(long)]
    grant: String,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let engine = config.scoring.engine()?;
    info!(environment = ?config.environment, "grant-match starting");

    match cli.command {
        Command::Rank(args) => run_rank(engine, args),
        Command::Explain(args) => run_explain(engine, args),
    }
}

fn run_rank(engine: MatchEngine, args: RankArgs) -> Result<(), AppError> {
    let filter = args.filter();
    let profile = load_profile(&args.input.profile)?;
    let grants = load_catalog(&args.input.catalog)?;
    let now = args.input.evaluation_time();

    let ranked = BatchRanker::new(engine).rank(&profile, &grants, now)?;
    let mut shown = ranked.filter(&filter);
    if let Some(limit) = args.limit {
        shown.truncate(limit);
    }

    info!(
        catalog = ranked.len(),
        shown = shown.len(),
        "rendering ranking"
    );
    render_ranking(&shown, args.format, io::stdout().lock())
}

fn run_explain(engine: MatchEngine, args: ExplainArgs) -> Result<(), AppError> {
    let profile = load_profile(&args.input.profile)?;
    let grants = load_catalog(&args.input.catalog)?;
    let grant = find_grant(&grants, &args.grant)?;

    let score = engine.score_at(&profile, grant, args.input.evaluation_time())?;
    render_explanation(grant, &score, io::stdout().lock())?;
    Ok(())
}

impl InputArgs {
    fn evaluation_time(&self) -> DateTime<Utc> {
        self.as_of.map(start_of_day).unwrap_or_else(Utc::now)
    }
}

impl RankArgs {
    fn filter(&self) -> RankingFilter {
        RankingFilter {
            min_score: self.min_score,
            min_amount: self.min_amount,
            max_amount: self.max_amount,
            deadline_after: self.deadline_after.map(start_of_day),
            deadline_before: self.deadline_before.map(end_of_day),
        }
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

// Last second of the day, so a date bound keeps grants due later that day.
fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date) + Duration::days(1) - Duration::seconds(1)
}
