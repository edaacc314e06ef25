use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand, ValueEnum};
use securecheck_core::catalog::InsightTier;

#[derive(Parser, Debug)]
#[command(
    name = "securecheck",
    version,
    about = "SecureCheck: police check-post digital ledger"
)]
pub struct Cli {
    /// Dashboard config (JSON). Defaults apply when omitted.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Database path, overriding the config.
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Print JSON instead of text.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Police logs overview.
    Overview(OverviewArgs),
    /// Headline counts.
    Metrics,
    /// Chart series: by violation, by country, by gender.
    Charts,
    /// List the insight queries.
    Insights(InsightsArgs),
    /// Run one insight query by label or key.
    Insight(InsightArgs),
    /// Recorded stop durations accepted by the prediction form.
    Durations,
    /// Predict violation and outcome from matching historical stops.
    Predict(PredictArgs),
    /// Create the schema and load synthetic stops.
    Generate(GenerateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct OverviewArgs {
    #[arg(long)]
    pub limit: Option<usize>,

    #[arg(long, default_value_t = false, conflicts_with = "limit")]
    pub all: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum TierArg {
    Basic,
    Advanced,
}

impl From<TierArg> for InsightTier {
    fn from(value: TierArg) -> Self {
        match value {
            TierArg::Basic => InsightTier::Basic,
            TierArg::Advanced => InsightTier::Advanced,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct InsightsArgs {
    #[arg(long, value_enum)]
    pub tier: Option<TierArg>,
}

#[derive(Args, Debug, Clone)]
pub struct InsightArgs {
    /// Menu label or short key (see `insights`).
    pub query: String,
}

#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    #[arg(long, value_parser = parse_date)]
    pub date: NaiveDate,

    #[arg(long, value_parser = parse_time)]
    pub time: NaiveTime,

    #[arg(long)]
    pub country: String,

    #[arg(long)]
    pub gender: String,

    #[arg(long, default_value_t = 27)]
    pub age: i64,

    #[arg(long)]
    pub race: String,

    #[arg(long, default_value_t = false)]
    pub searched: bool,

    #[arg(long, default_value = "")]
    pub search_type: String,

    #[arg(long, default_value_t = false)]
    pub drugs: bool,

    #[arg(long)]
    pub duration: String,

    #[arg(long, default_value = "")]
    pub vehicle: String,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[arg(long, default_value_t = 1000)]
    pub count: usize,

    /// Delete existing stops first.
    #[arg(long, default_value_t = false)]
    pub replace: bool,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|e| format!("expected HH:MM or HH:MM:SS: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_predict_flags() {
        let cli = Cli::try_parse_from([
            "securecheck",
            "--db",
            "stops.db",
            "predict",
            "--date",
            "2020-01-15",
            "--time",
            "14:30",
            "--country",
            "USA",
            "--gender",
            "M",
            "--race",
            "White",
            "--searched",
            "--duration",
            "0-15 Min",
            "--vehicle",
            "AB12CD3456",
        ])
        .unwrap();

        assert_eq!(cli.db.as_deref(), Some("stops.db"));
        match cli.command {
            Commands::Predict(args) => {
                assert_eq!(args.time, NaiveTime::from_hms_opt(14, 30, 0).unwrap());
                assert!(args.searched);
                assert!(!args.drugs);
                assert_eq!(args.age, 27);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn overview_limit_and_all_conflict() {
        assert!(Cli::try_parse_from(["securecheck", "overview", "--limit", "3", "--all"]).is_err());
    }
}
