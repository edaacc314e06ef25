//! securecheck: command-line front end for the SecureCheck dashboard.
//!
//! Usage:
//!   securecheck --db stops.db generate --seed 42 --count 1000
//!   securecheck --db stops.db metrics
//!   securecheck --db stops.db insight night-stop-arrests
//!   securecheck --db stops.db predict --date 2020-01-15 --time 14:30 \
//!       --country USA --gender M --race White --duration "0-15 Min" --vehicle AB12CD3456

mod cli;
mod render;

use anyhow::Result;
use clap::Parser;
use securecheck_core::{
    catalog::{InsightOutcome, InsightQuery},
    config::DashboardConfig,
    dashboard::Dashboard,
    loader::StopLoader,
    predictor::PredictionRequest,
    synth::StopGenerator,
};

use crate::cli::{Cli, Commands, GenerateArgs, InsightsArgs, OverviewArgs, PredictArgs};
use crate::render::Output;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run() {
        log::error!("command failed: {err}");
        for cause in err.chain().skip(1) {
            log::error!("caused by: {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(db) = &cli.db {
        config.database_path = db.clone();
    }

    let dashboard = Dashboard::new(config);
    serve(&dashboard, cli.command, &Output::new(cli.json))
}

fn serve(dashboard: &Dashboard, command: Commands, out: &Output) -> Result<()> {
    match command {
        Commands::Overview(OverviewArgs { limit, all }) => {
            let limit = if all { Some(usize::MAX) } else { limit };
            let table = dashboard.overview(limit);
            if table.is_empty() {
                out.notice("No police logs available")
            } else {
                out.table(&table)
            }
        }
        Commands::Metrics => out.metrics(&dashboard.metrics()),
        Commands::Charts => out.charts(&dashboard.charts()),
        Commands::Insights(InsightsArgs { tier }) => {
            let queries: Vec<InsightQuery> = match tier {
                Some(t) => InsightQuery::of_tier(t.into()).collect(),
                None => InsightQuery::ALL.to_vec(),
            };
            out.catalog(&queries)
        }
        Commands::Insight(args) => match dashboard.run_insight_label(&args.query)? {
            InsightOutcome::Rows(table) => out.table(&table),
            InsightOutcome::NoResult => out.notice("No result for the selected query"),
        },
        Commands::Durations => out.lines(&dashboard.stop_duration_options()),
        Commands::Predict(args) => {
            let report = dashboard.predict(&prediction_request(args))?;
            out.prediction(&report)
        }
        Commands::Generate(args) => generate(dashboard.config(), args, out),
    }
}

fn prediction_request(args: PredictArgs) -> PredictionRequest {
    PredictionRequest {
        stop_date: args.date,
        stop_time: args.time,
        country_name: args.country,
        driver_gender: args.gender,
        driver_age: args.age,
        driver_race: args.race,
        search_conducted: args.searched,
        search_type: args.search_type,
        drugs_related_stop: args.drugs,
        stop_duration: args.duration,
        vehicle_number: args.vehicle,
    }
}

fn generate(config: &DashboardConfig, args: GenerateArgs, out: &Output) -> Result<()> {
    let mut loader = StopLoader::open(&config.database_path)?;
    loader.migrate()?;
    if args.replace {
        loader.clear()?;
    }

    let stops = StopGenerator::new(args.seed, config.predictor).generate(args.count);
    loader.insert_stops(&stops)?;
    let total = loader.stop_count()?;

    out.notice(&format!(
        "loaded {} synthetic stops (seed {}) into {}; table now holds {total}",
        stops.len(),
        args.seed,
        config.database_path
    ))
}
