//! The dashboard: one method per user interaction.
//!
//! RULES:
//!   - Every interaction fetches a fresh snapshot. Nothing is cached.
//!   - A failed connection never surfaces as an error here: it degrades
//!     to an empty table, zero metrics or the fallback prediction.
//!   - Only form validation can fail, and it fails before any lookup.

use crate::{
    catalog::{InsightOutcome, InsightQuery},
    charts::ChartData,
    config::DashboardConfig,
    error::CheckResult,
    metrics::StopMetrics,
    predictor::{summary, ExactMatchPredictor, Prediction, PredictionRequest},
    stop::TrafficStop,
    store::StopStore,
    table::Table,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionReport {
    pub prediction: Prediction,
    pub summary: String,
}

pub struct Dashboard {
    config: DashboardConfig,
    store: StopStore,
    predictor: ExactMatchPredictor,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            store: StopStore::new(config.database_path.clone()),
            predictor: ExactMatchPredictor::new(config.predictor),
            config,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// The raw log. `limit` defaults to the configured preview size;
    /// pass `Some(usize::MAX)` for everything.
    pub fn overview(&self, limit: Option<usize>) -> Table {
        let table = self.store.snapshot_table();
        table.head(limit.unwrap_or(self.config.table_preview_limit))
    }

    pub fn metrics(&self) -> StopMetrics {
        StopMetrics::compute(&self.store.snapshot())
    }

    pub fn charts(&self) -> ChartData {
        ChartData::compute(&self.store.snapshot())
    }

    pub fn run_insight(&self, query: InsightQuery) -> InsightOutcome {
        info!("running insight '{}'", query.key());
        let outcome = InsightOutcome::from_table(self.store.fetch(query.sql()));
        if outcome == InsightOutcome::NoResult {
            warn!("no result for insight '{}'", query.key());
        }
        outcome
    }

    /// Run the insight whose label (or key) is `label`.
    pub fn run_insight_label(&self, label: &str) -> CheckResult<InsightOutcome> {
        let query = InsightQuery::from_label(label)?;
        Ok(self.run_insight(query))
    }

    /// Distinct recorded stop durations, in order of first appearance.
    pub fn stop_duration_options(&self) -> Vec<String> {
        duration_options(&self.store.snapshot())
    }

    /// Validate the form, then look up the matching stops.
    pub fn predict(&self, request: &PredictionRequest) -> CheckResult<PredictionReport> {
        let stops = self.store.snapshot();
        request.validate(self.predictor.profile(), &duration_options(&stops))?;

        let prediction = self.predictor.predict(&stops, request);
        let summary = summary(self.predictor.profile(), request, &prediction);
        Ok(PredictionReport {
            prediction,
            summary,
        })
    }
}

fn duration_options(stops: &[TrafficStop]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for d in stops.iter().filter_map(|s| s.stop_duration.as_ref()) {
        if !seen.contains(d) {
            seen.push(d.clone());
        }
    }
    seen
}
