use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use securecheck_core::{
    catalog::{InsightQuery, InsightTier},
    charts::{ChartData, ChartPoint},
    dashboard::PredictionReport,
    metrics::StopMetrics,
    table::Table,
};

pub struct Output {
    json: bool,
}

#[derive(Serialize)]
struct CatalogEntry {
    key: &'static str,
    label: &'static str,
    tier: InsightTier,
    columns: &'static [&'static str],
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    fn write_json<T: Serialize>(&self, value: &T) -> Result<()> {
        let mut output = io::BufWriter::new(io::stdout().lock());
        serde_json::to_writer_pretty(&mut output, value).context("failed to serialize json output")?;
        writeln!(output)?;
        output.flush()?;
        Ok(())
    }

    pub fn notice(&self, message: &str) -> Result<()> {
        if self.json {
            return self.write_json(&serde_json::json!({ "notice": message }));
        }
        println!("{message}");
        Ok(())
    }

    pub fn lines(&self, items: &[String]) -> Result<()> {
        if self.json {
            return self.write_json(&items);
        }
        let mut output = io::BufWriter::new(io::stdout().lock());
        for item in items {
            writeln!(output, "{item}")?;
        }
        output.flush()?;
        Ok(())
    }

    pub fn table(&self, table: &Table) -> Result<()> {
        if self.json {
            return self.write_json(&table.to_records());
        }

        let mut output = io::BufWriter::new(io::stdout().lock());
        writeln!(output, "{}", table.columns.join("\t"))?;
        for row in &table.rows {
            let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
            writeln!(output, "{}", cells.join("\t"))?;
        }
        writeln!(output, "({} rows)", table.row_count())?;
        output.flush()?;
        Ok(())
    }

    pub fn metrics(&self, metrics: &StopMetrics) -> Result<()> {
        if self.json {
            return self.write_json(metrics);
        }
        println!("=== KEY METRICS ===");
        println!("  Total Police Stops:       {}", metrics.total_stops);
        println!("  Total Arrests:            {}", metrics.arrests);
        println!("  Total Warnings:           {}", metrics.warnings);
        println!("  Total Drug Related Stops: {}", metrics.drug_related);
        Ok(())
    }

    pub fn charts(&self, charts: &ChartData) -> Result<()> {
        if self.json {
            return self.write_json(charts);
        }
        let mut output = io::BufWriter::new(io::stdout().lock());
        write_series(&mut output, "Stops by Violation", "Violation", &charts.stops_by_violation)?;
        write_series(
            &mut output,
            "Violation counts by country",
            "Country",
            &charts.violations_by_country,
        )?;
        write_series(
            &mut output,
            "Driver Gender Distribution",
            "Gender",
            &charts.gender_distribution,
        )?;
        output.flush()?;
        Ok(())
    }

    pub fn catalog(&self, queries: &[InsightQuery]) -> Result<()> {
        if self.json {
            let entries: Vec<CatalogEntry> = queries
                .iter()
                .map(|q| CatalogEntry {
                    key: q.key(),
                    label: q.label(),
                    tier: q.tier(),
                    columns: q.columns(),
                })
                .collect();
            return self.write_json(&entries);
        }

        let mut output = io::BufWriter::new(io::stdout().lock());
        for tier in [InsightTier::Basic, InsightTier::Advanced] {
            let in_tier: Vec<&InsightQuery> = queries.iter().filter(|q| q.tier() == tier).collect();
            if in_tier.is_empty() {
                continue;
            }
            let heading = match tier {
                InsightTier::Basic => "Basic Insights",
                InsightTier::Advanced => "Advanced Insights",
            };
            writeln!(output, "{heading}")?;
            for (n, q) in in_tier.iter().enumerate() {
                writeln!(output, "  {}. {}  [{}]", n + 1, q.label(), q.key())?;
            }
        }
        output.flush()?;
        Ok(())
    }

    pub fn prediction(&self, report: &PredictionReport) -> Result<()> {
        if self.json {
            return self.write_json(report);
        }
        println!("=== PREDICTION SUMMARY ===");
        println!("{}", report.summary);
        Ok(())
    }
}

fn write_series(out: &mut impl Write, title: &str, label: &str, points: &[ChartPoint]) -> Result<()> {
    writeln!(out, "=== {title} ===")?;
    if points.is_empty() {
        writeln!(out, "  No data available for {title}")?;
        return Ok(());
    }
    writeln!(out, "  {label}\tCount")?;
    for p in points {
        writeln!(out, "  {}\t{}", p.label, p.count)?;
    }
    Ok(())
}
