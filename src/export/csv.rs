//! CSV Export functionality
//!
//! Exports a report's yearly breakdown, one row per projected year.

use serde::Serialize;
use std::io::Write;

use crate::error::{AdvisorError, AdvisorResult};
use crate::reports::CostReport;

#[derive(Serialize)]
struct YearRow<'a> {
    #[serde(rename = "Home")]
    home: &'a str,
    #[serde(rename = "Scenario")]
    scenario: String,
    #[serde(rename = "Year")]
    year: u32,
    #[serde(rename = "Year Fraction")]
    year_fraction: f64,
    #[serde(rename = "Inflation %")]
    inflation_pct: String,
    #[serde(rename = "Basic Cost")]
    basic_cost: String,
    #[serde(rename = "Additional Cost")]
    additional_cost: String,
    #[serde(rename = "Total")]
    total: String,
    #[serde(rename = "Cumulative")]
    cumulative: i64,
}

fn amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// Export the yearly breakdown of `report` to CSV
pub fn export_report_csv<W: Write>(report: &CostReport, writer: W) -> AdvisorResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let projection = &report.projection;

    for (i, year) in projection.yearly.iter().enumerate() {
        csv_writer
            .serialize(YearRow {
                home: &projection.home_name,
                scenario: projection.scenario.to_string(),
                year: year.year,
                year_fraction: year.year_fraction,
                inflation_pct: amount(year.inflation_pct),
                basic_cost: amount(year.basic_cost),
                additional_cost: amount(year.additional_cost),
                total: amount(year.total),
                cumulative: report.chart.cumulative.get(i).copied().unwrap_or_default(),
            })
            .map_err(|e| AdvisorError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| AdvisorError::Export(e.to_string()))?;

    Ok(())
}
