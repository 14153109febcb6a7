//! CLI commands for report export

use chrono::Utc;
use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use super::calculate::parse_scenario;
use crate::config::settings::Settings;
use crate::error::{AdvisorError, AdvisorResult};
use crate::export::{export_report_csv, export_report_json, export_report_yaml};
use crate::reports::CostReport;
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (yearly breakdown only)
    Csv,
    /// JSON format (full report)
    Json,
    /// YAML format (full report, human-readable)
    Yaml,
}

impl ExportFormat {
    fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// Arguments of `export`
#[derive(Args)]
pub struct ExportArgs {
    /// Home key or name
    pub home: String,
    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,
    /// Output file path (defaults to the exports directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Length of stay in years
    #[arg(short, long)]
    pub years: Option<f64>,
    /// Scenario (optimistic, realistic, pessimistic)
    #[arg(short, long)]
    pub scenario: Option<String>,
}

/// Handle `export`
pub fn handle_export(storage: &Storage, settings: &Settings, args: ExportArgs) -> AdvisorResult<()> {
    let now = Utc::now();
    let scenario = parse_scenario(args.scenario.as_deref(), settings)?;
    let years = args.years.unwrap_or(settings.default_years);
    let report = CostReport::generate(&storage.catalogue, &args.home, scenario, years, now)?;

    let output = args.output.unwrap_or_else(|| {
        storage.paths().export_dir().join(format!(
            "{}-{}-{}.{}",
            report.home.key,
            scenario,
            now.format("%Y%m%d%H%M%S"),
            args.format.extension()
        ))
    });

    let file = File::create(&output).map_err(|e| {
        AdvisorError::Export(format!("Failed to create file {}: {}", output.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    match args.format {
        ExportFormat::Csv => export_report_csv(&report, &mut writer)?,
        ExportFormat::Json => export_report_json(&report, &mut writer, true)?,
        ExportFormat::Yaml => export_report_yaml(&report, &mut writer)?,
    }
    writer.flush().map_err(|e| AdvisorError::Export(e.to_string()))?;

    println!(
        "Exported {} ({}, {} years) to: {}",
        report.home.name,
        scenario,
        years,
        output.display()
    );

    Ok(())
}
