//! Calculator CLI commands
//!
//! `calc`, `compare` and `history`, all driven through a
//! `CalculatorSession` so every projection lands in the history.

use chrono::Utc;
use clap::{Args, Subcommand};

use crate::config::settings::Settings;
use crate::display::{format_history, format_insights, format_ranking};
use crate::error::{AdvisorError, AdvisorResult};
use crate::models::Scenario;
use crate::reports::CostReport;
use crate::services::{compare_homes, CalculatorSession, ComparisonInsights};
use crate::storage::{FileStore, Storage};

/// Arguments of `calc`
#[derive(Args)]
pub struct CalcArgs {
    /// Home key or name
    pub home: String,
    /// Length of stay in years (fractions allowed)
    #[arg(short, long)]
    pub years: Option<f64>,
    /// Scenario (optimistic, realistic, pessimistic)
    #[arg(short, long)]
    pub scenario: Option<String>,
}

/// Arguments of `history`
#[derive(Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: Option<HistoryCommands>,
    /// Number of calculations to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// History subcommands
#[derive(Subcommand)]
pub enum HistoryCommands {
    /// Forget all recorded calculations
    Clear,
}

/// Resolve a scenario argument, falling back to the configured default
pub fn parse_scenario(arg: Option<&str>, settings: &Settings) -> AdvisorResult<Scenario> {
    match arg {
        None => Ok(settings.default_scenario),
        Some(s) => Scenario::parse(s).ok_or_else(|| {
            AdvisorError::Validation(format!(
                "Invalid scenario: '{}'. Valid scenarios: optimistic, realistic, pessimistic",
                s
            ))
        }),
    }
}

fn session<'a>(storage: &'a Storage, settings: &Settings) -> CalculatorSession<'a, FileStore> {
    CalculatorSession::new(
        &storage.catalogue,
        &storage.local,
        settings.default_scenario,
        settings.default_years,
        settings.history_limit,
    )
}

/// Handle `calc`
pub fn handle_calc(storage: &Storage, settings: &Settings, args: CalcArgs) -> AdvisorResult<()> {
    let now = Utc::now();
    let scenario = parse_scenario(args.scenario.as_deref(), settings)?;
    let years = args.years.unwrap_or(settings.default_years);

    let mut calculator = session(storage, settings);
    calculator.select_scenario(scenario, now)?;
    calculator.set_years(years, now)?;
    calculator.select_home(&args.home, now)?;

    let home = calculator
        .home()
        .cloned()
        .ok_or_else(|| AdvisorError::home_not_found(&args.home))?;
    let report = CostReport::for_home(&storage.catalogue, home, scenario, years, now)?;
    print!("{}", report.format_terminal(&settings.currency_symbol));

    Ok(())
}

/// Handle `compare`
pub fn handle_compare(
    storage: &Storage,
    settings: &Settings,
    selected: Option<String>,
) -> AdvisorResult<()> {
    let symbol = &settings.currency_symbol;
    let ranked = compare_homes(storage.catalogue.homes())?;

    let selected_key = match &selected {
        Some(query) => Some(storage.catalogue.get(query)?.key.clone()),
        None => None,
    };

    println!("Five-Year Comparison (Most Likely)");
    println!("{}", format_ranking(&ranked, selected_key.as_deref(), symbol));

    if let Some(key) = selected_key {
        if let Some(insights) = ComparisonInsights::for_selection(&ranked, &key) {
            println!();
            print!("{}", format_insights(&insights, ranked.len(), symbol));
        }
    }

    Ok(())
}

/// Handle `history`
pub fn handle_history(storage: &Storage, settings: &Settings, args: HistoryArgs) -> AdvisorResult<()> {
    let calculator = session(storage, settings);

    match args.command {
        Some(HistoryCommands::Clear) => {
            calculator.clear_history()?;
            println!("Calculation history cleared.");
        }
        None => {
            let mut records = calculator.history()?;
            if let Some(limit) = args.limit {
                records.truncate(limit);
            }
            print!("{}", format_history(&records, &settings.currency_symbol));
        }
    }

    Ok(())
}
