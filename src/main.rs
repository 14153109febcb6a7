use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use carehome_advisor::cli::{
    handle_calc, handle_check_command, handle_compare, handle_export, handle_history,
    handle_home_command, handle_questionnaire_command, CalcArgs, CheckCommands, ExportArgs,
    HistoryArgs, HomeCommands, QuestionnaireCommands,
};
use carehome_advisor::config::{paths::AdvisorPaths, settings::Settings};
use carehome_advisor::storage::Storage;

#[derive(Parser)]
#[command(
    name = "carehome",
    author = "RightCareHome",
    version,
    about = "Care home cost calculator and assessment questionnaire",
    long_about = "Projects the cost of a care home stay under different inflation \
                  scenarios, compares homes over five years, and walks you through \
                  the care home questionnaire with autosaved drafts."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Care home catalogue
    #[command(subcommand)]
    Homes(HomeCommands),

    /// Project the cost of a stay at one home
    Calc(CalcArgs),

    /// Rank every home by five-year cost
    Compare {
        /// Home to highlight
        #[arg(long)]
        home: Option<String>,
    },

    /// Recent calculations
    History(HistoryArgs),

    /// Export a cost report to a file
    Export(ExportArgs),

    /// Questionnaire commands
    #[command(subcommand, alias = "q")]
    Questionnaire(QuestionnaireCommands),

    /// Validate an email, phone number or postcode
    #[command(subcommand)]
    Check(CheckCommands),

    /// Write default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Validation needs no storage
    let command = match cli.command {
        Some(Commands::Check(cmd)) => return Ok(handle_check_command(cmd)?),
        other => other,
    };

    // Initialize paths and settings
    let paths = AdvisorPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    debug!(base_dir = %paths.base_dir().display(), "loaded settings");

    // Initialize storage
    let mut storage = Storage::new(paths.clone(), &settings)?;
    if let Err(e) = storage.load_all() {
        warn!(error = %e, "local storage unavailable; continuing without saved data");
    }

    match command {
        Some(Commands::Homes(cmd)) => handle_home_command(&storage, &settings, cmd)?,
        Some(Commands::Calc(args)) => handle_calc(&storage, &settings, args)?,
        Some(Commands::Compare { home }) => handle_compare(&storage, &settings, home)?,
        Some(Commands::History(args)) => handle_history(&storage, &settings, args)?,
        Some(Commands::Export(args)) => handle_export(&storage, &settings, args)?,
        Some(Commands::Questionnaire(cmd)) => {
            handle_questionnaire_command(&storage, &settings, cmd)?
        }
        Some(Commands::Check(_)) => {}
        Some(Commands::Init) => {
            println!("Initializing carehome-advisor at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Settings written to: {}", paths.settings_file().display());
            println!("Run 'carehome homes list' to see the care homes.");
        }
        Some(Commands::Config) => {
            println!("carehome-advisor Configuration");
            println!("==============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Local storage:    {}", paths.local_storage_file().display());
            println!("Submissions log:  {}", paths.submissions_log().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!(
                "Initialized:      {}",
                if storage.is_initialized() { "Yes" } else { "No" }
            );
            println!();
            println!("Settings:");
            println!("  Default scenario:      {}", settings.default_scenario);
            println!("  Default years:         {}", settings.default_years);
            println!("  Currency symbol:       {}", settings.currency_symbol);
            println!("  Default questionnaire: {}", settings.default_questionnaire);
            println!("  Autosave debounce:     {} ms", settings.autosave_debounce_ms);
            println!("  Backup interval:       {} s", settings.backup_interval_secs);
            println!("  History limit:         {}", settings.history_limit);
            match &settings.catalogue_file {
                Some(path) => println!("  Catalogue:             {}", path.display()),
                None => println!("  Catalogue:             built-in"),
            }
        }
        None => {
            println!("carehome - care home costs and questionnaire");
            println!();
            println!("Run 'carehome --help' for usage information.");
            println!("Run 'carehome homes list' to get started.");
        }
    }

    Ok(())
}
