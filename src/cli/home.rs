//! Care home CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_home_details, format_home_list};
use crate::error::AdvisorResult;
use crate::storage::Storage;

/// Care home subcommands
#[derive(Subcommand)]
pub enum HomeCommands {
    /// List the care homes in the catalogue
    List,
    /// Show pricing and details for one home
    Show {
        /// Home key or name
        home: String,
    },
}

/// Handle a care home command
pub fn handle_home_command(
    storage: &Storage,
    settings: &Settings,
    cmd: HomeCommands,
) -> AdvisorResult<()> {
    let symbol = &settings.currency_symbol;

    match cmd {
        HomeCommands::List => {
            print!("{}", format_home_list(storage.catalogue.homes(), symbol));
        }
        HomeCommands::Show { home } => {
            let found = storage.catalogue.get(&home)?;
            print!("{}", format_home_details(found, symbol));
        }
    }

    Ok(())
}
