//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod calculate;
pub mod check;
pub mod export;
pub mod home;
pub mod questionnaire;

pub use calculate::{handle_calc, handle_compare, handle_history, CalcArgs, HistoryArgs};
pub use check::{handle_check_command, CheckCommands};
pub use export::{handle_export, ExportArgs, ExportFormat};
pub use home::{handle_home_command, HomeCommands};
pub use questionnaire::{handle_questionnaire_command, QuestionnaireCommands};
