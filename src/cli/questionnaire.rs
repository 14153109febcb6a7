//! Questionnaire CLI commands

use chrono::Utc;
use clap::Subcommand;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::settings::Settings;
use crate::display::{format_draft_status, format_submissions};
use crate::error::{AdvisorError, AdvisorResult};
use crate::questionnaire::{
    DraftLoad, DraftStore, LocalEndpoint, Prompter, QuestionnaireDefinition,
    QuestionnaireSession, QuestionnaireVariant, ResumeDecision, StartOutcome,
};
use crate::storage::Storage;

/// Questionnaire subcommands
#[derive(Subcommand)]
pub enum QuestionnaireCommands {
    /// Fill in the questionnaire, resuming a saved draft if there is one
    Start {
        /// Variant (standard, premium)
        #[arg(long)]
        variant: Option<String>,
        /// YAML questionnaire definition to use instead of a built-in one
        #[arg(short, long, conflicts_with = "variant")]
        definition: Option<PathBuf>,
    },
    /// Show the saved draft
    Status {
        #[arg(long)]
        variant: Option<String>,
    },
    /// Delete the saved draft
    Discard {
        #[arg(long)]
        variant: Option<String>,
    },
    /// List submitted questionnaires
    Submissions {
        /// Number of submissions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn load_definition(
    variant: Option<&str>,
    file: Option<&Path>,
    settings: &Settings,
) -> AdvisorResult<QuestionnaireDefinition> {
    if let Some(path) = file {
        return QuestionnaireDefinition::from_file(path);
    }

    let variant = match variant {
        None => settings.default_questionnaire,
        Some(s) => QuestionnaireVariant::parse(s).ok_or_else(|| {
            AdvisorError::Validation(format!(
                "Invalid questionnaire: '{}'. Valid questionnaires: standard, premium",
                s
            ))
        })?,
    };
    QuestionnaireDefinition::builtin(variant)
}

/// Handle a questionnaire command
pub fn handle_questionnaire_command(
    storage: &Storage,
    settings: &Settings,
    cmd: QuestionnaireCommands,
) -> AdvisorResult<()> {
    match cmd {
        QuestionnaireCommands::Start {
            variant,
            definition,
        } => {
            let definition = load_definition(variant.as_deref(), definition.as_deref(), settings)?;
            let stdin = io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), io::stdout());

            let mut prompt_error = None;
            let (mut session, outcome) = QuestionnaireSession::start(
                definition,
                &storage.local,
                settings,
                Utc::now(),
                |draft, def| match prompter.confirm_resume(draft, def) {
                    Ok(decision) => decision,
                    Err(e) => {
                        prompt_error = Some(e);
                        ResumeDecision::Resume
                    }
                },
            );
            if let Some(e) = prompt_error {
                return Err(e);
            }

            match outcome {
                StartOutcome::Resumed { section } => println!("Resuming at section {}.", section),
                StartOutcome::Discarded(DraftLoad::Expired) => {
                    println!("Your saved answers had expired and were cleared.")
                }
                StartOutcome::Discarded(_) => {
                    println!("Your saved answers could not be used and were cleared.")
                }
                StartOutcome::Fresh | StartOutcome::Restored | StartOutcome::Declined => {}
            }

            let endpoint = LocalEndpoint::new(&storage.submissions, &storage.local);
            prompter.run(&mut session, &endpoint)?;
        }

        QuestionnaireCommands::Status { variant } => {
            let definition = load_definition(variant.as_deref(), None, settings)?;
            let now = Utc::now();
            let load = DraftStore::new(&storage.local, &definition).load(now);
            print!("{}", format_draft_status(&definition, &load, now));
        }

        QuestionnaireCommands::Discard { variant } => {
            let definition = load_definition(variant.as_deref(), None, settings)?;
            DraftStore::new(&storage.local, &definition).remove()?;
            println!("Saved draft for '{}' removed.", definition.title);
        }

        QuestionnaireCommands::Submissions { limit } => {
            let submissions = storage.submissions.read_recent(limit)?;
            print!("{}", format_submissions(&submissions));
        }
    }

    Ok(())
}
