//! Interactive questionnaire runner
//!
//! Walks a session through its sections on a line-based terminal. Input and
//! output are generic so the runner can be driven from tests.

use std::io::{BufRead, Write};

use chrono::{Local, Utc};

use super::definition::{FieldDef, FieldKind, QuestionnaireDefinition};
use super::selection::ToggleOutcome;
use super::session::{QuestionnaireSession, ResumeDecision, SubmitOutcome};
use super::submission::SubmissionEndpoint;
use super::validation::{FieldError, RADIO_MESSAGE};
use super::wizard::{NextOutcome, SubmitBlocked};
use crate::error::AdvisorResult;
use crate::models::{QuestionnaireDraft, SubmissionReceipt};
use crate::storage::KeyValueStore;

/// How an interactive run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Submitted(SubmissionReceipt),
    /// The user quit; the draft was saved for later
    SavedForLater,
}

/// Line-based prompter over any reader and writer
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn say(&mut self, line: &str) -> AdvisorResult<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Prompt and read one trimmed line; `None` at end of input
    fn ask(&mut self, prompt: &str) -> AdvisorResult<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask whether to continue a saved draft
    pub fn confirm_resume(
        &mut self,
        draft: &QuestionnaireDraft,
        definition: &QuestionnaireDefinition,
    ) -> AdvisorResult<ResumeDecision> {
        let saved = draft.saved_at.with_timezone(&Local);
        self.say("Would you like to continue from where you left off?")?;
        self.say(&format!("  Last saved: {}", saved.format("%d/%m/%Y %H:%M")))?;
        self.say(&format!(
            "  Section: {} of {}",
            draft.current_section,
            definition.section_count()
        ))?;

        let answer = self.ask("Continue? [Y/n] ")?.unwrap_or_default();
        if answer.eq_ignore_ascii_case("n") || answer.eq_ignore_ascii_case("no") {
            Ok(ResumeDecision::StartOver)
        } else {
            Ok(ResumeDecision::Resume)
        }
    }

    /// Run the session until it is submitted or the user quits
    pub fn run<S: KeyValueStore + ?Sized>(
        &mut self,
        session: &mut QuestionnaireSession<'_, S>,
        endpoint: &dyn SubmissionEndpoint,
    ) -> AdvisorResult<RunOutcome> {
        let title = session.wizard().definition().title.clone();
        self.say(&title)?;
        self.say(&"=".repeat(title.len()))?;

        loop {
            let wizard = session.wizard();
            let section = wizard.section().clone();
            self.say("")?;
            self.say(&format!(
                "Section {} of {}: {} ({}%)",
                wizard.current_section(),
                wizard.definition().section_count(),
                section.title,
                wizard.progress_pct()
            ))?;

            for field in &section.fields {
                if !self.ask_field(session, field)? {
                    return self.save_and_quit(session);
                }
                session.tick(Utc::now());
            }

            let last = session.wizard().is_last();
            let prompt = if last {
                "Enter to submit, 'b' to go back, 'q' to save and quit: "
            } else {
                "Enter to continue, 'b' to go back, 'q' to save and quit: "
            };
            let action = match self.ask(prompt)? {
                Some(action) => action.to_lowercase(),
                None => return self.save_and_quit(session),
            };
            match action.as_str() {
                "q" | "quit" => return self.save_and_quit(session),
                "b" | "back" => {
                    session.prev();
                    continue;
                }
                _ => {}
            }

            if last {
                match session.submit(endpoint, Utc::now()) {
                    Ok(SubmitOutcome::Submitted(receipt)) => {
                        self.say("")?;
                        self.say("Thank you! Your questionnaire has been submitted.")?;
                        self.say(&format!("Reference: {}", receipt.reference_number))?;
                        self.say(&format!("Submission ID: {}", receipt.submission_id))?;
                        return Ok(RunOutcome::Submitted(receipt));
                    }
                    Ok(SubmitOutcome::Blocked(SubmitBlocked::Invalid(errors))) => {
                        self.show_errors(&errors)?;
                    }
                    Ok(SubmitOutcome::Blocked(SubmitBlocked::NotLastSection)) => {}
                    Err(e) => {
                        self.say(&format!("{}. Your answers are saved; please try again.", e))?;
                    }
                }
                continue;
            }

            match session.next(Utc::now()) {
                NextOutcome::Invalid(errors) => self.show_errors(&errors)?,
                NextOutcome::Advanced { milestone: true, .. } => {
                    self.say("")?;
                    self.say("Halfway there! Keep going, you're doing great.")?;
                }
                NextOutcome::Advanced { .. } | NextOutcome::AtLastSection => {}
            }
        }
    }

    fn save_and_quit<S: KeyValueStore + ?Sized>(
        &mut self,
        session: &mut QuestionnaireSession<'_, S>,
    ) -> AdvisorResult<RunOutcome> {
        if session.save_now(Utc::now()) {
            self.say("Progress saved. Run the questionnaire again to continue.")?;
        } else {
            self.say("Progress could not be saved.")?;
        }
        Ok(RunOutcome::SavedForLater)
    }

    fn show_errors(&mut self, errors: &[FieldError]) -> AdvisorResult<()> {
        self.say("Please fix the following:")?;
        for error in errors {
            self.say(&format!("  - {}", error))?;
        }
        Ok(())
    }

    /// Ask one field; returns false at end of input
    fn ask_field<S: KeyValueStore + ?Sized>(
        &mut self,
        session: &mut QuestionnaireSession<'_, S>,
        field: &FieldDef,
    ) -> AdvisorResult<bool> {
        let marker = if field.required { " *" } else { "" };
        if let Some(help) = &field.help {
            self.say(&format!("  ({})", help))?;
        }

        match field.kind {
            FieldKind::Radio => self.ask_radio(session, field, marker),
            FieldKind::Checkbox => self.ask_checkbox(session, field, marker),
            _ => {
                let current = session.wizard().answers().text(&field.name).map(str::to_string);
                let prompt = match &current {
                    Some(value) => format!("{}{} [{}]: ", field.label, marker, value),
                    None => format!("{}{}: ", field.label, marker),
                };
                match self.ask(&prompt)? {
                    None => Ok(false),
                    Some(value) if value.is_empty() => Ok(true),
                    Some(value) => {
                        session.set_answer(&field.name, &value, Utc::now())?;
                        Ok(true)
                    }
                }
            }
        }
    }

    fn ask_radio<S: KeyValueStore + ?Sized>(
        &mut self,
        session: &mut QuestionnaireSession<'_, S>,
        field: &FieldDef,
        marker: &str,
    ) -> AdvisorResult<bool> {
        loop {
            let current = session.wizard().answers().text(&field.name).map(str::to_string);
            self.say(&format!("{}{}", field.label, marker))?;
            for (i, option) in field.options.iter().enumerate() {
                let selected = if current.as_deref() == Some(option.value.as_str()) {
                    "*"
                } else {
                    " "
                };
                self.say(&format!("  {}{}) {}", selected, i + 1, option.label))?;
            }

            let Some(input) = self.ask("Choose a number: ")? else {
                return Ok(false);
            };
            if input.is_empty() {
                return Ok(true);
            }
            match pick_option(field, &input) {
                Some(value) => {
                    session.set_answer(&field.name, &value, Utc::now())?;
                    return Ok(true);
                }
                None => self.say(RADIO_MESSAGE)?,
            }
        }
    }

    fn ask_checkbox<S: KeyValueStore + ?Sized>(
        &mut self,
        session: &mut QuestionnaireSession<'_, S>,
        field: &FieldDef,
        marker: &str,
    ) -> AdvisorResult<bool> {
        loop {
            self.say(&format!("{}{}", field.label, marker))?;
            for (i, option) in field.options.iter().enumerate() {
                let mark = if session.wizard().answers().is_checked(&field.name, &option.value) {
                    "x"
                } else {
                    " "
                };
                self.say(&format!("  [{}] {}) {}", mark, i + 1, option.label))?;
            }

            let Some(input) = self.ask("Toggle numbers (e.g. 1,3), Enter when done: ")? else {
                return Ok(false);
            };
            if input.is_empty() {
                return Ok(true);
            }

            for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                let Some(value) = pick_option(field, part) else {
                    self.say(&format!("No option {}", part))?;
                    continue;
                };
                let checked = !session.wizard().answers().is_checked(&field.name, &value);
                if let ToggleOutcome::LimitReached { message, .. } =
                    session.toggle(&field.name, &value, checked, Utc::now())?
                {
                    self.say(&message)?;
                }
            }
        }
    }
}

/// Resolve a 1-based option number or an option value
fn pick_option(field: &FieldDef, input: &str) -> Option<String> {
    if let Ok(n) = input.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| field.options.get(i))
            .map(|o| o.value.clone());
    }
    field
        .options
        .iter()
        .find(|o| o.value.eq_ignore_ascii_case(input))
        .map(|o| o.value.clone())
}
