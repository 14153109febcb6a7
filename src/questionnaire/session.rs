//! Questionnaire session
//!
//! Owns one wizard together with its draft storage and autosave timer.
//! Every answer change goes through the session so the draft follows the
//! wizard; storage failures are logged and never interrupt the user.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::autosave::{Autosaver, SaveReason};
use super::definition::QuestionnaireDefinition;
use super::drafts::{DraftLoad, DraftStore};
use super::selection::ToggleOutcome;
use super::submission::SubmissionEndpoint;
use super::wizard::{NextOutcome, SubmitBlocked, Wizard};
use crate::config::settings::Settings;
use crate::error::AdvisorResult;
use crate::models::{QuestionnaireDraft, SubmissionReceipt};
use crate::storage::KeyValueStore;

/// Answer to "continue where you left off?"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeDecision {
    Resume,
    StartOver,
}

/// How a session began
#[derive(Debug, Clone, PartialEq)]
pub enum StartOutcome {
    /// No draft was stored
    Fresh,
    /// A first-section draft's answers were restored without asking
    Restored,
    /// The user chose to continue from `section`
    Resumed { section: usize },
    /// The user chose to start over; the draft was removed
    Declined,
    /// The stored draft could not be used and was removed
    Discarded(DraftLoad),
}

/// Result of a submission attempt that reached the wizard
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Submitted(SubmissionReceipt),
    Blocked(SubmitBlocked),
}

pub struct QuestionnaireSession<'a, S: KeyValueStore + ?Sized> {
    wizard: Wizard,
    drafts: DraftStore<'a, S>,
    autosave: Autosaver,
    submitted: bool,
}

impl<'a, S: KeyValueStore + ?Sized> QuestionnaireSession<'a, S> {
    /// Start a session, offering to resume a stored draft
    ///
    /// `confirm` is only asked when the draft is past the first section.
    pub fn start<F>(
        definition: QuestionnaireDefinition,
        store: &'a S,
        settings: &Settings,
        now: DateTime<Utc>,
        confirm: F,
    ) -> (Self, StartOutcome)
    where
        F: FnOnce(&QuestionnaireDraft, &QuestionnaireDefinition) -> ResumeDecision,
    {
        let drafts = DraftStore::new(store, &definition);
        let autosave = Autosaver::from_millis(
            settings.autosave_debounce_ms,
            settings.backup_interval_secs,
            now,
        );

        let (wizard, outcome) = match drafts.load(now) {
            DraftLoad::Missing => (Wizard::new(definition, now), StartOutcome::Fresh),
            DraftLoad::Found(draft) if draft.current_section <= 1 => {
                (Wizard::resume(definition, draft, now), StartOutcome::Restored)
            }
            DraftLoad::Found(draft) => match confirm(&draft, &definition) {
                ResumeDecision::Resume => {
                    let section = draft.current_section;
                    info!(key = %drafts.key(), section, "resuming questionnaire draft");
                    let wizard = Wizard::resume(definition, draft, now);
                    let section = wizard.current_section().min(section);
                    (wizard, StartOutcome::Resumed { section })
                }
                ResumeDecision::StartOver => {
                    info!(key = %drafts.key(), "starting over; draft removed");
                    if let Err(e) = drafts.remove() {
                        warn!(error = %e, "failed to remove declined draft");
                    }
                    (Wizard::new(definition, now), StartOutcome::Declined)
                }
            },
            discarded => (
                Wizard::new(definition, now),
                StartOutcome::Discarded(discarded),
            ),
        };

        let session = Self {
            wizard,
            drafts,
            autosave,
            submitted: false,
        };
        (session, outcome)
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn set_answer(&mut self, field: &str, value: &str, now: DateTime<Utc>) -> AdvisorResult<()> {
        self.wizard.set_answer(field, value)?;
        self.autosave.mark_changed(now);
        Ok(())
    }

    pub fn toggle(
        &mut self,
        field: &str,
        value: &str,
        checked: bool,
        now: DateTime<Utc>,
    ) -> AdvisorResult<ToggleOutcome> {
        let outcome = self.wizard.toggle(field, value, checked)?;
        if outcome == ToggleOutcome::Updated {
            self.autosave.mark_changed(now);
        }
        Ok(outcome)
    }

    /// Run any autosave that is due at `now`
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<SaveReason> {
        if self.submitted {
            return None;
        }
        let reason = self.autosave.poll(now)?;
        self.save_now(now);
        Some(reason)
    }

    /// Advance; a successful move is saved immediately
    pub fn next(&mut self, now: DateTime<Utc>) -> NextOutcome {
        let outcome = self.wizard.next();
        if matches!(outcome, NextOutcome::Advanced { .. }) {
            self.save_now(now);
        }
        outcome
    }

    pub fn prev(&mut self) -> bool {
        self.wizard.prev()
    }

    /// Write the draft now; returns false if the store refused it
    pub fn save_now(&mut self, now: DateTime<Utc>) -> bool {
        match self.drafts.save(&self.wizard.to_draft(now)) {
            Ok(()) => {
                self.autosave.record_save(now);
                true
            }
            Err(e) => {
                warn!(error = %e, "autosave failed");
                false
            }
        }
    }

    /// Submit through `endpoint`
    ///
    /// On success the draft is removed. On endpoint failure the draft is
    /// saved and the error returned, so the user can retry.
    pub fn submit(
        &mut self,
        endpoint: &dyn SubmissionEndpoint,
        now: DateTime<Utc>,
    ) -> AdvisorResult<SubmitOutcome> {
        let payload = match self.wizard.prepare_submission(now) {
            Ok(payload) => payload,
            Err(blocked) => return Ok(SubmitOutcome::Blocked(blocked)),
        };

        match endpoint.submit(&payload) {
            Ok(receipt) => {
                self.submitted = true;
                if let Err(e) = self.drafts.remove() {
                    warn!(error = %e, "failed to clear submitted draft");
                }
                Ok(SubmitOutcome::Submitted(receipt))
            }
            Err(e) => {
                warn!(error = %e, "submission failed; draft kept for retry");
                self.save_now(now);
                Err(e)
            }
        }
    }

    /// Remove the stored draft
    pub fn discard(&self) -> AdvisorResult<()> {
        self.drafts.remove()
    }
}
