//! Wizard state machine
//!
//! Sections are numbered from 1. `next` validates the current section before
//! advancing and is a no-op on the last section; `prev` never validates and
//! is a no-op on the first. Submission is only possible from the last
//! section once it validates.

use chrono::{DateTime, Utc};

use super::definition::{FieldKind, QuestionnaireDefinition, SectionDef};
use super::selection::{toggle_choice, ToggleOutcome};
use super::validation::{validate_section, FieldError};
use crate::error::{AdvisorError, AdvisorResult};
use crate::models::{Answers, QuestionnaireDraft, SubmissionId, SubmissionPayload};

/// Result of `Wizard::next`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextOutcome {
    /// Moved to `section`; `milestone` is set the first time the
    /// milestone section is entered
    Advanced { section: usize, milestone: bool },
    /// The current section has errors; nothing changed
    Invalid(Vec<FieldError>),
    /// Already on the last section
    AtLastSection,
}

/// Why a submission could not be built
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocked {
    NotLastSection,
    Invalid(Vec<FieldError>),
}

/// A questionnaire in progress
#[derive(Debug, Clone)]
pub struct Wizard {
    definition: QuestionnaireDefinition,
    current: usize,
    answers: Answers,
    milestone_shown: bool,
    started_at: DateTime<Utc>,
}

impl Wizard {
    pub fn new(definition: QuestionnaireDefinition, started_at: DateTime<Utc>) -> Self {
        Self {
            definition,
            current: 1,
            answers: Answers::new(),
            milestone_shown: false,
            started_at,
        }
    }

    /// Continue from a saved draft
    ///
    /// The saved section is clamped to the definition's range. A milestone
    /// already passed is not reported again.
    pub fn resume(
        definition: QuestionnaireDefinition,
        draft: QuestionnaireDraft,
        started_at: DateTime<Utc>,
    ) -> Self {
        let current = draft.current_section.clamp(1, definition.section_count());
        let milestone_shown = definition
            .milestone_section
            .map_or(false, |milestone| current >= milestone);

        Self {
            definition,
            current,
            answers: draft.data,
            milestone_shown,
            started_at,
        }
    }

    pub fn definition(&self) -> &QuestionnaireDefinition {
        &self.definition
    }

    pub fn current_section(&self) -> usize {
        self.current
    }

    pub fn section(&self) -> &SectionDef {
        &self.definition.sections[self.current - 1]
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn is_first(&self) -> bool {
        self.current == 1
    }

    pub fn is_last(&self) -> bool {
        self.current == self.definition.section_count()
    }

    /// Percentage of sections reached
    pub fn progress_pct(&self) -> u32 {
        (self.current * 100 / self.definition.section_count()) as u32
    }

    /// Set a text, email, tel, textarea, postcode or radio answer
    pub fn set_answer(&mut self, field: &str, value: &str) -> AdvisorResult<()> {
        let def = self
            .definition
            .field(field)
            .ok_or_else(|| AdvisorError::Validation(format!("Unknown field: {}", field)))?;

        if def.kind == FieldKind::Checkbox {
            return Err(AdvisorError::Validation(format!(
                "{} is a checkbox group; toggle its options instead",
                field
            )));
        }

        self.answers.set_text(field, value);
        Ok(())
    }

    /// Check or uncheck one option of a checkbox group
    pub fn toggle(&mut self, field: &str, value: &str, checked: bool) -> AdvisorResult<ToggleOutcome> {
        let def = self
            .definition
            .field(field)
            .ok_or_else(|| AdvisorError::Validation(format!("Unknown field: {}", field)))?;

        toggle_choice(&self.definition, def, &mut self.answers, value, checked)
    }

    pub fn validate_current(&self) -> Vec<FieldError> {
        validate_section(&self.definition, self.section(), &self.answers)
    }

    pub fn next(&mut self) -> NextOutcome {
        if self.is_last() {
            return NextOutcome::AtLastSection;
        }

        let errors = self.validate_current();
        if !errors.is_empty() {
            return NextOutcome::Invalid(errors);
        }

        self.current += 1;
        let milestone = !self.milestone_shown && self.definition.milestone_section == Some(self.current);
        if milestone {
            self.milestone_shown = true;
        }

        NextOutcome::Advanced {
            section: self.current,
            milestone,
        }
    }

    /// Go back one section; returns false on the first section
    pub fn prev(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Snapshot the wizard as a draft
    pub fn to_draft(&self, now: DateTime<Utc>) -> QuestionnaireDraft {
        QuestionnaireDraft::new(
            self.definition.version.clone(),
            self.current,
            self.answers.clone(),
            now,
        )
    }

    /// Build the submission payload, if the last section validates
    pub fn prepare_submission(&self, now: DateTime<Utc>) -> Result<SubmissionPayload, SubmitBlocked> {
        if !self.is_last() {
            return Err(SubmitBlocked::NotLastSection);
        }

        let errors = self.validate_current();
        if !errors.is_empty() {
            return Err(SubmitBlocked::Invalid(errors));
        }

        Ok(SubmissionPayload {
            answers: self.answers.clone(),
            submission_id: SubmissionId::generate(&self.definition.id_prefix, now),
            questionnaire: self.definition.name.clone(),
            version: self.definition.version.clone(),
            completed_sections: self.definition.section_count(),
            completion_time: (now - self.started_at).num_seconds().max(0) as u64,
            timestamp: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::QuestionnaireVariant;
    use chrono::Duration;

    fn standard() -> Wizard {
        let def = QuestionnaireDefinition::builtin(QuestionnaireVariant::Standard).unwrap();
        Wizard::new(def, Utc::now())
    }

    fn fill_section(wizard: &mut Wizard) {
        let fields = wizard.section().fields.clone();
        for field in fields.iter().filter(|f| f.required) {
            match field.kind {
                FieldKind::Radio | FieldKind::Checkbox => {
                    let value = field.options[0].value.clone();
                    if field.kind == FieldKind::Radio {
                        wizard.set_answer(&field.name, &value).unwrap();
                    } else {
                        wizard.toggle(&field.name, &value, true).unwrap();
                    }
                }
                FieldKind::Email => wizard.set_answer(&field.name, "jo@example.com").unwrap(),
                FieldKind::Tel => wizard.set_answer(&field.name, "07700 900123").unwrap(),
                FieldKind::Postcode => wizard.set_answer(&field.name, "B15 2TT").unwrap(),
                _ => wizard.set_answer(&field.name, "Some answer").unwrap(),
            }
        }
    }

    #[test]
    fn test_prev_on_first_is_noop() {
        let mut wizard = standard();
        assert!(!wizard.prev());
        assert_eq!(wizard.current_section(), 1);
    }

    #[test]
    fn test_next_blocked_by_errors() {
        let mut wizard = standard();
        match wizard.next() {
            NextOutcome::Invalid(errors) => assert!(!errors.is_empty()),
            other => panic!("expected errors, got {:?}", other),
        }
        assert_eq!(wizard.current_section(), 1);
    }

    #[test]
    fn test_walk_to_end_with_single_milestone() {
        let mut wizard = standard();
        let mut milestones = Vec::new();

        while !wizard.is_last() {
            fill_section(&mut wizard);
            match wizard.next() {
                NextOutcome::Advanced { section, milestone } => {
                    if milestone {
                        milestones.push(section);
                    }
                }
                other => panic!("section {} did not advance: {:?}", wizard.current_section(), other),
            }
        }

        assert_eq!(wizard.current_section(), 5);
        assert_eq!(wizard.progress_pct(), 100);
        assert_eq!(milestones, vec![3]);

        // Going back and forward again does not repeat the milestone
        assert!(wizard.prev());
        assert!(wizard.prev());
        assert!(wizard.prev());
        while !wizard.is_last() {
            if let NextOutcome::Advanced { milestone, .. } = wizard.next() {
                assert!(!milestone);
            }
        }

        assert_eq!(wizard.next(), NextOutcome::AtLastSection);
        assert_eq!(wizard.current_section(), 5);
    }

    #[test]
    fn test_prev_never_validates() {
        let mut wizard = standard();
        fill_section(&mut wizard);
        wizard.next();
        wizard.set_answer("location_001", "not a postcode").unwrap();
        assert!(wizard.prev());
        assert_eq!(wizard.current_section(), 1);
    }

    #[test]
    fn test_submission_only_from_last_section() {
        let start = Utc::now();
        let def = QuestionnaireDefinition::builtin(QuestionnaireVariant::Standard).unwrap();
        let mut wizard = Wizard::new(def, start);
        assert_eq!(
            wizard.prepare_submission(start),
            Err(SubmitBlocked::NotLastSection)
        );

        while !wizard.is_last() {
            fill_section(&mut wizard);
            wizard.next();
        }
        assert!(matches!(
            wizard.prepare_submission(start),
            Err(SubmitBlocked::Invalid(_))
        ));

        fill_section(&mut wizard);
        let payload = wizard.prepare_submission(start + Duration::seconds(95)).unwrap();
        assert!(payload.submission_id.as_str().starts_with("CARE-"));
        assert_eq!(payload.questionnaire, "standard");
        assert_eq!(payload.completed_sections, 5);
        assert_eq!(payload.completion_time, 95);
        assert_eq!(payload.answers.text("contact_002"), Some("jo@example.com"));
    }

    #[test]
    fn test_resume_clamps_and_skips_passed_milestone() {
        let def = QuestionnaireDefinition::builtin(QuestionnaireVariant::Premium).unwrap();
        let draft = QuestionnaireDraft::new("2.2", 12, Answers::new(), Utc::now());
        let wizard = Wizard::resume(def.clone(), draft, Utc::now());
        assert_eq!(wizard.current_section(), 8);

        let draft = QuestionnaireDraft::new("2.2", 0, Answers::new(), Utc::now());
        let wizard = Wizard::resume(def, draft, Utc::now());
        assert_eq!(wizard.current_section(), 1);
    }

    #[test]
    fn test_answer_type_checks() {
        let mut wizard = standard();
        assert!(wizard.set_answer("nope", "x").is_err());
        assert!(wizard.set_answer("care_002", "diabetes").is_err());
        assert!(wizard.toggle("care_002", "diabetes", true).is_ok());
    }
}
