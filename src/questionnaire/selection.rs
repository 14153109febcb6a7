//! Checkbox group selection
//!
//! Applies a check or uncheck to a checkbox group while keeping two rules:
//! an exclusive value is never checked alongside anything else, and a group
//! never holds more than its maximum.

use super::definition::{FieldDef, FieldKind, QuestionnaireDefinition};
use super::validation::max_selections_message;
use crate::error::{AdvisorError, AdvisorResult};
use crate::models::Answers;

/// Result of a toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The group was updated (possibly clearing other values)
    Updated,
    /// The check was refused and the group left unchanged
    LimitReached { max: usize, message: String },
}

/// Check or uncheck `value` in the checkbox group `field`
pub fn toggle_choice(
    definition: &QuestionnaireDefinition,
    field: &FieldDef,
    answers: &mut Answers,
    value: &str,
    checked: bool,
) -> AdvisorResult<ToggleOutcome> {
    if field.kind != FieldKind::Checkbox {
        return Err(AdvisorError::Validation(format!(
            "{} is not a checkbox group",
            field.name
        )));
    }
    if !field.has_option(value) {
        return Err(AdvisorError::Validation(format!(
            "{} is not an option of {}",
            value, field.name
        )));
    }

    let current = answers.choices(&field.name);

    if !checked {
        let remaining = current.iter().filter(|v| *v != value).cloned().collect();
        answers.set_choices(&field.name, remaining);
        return Ok(ToggleOutcome::Updated);
    }

    if current.iter().any(|v| v == value) {
        return Ok(ToggleOutcome::Updated);
    }

    if definition.is_exclusive(value) {
        answers.set_choices(&field.name, vec![value.to_string()]);
        return Ok(ToggleOutcome::Updated);
    }

    let mut next: Vec<String> = current
        .iter()
        .filter(|v| !definition.is_exclusive(v))
        .cloned()
        .collect();
    next.push(value.to_string());

    if let Some(max) = field.max_selections {
        if next.len() > max {
            return Ok(ToggleOutcome::LimitReached {
                max,
                message: max_selections_message(max),
            });
        }
    }

    answers.set_choices(&field.name, next);
    Ok(ToggleOutcome::Updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::QuestionnaireVariant;

    fn setup(variant: QuestionnaireVariant) -> QuestionnaireDefinition {
        QuestionnaireDefinition::builtin(variant).unwrap()
    }

    fn holds_exclusive_with_other(def: &QuestionnaireDefinition, values: &[String]) -> bool {
        values.len() > 1 && values.iter().any(|v| def.is_exclusive(v))
    }

    #[test]
    fn test_exclusive_clears_siblings() {
        let def = setup(QuestionnaireVariant::Standard);
        let field = def.field("care_002").unwrap().clone();
        let mut answers = Answers::new();

        toggle_choice(&def, &field, &mut answers, "dementia", true).unwrap();
        toggle_choice(&def, &field, &mut answers, "diabetes", true).unwrap();
        toggle_choice(&def, &field, &mut answers, "no_serious_medical", true).unwrap();
        assert_eq!(answers.choices("care_002"), ["no_serious_medical".to_string()]);

        toggle_choice(&def, &field, &mut answers, "stroke", true).unwrap();
        assert_eq!(answers.choices("care_002"), ["stroke".to_string()]);
    }

    #[test]
    fn test_exclusive_invariant_over_sequences() {
        let def = setup(QuestionnaireVariant::Premium);
        let field = def.field("q12").unwrap().clone();
        let values: Vec<String> = field.options.iter().map(|o| o.value.clone()).collect();
        let mut answers = Answers::new();

        // Walk a long deterministic sequence of checks and unchecks
        for step in 0..200usize {
            let value = &values[(step * 7 + step / 3) % values.len()];
            let checked = step % 5 != 4;
            toggle_choice(&def, &field, &mut answers, value, checked).unwrap();
            assert!(
                !holds_exclusive_with_other(&def, answers.choices("q12")),
                "step {}: {:?}",
                step,
                answers.choices("q12")
            );
        }
    }

    #[test]
    fn test_max_selections_refused() {
        let def = setup(QuestionnaireVariant::Premium);
        let field = def.field("q38").unwrap().clone();
        let mut answers = Answers::new();

        for value in ["cost", "food", "location"] {
            assert_eq!(
                toggle_choice(&def, &field, &mut answers, value, true).unwrap(),
                ToggleOutcome::Updated
            );
        }

        let outcome = toggle_choice(&def, &field, &mut answers, "staffing", true).unwrap();
        assert_eq!(
            outcome,
            ToggleOutcome::LimitReached {
                max: 3,
                message: "Please select maximum 3 options".into()
            }
        );
        assert_eq!(answers.choices("q38").len(), 3);
        assert!(!answers.is_checked("q38", "staffing"));

        toggle_choice(&def, &field, &mut answers, "food", false).unwrap();
        toggle_choice(&def, &field, &mut answers, "staffing", true).unwrap();
        assert!(answers.is_checked("q38", "staffing"));
    }

    #[test]
    fn test_uncheck_last_clears_field() {
        let def = setup(QuestionnaireVariant::Standard);
        let field = def.field("care_003").unwrap().clone();
        let mut answers = Answers::new();

        toggle_choice(&def, &field, &mut answers, "latex", true).unwrap();
        toggle_choice(&def, &field, &mut answers, "latex", false).unwrap();
        assert!(answers.get("care_003").is_none());
    }

    #[test]
    fn test_rejects_unknown_value_and_non_checkbox() {
        let def = setup(QuestionnaireVariant::Standard);
        let mut answers = Answers::new();

        let allergies = def.field("care_003").unwrap().clone();
        assert!(toggle_choice(&def, &allergies, &mut answers, "pollen", true).is_err());

        let radio = def.field("care_001").unwrap().clone();
        assert!(toggle_choice(&def, &radio, &mut answers, "nursing", true).is_err());
    }
}
