//! Multi-section questionnaire
//!
//! One configurable wizard drives every questionnaire variant. A
//! `QuestionnaireDefinition` describes the sections, fields and rules; the
//! wizard walks the sections, validating each before moving on, autosaving a
//! draft as answers change and handing the finished answers to a submission
//! endpoint.

pub mod autosave;
pub mod definition;
pub mod drafts;
pub mod prompt;
pub mod selection;
pub mod session;
pub mod submission;
pub mod validation;
pub mod wizard;

pub use autosave::{Autosaver, SaveReason};
pub use definition::{ChoiceOption, FieldDef, FieldKind, QuestionnaireDefinition, SectionDef};
pub use drafts::{DraftLoad, DraftStore};
pub use prompt::{Prompter, RunOutcome};
pub use selection::{toggle_choice, ToggleOutcome};
pub use session::{QuestionnaireSession, ResumeDecision, StartOutcome, SubmitOutcome};
pub use submission::{LocalEndpoint, SubmissionEndpoint, LAST_SUBMISSION_KEY};
pub use validation::{EmailRule, FieldError, PhoneRule};
pub use wizard::{NextOutcome, SubmitBlocked, Wizard};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in questionnaire variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuestionnaireVariant {
    /// Five-section care home questionnaire
    #[default]
    Standard,
    /// Eight-section premium assessment
    Premium,
}

impl QuestionnaireVariant {
    pub const ALL: [QuestionnaireVariant; 2] = [Self::Standard, Self::Premium];

    /// Parse variant from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "basic" => Some(Self::Standard),
            "premium" => Some(Self::Premium),
            _ => None,
        }
    }
}

impl fmt::Display for QuestionnaireVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Premium => write!(f, "premium"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_parse() {
        assert_eq!(QuestionnaireVariant::parse("Premium"), Some(QuestionnaireVariant::Premium));
        assert_eq!(QuestionnaireVariant::parse("basic"), Some(QuestionnaireVariant::Standard));
        assert_eq!(QuestionnaireVariant::parse("gold"), None);
    }

    #[test]
    fn test_variant_display_roundtrips_through_parse() {
        for variant in QuestionnaireVariant::ALL {
            assert_eq!(QuestionnaireVariant::parse(&variant.to_string()), Some(variant));
        }
    }
}
