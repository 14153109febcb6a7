//! Questionnaire definitions
//!
//! A definition is plain data loaded from YAML. The built-in variants are
//! embedded in the binary; a custom definition can be read from a file.

use std::collections::HashSet;
use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::validation::{EmailRule, PhoneRule};
use super::QuestionnaireVariant;
use crate::error::{AdvisorError, AdvisorResult};

const STANDARD_YAML: &str = include_str!("definitions/standard.yaml");
const PREMIUM_YAML: &str = include_str!("definitions/premium.yaml");

/// Kind of input a field collects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    TextArea,
    Postcode,
    Radio,
    Checkbox,
}

impl FieldKind {
    /// Radio and checkbox fields choose from fixed options
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Radio | Self::Checkbox)
    }
}

/// One selectable option of a radio or checkbox field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

/// A single question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceOption>,
    /// Upper bound on checked options (checkbox fields only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_selections: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl FieldDef {
    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    pub fn option_label(&self, value: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }
}

/// A page of the wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionDef {
    pub title: String,
    pub fields: Vec<FieldDef>,
}

/// Full description of a questionnaire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireDefinition {
    pub name: String,
    pub title: String,
    pub version: String,
    /// Key of the draft in the key/value store
    pub storage_key: String,
    /// Prefix of generated submission ids
    pub id_prefix: String,
    /// Section whose first entry triggers the halfway message
    #[serde(default)]
    pub milestone_section: Option<usize>,
    #[serde(default = "default_expiry_hours")]
    pub draft_expiry_hours: i64,
    #[serde(default)]
    pub phone_rule: PhoneRule,
    #[serde(default)]
    pub email_rule: EmailRule,
    /// Checkbox values that exclude every other value in their group
    #[serde(default)]
    pub exclusive_values: Vec<String>,
    pub sections: Vec<SectionDef>,
}

fn default_expiry_hours() -> i64 {
    24
}

/// Longest a draft may be kept: one year
pub const MAX_DRAFT_EXPIRY_HOURS: i64 = 24 * 366;

impl QuestionnaireDefinition {
    /// Load one of the embedded definitions
    pub fn builtin(variant: QuestionnaireVariant) -> AdvisorResult<Self> {
        let yaml = match variant {
            QuestionnaireVariant::Standard => STANDARD_YAML,
            QuestionnaireVariant::Premium => PREMIUM_YAML,
        };
        Self::from_yaml_str(yaml)
    }

    /// Parse and check a YAML definition
    pub fn from_yaml_str(yaml: &str) -> AdvisorResult<Self> {
        let definition: Self = serde_yaml::from_str(yaml)?;
        definition.validate()?;
        Ok(definition)
    }

    /// Read a YAML definition from disk
    pub fn from_file(path: &Path) -> AdvisorResult<Self> {
        if !path.exists() {
            return Err(AdvisorError::questionnaire_not_found(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AdvisorError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Check the definition is internally consistent
    pub fn validate(&self) -> AdvisorResult<()> {
        let invalid = |msg: String| -> AdvisorResult<()> {
            Err(AdvisorError::Definition(format!("{}: {}", self.name, msg)))
        };

        if self.sections.is_empty() {
            return invalid("at least one section is required".into());
        }
        if self.draft_expiry_hours <= 0 {
            return invalid("draft expiry must be positive".into());
        }
        if self.draft_expiry_hours > MAX_DRAFT_EXPIRY_HOURS {
            return invalid(format!(
                "draft expiry of {} hours exceeds {} hours",
                self.draft_expiry_hours, MAX_DRAFT_EXPIRY_HOURS
            ));
        }
        if let Some(milestone) = self.milestone_section {
            if milestone < 2 || milestone > self.sections.len() {
                return invalid(format!("milestone section {} is out of range", milestone));
            }
        }

        let mut names = HashSet::new();
        for (i, section) in self.sections.iter().enumerate() {
            if section.fields.is_empty() {
                return invalid(format!("section {} has no fields", i + 1));
            }
            for field in &section.fields {
                if !names.insert(field.name.as_str()) {
                    return invalid(format!("duplicate field {}", field.name));
                }
                if field.kind.is_choice() && field.options.is_empty() {
                    return invalid(format!("field {} has no options", field.name));
                }
                if !field.kind.is_choice() && !field.options.is_empty() {
                    return invalid(format!("field {} cannot have options", field.name));
                }
                match field.max_selections {
                    Some(_) if field.kind != FieldKind::Checkbox => {
                        return invalid(format!(
                            "max_selections on non-checkbox field {}",
                            field.name
                        ));
                    }
                    Some(0) => {
                        return invalid(format!("max_selections of {} must be positive", field.name));
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Section by 1-based number
    pub fn section(&self, number: usize) -> Option<&SectionDef> {
        number.checked_sub(1).and_then(|i| self.sections.get(i))
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .find(|f| f.name == name)
    }

    pub fn is_exclusive(&self, value: &str) -> bool {
        self.exclusive_values.iter().any(|v| v == value)
    }

    /// Out-of-range values fall back to the default 24 hours
    pub fn draft_expiry(&self) -> Duration {
        match self.draft_expiry_hours {
            hours @ 1..=MAX_DRAFT_EXPIRY_HOURS => Duration::hours(hours),
            _ => Duration::hours(default_expiry_hours()),
        }
    }

    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.fields.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_standard_definition() {
        let def = QuestionnaireDefinition::builtin(QuestionnaireVariant::Standard).unwrap();

        assert_eq!(def.section_count(), 5);
        assert_eq!(def.question_count(), 17);
        assert_eq!(def.version, "2025.2.1");
        assert_eq!(def.storage_key, "careHomeQuestionnaire");
        assert_eq!(def.milestone_section, Some(3));
        assert_eq!(def.phone_rule, PhoneRule::Basic);
        assert!(def.is_exclusive("no_allergies"));
        assert_eq!(def.field("contact_002").unwrap().kind, FieldKind::Email);
    }

    #[test]
    fn test_premium_definition() {
        let def = QuestionnaireDefinition::builtin(QuestionnaireVariant::Premium).unwrap();

        assert_eq!(def.section_count(), 8);
        assert_eq!(def.question_count(), 38);
        assert_eq!(def.version, "2.2");
        assert_eq!(def.storage_key, "rightcarehome_premium_assessment");
        assert_eq!(def.id_prefix, "PREMIUM");
        assert_eq!(def.milestone_section, Some(4));
        assert_eq!(def.phone_rule, PhoneRule::Strict);
        assert_eq!(def.field("q38").unwrap().max_selections, Some(3));
        assert_eq!(def.draft_expiry(), Duration::hours(24));
    }

    #[test]
    fn test_section_lookup_is_one_based() {
        let def = QuestionnaireDefinition::builtin(QuestionnaireVariant::Standard).unwrap();
        assert!(def.section(0).is_none());
        assert_eq!(def.section(1).unwrap().title, "About You");
        assert!(def.section(6).is_none());
    }

    #[test]
    fn test_rejects_duplicate_fields() {
        let yaml = r#"
name: broken
title: Broken
version: "1"
storage_key: broken
id_prefix: BRK
sections:
  - title: One
    fields:
      - { name: a, label: A, type: text }
      - { name: a, label: A again, type: text }
"#;
        let err = QuestionnaireDefinition::from_yaml_str(yaml).unwrap_err();
        assert!(err.to_string().contains("duplicate field a"));
    }

    #[test]
    fn test_rejects_out_of_range_draft_expiry() {
        let yaml = |hours: &str| {
            format!(
                r#"
name: expiring
title: Expiring
version: "1"
storage_key: expiring
id_prefix: EXP
draft_expiry_hours: {}
sections:
  - title: One
    fields:
      - {{ name: a, label: A, type: text }}
"#,
                hours
            )
        };

        let err =
            QuestionnaireDefinition::from_yaml_str(&yaml("9223372036854775807")).unwrap_err();
        assert!(err.to_string().contains("draft expiry"));
        assert!(QuestionnaireDefinition::from_yaml_str(&yaml("0")).is_err());

        let def = QuestionnaireDefinition::from_yaml_str(&yaml("48")).unwrap();
        assert_eq!(def.draft_expiry(), Duration::hours(48));

        let mut unchecked = def;
        unchecked.draft_expiry_hours = i64::MAX;
        assert_eq!(unchecked.draft_expiry(), Duration::hours(24));
    }

    #[test]
    fn test_rejects_choice_without_options() {
        let yaml = r#"
name: broken
title: Broken
version: "1"
storage_key: broken
id_prefix: BRK
sections:
  - title: One
    fields:
      - { name: a, label: A, type: radio, required: true }
"#;
        assert!(QuestionnaireDefinition::from_yaml_str(yaml).is_err());
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("short.yaml");
        std::fs::write(
            &path,
            r#"
name: short
title: Short Form
version: "0.1"
storage_key: shortForm
id_prefix: SHORT
phone_rule: basic
sections:
  - title: Contact
    fields:
      - { name: email, label: Email, type: email, required: true }
  - title: Notes
    fields:
      - { name: notes, label: Notes, type: textarea }
"#,
        )
        .unwrap();

        let def = QuestionnaireDefinition::from_file(&path).unwrap();
        assert_eq!(def.section_count(), 2);
        assert_eq!(def.milestone_section, None);
        assert_eq!(def.email_rule, EmailRule::Strict);
        let err = QuestionnaireDefinition::from_file(&temp_dir.path().join("missing.yaml")).unwrap_err();
        assert!(err.is_not_found());
    }
}
