//! Field validation
//!
//! Checks answers against their field definitions. Failures are returned as
//! `FieldError` values for the caller to display; they never abort the
//! wizard.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::definition::{FieldDef, FieldKind, QuestionnaireDefinition, SectionDef};
use crate::models::Answers;

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const PHONE_MESSAGE: &str = "Please enter a valid UK phone number";
pub const POSTCODE_MESSAGE: &str = "Please enter a valid UK postcode";
pub const RADIO_MESSAGE: &str = "Please select an option";
pub const CHECKBOX_MESSAGE: &str = "Please select at least one option";

const EMAIL_LOCAL_MAX: usize = 64;
const EMAIL_DOMAIN_MAX: usize = 255;

static EMAIL_STRICT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("valid email regex")
});

static EMAIL_BASIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static UK_MOBILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(07\d{9}|(\+44|0044)7\d{9})$").expect("valid mobile regex"));

static UK_LANDLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0[1-9]\d{8,9}|(\+44|0044)[1-9]\d{8,9})$").expect("valid landline regex")
});

static UK_PHONE_BASIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+44|0)[1-9]\d{8,9}$").expect("valid phone regex"));

static PHONE_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\-()]").expect("valid separator regex"));

static UK_POSTCODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z]{1,2}[0-9][A-Z0-9]?\s?[0-9][A-Z]{2}$").expect("valid postcode regex")
});

/// How phone numbers are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PhoneRule {
    /// Separators stripped; UK mobile or landline, `0`, `+44` or `0044` prefix
    #[default]
    Strict,
    /// Whitespace stripped; `0` or `+44` then 9 or 10 digits
    Basic,
}

impl PhoneRule {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "basic" => Some(Self::Basic),
            _ => None,
        }
    }

    pub fn is_valid(&self, phone: &str) -> bool {
        match self {
            Self::Strict => {
                let cleaned = PHONE_SEPARATORS.replace_all(phone, "");
                UK_MOBILE.is_match(&cleaned) || UK_LANDLINE.is_match(&cleaned)
            }
            Self::Basic => {
                let cleaned: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
                UK_PHONE_BASIC.is_match(&cleaned)
            }
        }
    }
}

/// How email addresses are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmailRule {
    /// Restricted character set, dotted domain labels, length limits
    #[default]
    Strict,
    /// Anything shaped like `a@b.c`
    Basic,
}

impl EmailRule {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "basic" => Some(Self::Basic),
            _ => None,
        }
    }

    pub fn is_valid(&self, email: &str) -> bool {
        match self {
            Self::Strict => {
                if !EMAIL_STRICT.is_match(email) {
                    return false;
                }
                match email.split_once('@') {
                    Some((local, domain)) => {
                        local.len() <= EMAIL_LOCAL_MAX && domain.len() <= EMAIL_DOMAIN_MAX
                    }
                    None => false,
                }
            }
            Self::Basic => EMAIL_BASIC.is_match(email),
        }
    }
}

/// Check a UK postcode, with or without the inner space
pub fn is_valid_postcode(postcode: &str) -> bool {
    UK_POSTCODE.is_match(postcode.trim())
}

/// A field that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &FieldDef, message: impl Into<String>) -> Self {
        Self {
            field: field.name.clone(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Message shown when a checkbox group exceeds its limit
pub fn max_selections_message(max: usize) -> String {
    format!("Please select maximum {} options", max)
}

/// Validate one field's answer
pub fn validate_field(
    definition: &QuestionnaireDefinition,
    field: &FieldDef,
    answers: &Answers,
) -> Option<FieldError> {
    match field.kind {
        FieldKind::Radio => match answers.text(&field.name) {
            Some(value) if field.has_option(value) => None,
            Some(_) => Some(FieldError::new(field, RADIO_MESSAGE)),
            None if field.required => Some(FieldError::new(field, RADIO_MESSAGE)),
            None => None,
        },
        FieldKind::Checkbox => {
            let checked = answers.choices(&field.name);
            if field.required && checked.is_empty() {
                return Some(FieldError::new(field, CHECKBOX_MESSAGE));
            }
            match field.max_selections {
                Some(max) if checked.len() > max => {
                    Some(FieldError::new(field, max_selections_message(max)))
                }
                _ => None,
            }
        }
        kind => {
            let value = answers
                .text(&field.name)
                .map(str::trim)
                .filter(|v| !v.is_empty());

            let Some(value) = value else {
                return field
                    .required
                    .then(|| FieldError::new(field, REQUIRED_MESSAGE));
            };

            let format_error = match kind {
                FieldKind::Email if !definition.email_rule.is_valid(value) => Some(EMAIL_MESSAGE),
                FieldKind::Tel if !definition.phone_rule.is_valid(value) => Some(PHONE_MESSAGE),
                FieldKind::Postcode if !is_valid_postcode(value) => Some(POSTCODE_MESSAGE),
                _ => None,
            };
            format_error.map(|message| FieldError::new(field, message))
        }
    }
}

/// Validate every field of a section, in field order
pub fn validate_section(
    definition: &QuestionnaireDefinition,
    section: &SectionDef,
    answers: &Answers,
) -> Vec<FieldError> {
    section
        .fields
        .iter()
        .filter_map(|field| validate_field(definition, field, answers))
        .collect()
}
