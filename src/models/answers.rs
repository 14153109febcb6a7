//! Questionnaire answers
//!
//! A flat map from field name to value, shaped like the JSON the site
//! collected: text and radio answers are strings, checkbox groups are lists.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single field's answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Text input or the chosen radio option
    Single(String),
    /// Checked options of a checkbox group, in the order they were checked
    Multiple(Vec<String>),
}

/// All answers of one questionnaire, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers(BTreeMap<String, AnswerValue>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&AnswerValue> {
        self.0.get(field)
    }

    /// The single value of `field`, if it holds one
    pub fn text(&self, field: &str) -> Option<&str> {
        match self.0.get(field) {
            Some(AnswerValue::Single(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// The checked options of `field`; empty when unset
    pub fn choices(&self, field: &str) -> &[String] {
        match self.0.get(field) {
            Some(AnswerValue::Multiple(values)) => values.as_slice(),
            _ => &[],
        }
    }

    pub fn is_checked(&self, field: &str, value: &str) -> bool {
        self.choices(field).iter().any(|v| v == value)
    }

    /// Store a text or radio answer; blank input clears the field
    pub fn set_text(&mut self, field: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            self.0.remove(field);
        } else {
            self.0
                .insert(field.to_string(), AnswerValue::Single(value.to_string()));
        }
    }

    /// Replace a checkbox group's checked options; an empty list clears it
    pub fn set_choices(&mut self, field: &str, values: Vec<String>) {
        if values.is_empty() {
            self.0.remove(field);
        } else {
            self.0.insert(field.to_string(), AnswerValue::Multiple(values));
        }
    }

    pub fn remove(&mut self, field: &str) -> Option<AnswerValue> {
        self.0.remove(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_clears_field() {
        let mut answers = Answers::new();
        answers.set_text("q1", "  Margaret  ");
        assert_eq!(answers.text("q1"), Some("Margaret"));

        answers.set_text("q1", "   ");
        assert!(answers.get("q1").is_none());
    }

    #[test]
    fn test_choices() {
        let mut answers = Answers::new();
        answers.set_choices("q12", vec!["dementia".into(), "diabetes".into()]);
        assert!(answers.is_checked("q12", "diabetes"));
        assert!(!answers.is_checked("q12", "none"));
        assert_eq!(answers.text("q12"), None);

        answers.set_choices("q12", Vec::new());
        assert!(answers.choices("q12").is_empty());
        assert!(answers.is_empty());
    }

    #[test]
    fn test_flat_json_shape() {
        let mut answers = Answers::new();
        answers.set_text("q2", "jo@example.com");
        answers.set_choices("q38", vec!["staffing".into()]);

        let json = serde_json::to_string(&answers).unwrap();
        assert_eq!(json, r#"{"q2":"jo@example.com","q38":["staffing"]}"#);

        let back: Answers = serde_json::from_str(&json).unwrap();
        assert_eq!(back, answers);
    }
}
