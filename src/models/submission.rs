//! Submission payload and receipt
//!
//! The payload is a flat JSON object: every answer at the top level plus
//! submission metadata, which is the contract the external endpoint expects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::answers::Answers;

/// Identifier of a submission, e.g. `PREMIUM-1727773200000-8F3K2L0QZ`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(String);

impl SubmissionId {
    /// Generate an id from a prefix, the submission time and a random suffix
    pub fn generate(prefix: &str, now: DateTime<Utc>) -> Self {
        let suffix = Uuid::new_v4().simple().to_string()[..9].to_uppercase();
        Self(format!("{}-{}-{}", prefix, now.timestamp_millis(), suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human-friendly reference quoted on the confirmation screen,
/// e.g. `RCH-20251001-0427`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceNumber(String);

impl ReferenceNumber {
    pub fn generate(now: DateTime<Utc>) -> Self {
        let random = Uuid::new_v4().as_u128() % 10_000;
        Self(format!("RCH-{}-{:04}", now.format("%Y%m%d"), random))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything handed to the submission endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    #[serde(flatten)]
    pub answers: Answers,
    pub submission_id: SubmissionId,
    /// Questionnaire name (`standard`, `premium`, ...)
    pub questionnaire: String,
    pub version: String,
    pub completed_sections: usize,
    /// Seconds from start to submission
    pub completion_time: u64,
    pub timestamp: DateTime<Utc>,
}

/// Confirmation returned by an endpoint that accepted a payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub submission_id: SubmissionId,
    pub reference_number: ReferenceNumber,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_submission_id_format() {
        let now = Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0).unwrap();
        let id = SubmissionId::generate("PREMIUM", now);
        let parts: Vec<&str> = id.as_str().split('-').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "PREMIUM");
        assert_eq!(parts[1], now.timestamp_millis().to_string());
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_reference_number_format() {
        let now = Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0).unwrap();
        let reference = ReferenceNumber::generate(now);
        assert!(reference.as_str().starts_with("RCH-20251001-"));
        assert_eq!(reference.as_str().len(), "RCH-20251001-0000".len());
    }

    #[test]
    fn test_payload_is_flat() {
        let now = Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0).unwrap();
        let mut answers = Answers::new();
        answers.set_text("q1", "Margaret");
        answers.set_choices("q38", vec!["staffing".into(), "cost".into()]);

        let payload = SubmissionPayload {
            answers,
            submission_id: SubmissionId::generate("CARE", now),
            questionnaire: "standard".into(),
            version: "2025.2.1".into(),
            completed_sections: 5,
            completion_time: 312,
            timestamp: now,
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["q1"], "Margaret");
        assert_eq!(value["q38"][1], "cost");
        assert_eq!(value["completed_sections"], 5);

        let back: SubmissionPayload = serde_json::from_value(value).unwrap();
        assert_eq!(back, payload);
    }
}
