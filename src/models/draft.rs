//! Questionnaire draft
//!
//! The in-progress answer set persisted to local storage. It carries the
//! questionnaire version it was written by and the time it was saved, so
//! stale or incompatible drafts can be discarded on load.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::answers::Answers;

/// A locally persisted, resumable answer set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireDraft {
    /// Version of the questionnaire definition that wrote the draft
    pub version: String,

    /// 1-based section the user was on
    pub current_section: usize,

    /// Answers collected so far
    pub data: Answers,

    /// When the draft was written (epoch milliseconds on disk)
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub saved_at: DateTime<Utc>,
}

impl QuestionnaireDraft {
    pub fn new(
        version: impl Into<String>,
        current_section: usize,
        data: Answers,
        saved_at: DateTime<Utc>,
    ) -> Self {
        Self {
            version: version.into(),
            current_section,
            data,
            saved_at,
        }
    }

    /// Age of the draft at `now`
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.saved_at
    }

    /// A draft strictly older than `expiry` is stale
    pub fn is_expired(&self, now: DateTime<Utc>, expiry: Duration) -> bool {
        self.age(now) > expiry
    }
}
