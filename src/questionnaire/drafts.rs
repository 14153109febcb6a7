//! Draft persistence
//!
//! Reads and writes a questionnaire's draft under its storage key. Drafts
//! that are expired, written by another version or unreadable are removed
//! on load.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use super::definition::QuestionnaireDefinition;
use crate::error::{AdvisorError, AdvisorResult};
use crate::models::QuestionnaireDraft;
use crate::storage::{get_json, set_json, KeyValueStore};

/// What `DraftStore::load` found
#[derive(Debug, Clone, PartialEq)]
pub enum DraftLoad {
    /// No draft stored (or the store could not be read)
    Missing,
    /// A usable draft
    Found(QuestionnaireDraft),
    /// Older than the expiry; discarded
    Expired,
    /// Written by another questionnaire version; discarded
    VersionMismatch { found: String },
    /// Not a valid draft document; discarded
    Corrupt,
}

/// Draft storage for one questionnaire definition
pub struct DraftStore<'a, S: KeyValueStore + ?Sized> {
    store: &'a S,
    key: String,
    version: String,
    expiry: Duration,
}

impl<'a, S: KeyValueStore + ?Sized> DraftStore<'a, S> {
    pub fn new(store: &'a S, definition: &QuestionnaireDefinition) -> Self {
        Self {
            store,
            key: definition.storage_key.clone(),
            version: definition.version.clone(),
            expiry: definition.draft_expiry(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn save(&self, draft: &QuestionnaireDraft) -> AdvisorResult<()> {
        set_json(self.store, &self.key, draft)?;
        debug!(
            key = %self.key,
            section = draft.current_section,
            answers = draft.data.len(),
            "saved questionnaire draft"
        );
        Ok(())
    }

    /// Load the draft, discarding it if it cannot be resumed
    pub fn load(&self, now: DateTime<Utc>) -> DraftLoad {
        let draft: QuestionnaireDraft = match get_json(self.store, &self.key) {
            Ok(Some(draft)) => draft,
            Ok(None) => return DraftLoad::Missing,
            Err(e @ AdvisorError::Json(_)) => {
                warn!(key = %self.key, error = %e, "discarding corrupt draft");
                self.discard();
                return DraftLoad::Corrupt;
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "could not read draft");
                return DraftLoad::Missing;
            }
        };

        if draft.version != self.version {
            warn!(
                key = %self.key,
                found = %draft.version,
                expected = %self.version,
                "discarding draft from another version"
            );
            self.discard();
            return DraftLoad::VersionMismatch {
                found: draft.version,
            };
        }

        if draft.is_expired(now, self.expiry) {
            warn!(key = %self.key, saved_at = %draft.saved_at, "discarding expired draft");
            self.discard();
            return DraftLoad::Expired;
        }

        DraftLoad::Found(draft)
    }

    pub fn remove(&self) -> AdvisorResult<()> {
        self.store.remove(&self.key)
    }

    fn discard(&self) {
        if let Err(e) = self.remove() {
            warn!(key = %self.key, error = %e, "failed to remove draft");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Answers;
    use crate::questionnaire::QuestionnaireVariant;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;

    fn premium() -> QuestionnaireDefinition {
        QuestionnaireDefinition::builtin(QuestionnaireVariant::Premium).unwrap()
    }

    fn saved() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0).unwrap()
    }

    fn draft(version: &str) -> QuestionnaireDraft {
        let mut answers = Answers::new();
        answers.set_text("q1", "Jo Bloggs");
        answers.set_choices("q12", vec!["diabetes".into()]);
        QuestionnaireDraft::new(version, 3, answers, saved())
    }

    #[test]
    fn test_round_trip_within_expiry() {
        let store = MemoryStore::new();
        let def = premium();
        let drafts = DraftStore::new(&store, &def);

        drafts.save(&draft("2.2")).unwrap();
        assert_eq!(
            drafts.load(saved() + Duration::hours(23)),
            DraftLoad::Found(draft("2.2"))
        );
        assert!(store.contains("rightcarehome_premium_assessment"));
    }

    #[test]
    fn test_expired_draft_discarded() {
        let store = MemoryStore::new();
        let def = premium();
        let drafts = DraftStore::new(&store, &def);

        drafts.save(&draft("2.2")).unwrap();
        assert_eq!(drafts.load(saved() + Duration::hours(25)), DraftLoad::Expired);
        assert!(!store.contains("rightcarehome_premium_assessment"));
        assert_eq!(drafts.load(saved()), DraftLoad::Missing);
    }

    #[test]
    fn test_version_mismatch_discarded() {
        let store = MemoryStore::new();
        let def = premium();
        let drafts = DraftStore::new(&store, &def);

        drafts.save(&draft("2.1")).unwrap();
        assert_eq!(
            drafts.load(saved()),
            DraftLoad::VersionMismatch {
                found: "2.1".into()
            }
        );
        assert!(!store.contains("rightcarehome_premium_assessment"));
    }

    #[test]
    fn test_corrupt_draft_discarded() {
        let store = MemoryStore::new();
        let def = premium();
        store.set(&def.storage_key, "{\"data\": 4").unwrap();

        let drafts = DraftStore::new(&store, &def);
        assert_eq!(drafts.load(saved()), DraftLoad::Corrupt);
        assert!(!store.contains(&def.storage_key));
    }

    #[test]
    fn test_failed_save_is_an_error() {
        let store = MemoryStore::rejecting_writes();
        let def = premium();
        let drafts = DraftStore::new(&store, &def);

        assert!(drafts.save(&draft("2.2")).is_err());
        assert_eq!(drafts.load(saved()), DraftLoad::Missing);
    }
}
