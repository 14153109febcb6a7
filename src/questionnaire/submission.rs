//! Submission endpoints
//!
//! The wizard hands a finished payload to a `SubmissionEndpoint`. The local
//! endpoint appends it to the submissions log and keeps a copy under
//! `lastSubmission` for the confirmation screen.

use tracing::{info, warn};

use crate::error::{AdvisorError, AdvisorResult};
use crate::models::{ReferenceNumber, SubmissionPayload, SubmissionReceipt};
use crate::storage::{set_json, KeyValueStore, SubmissionLog};

/// Key of the most recent submission in the key/value store
pub const LAST_SUBMISSION_KEY: &str = "lastSubmission";

/// Something that accepts finished questionnaires
pub trait SubmissionEndpoint {
    fn submit(&self, payload: &SubmissionPayload) -> AdvisorResult<SubmissionReceipt>;
}

/// Endpoint writing to the local submissions log
pub struct LocalEndpoint<'a> {
    log: &'a SubmissionLog,
    store: &'a dyn KeyValueStore,
}

impl<'a> LocalEndpoint<'a> {
    pub fn new(log: &'a SubmissionLog, store: &'a dyn KeyValueStore) -> Self {
        Self { log, store }
    }
}

impl SubmissionEndpoint for LocalEndpoint<'_> {
    fn submit(&self, payload: &SubmissionPayload) -> AdvisorResult<SubmissionReceipt> {
        self.log
            .append(payload)
            .map_err(|e| AdvisorError::Submission(e.to_string()))?;

        if let Err(e) = set_json(self.store, LAST_SUBMISSION_KEY, payload) {
            warn!(error = %e, "could not keep a local copy of the submission");
        }

        let receipt = SubmissionReceipt {
            submission_id: payload.submission_id.clone(),
            reference_number: ReferenceNumber::generate(payload.timestamp),
            submitted_at: payload.timestamp,
        };

        info!(
            submission_id = %receipt.submission_id,
            reference = %receipt.reference_number,
            questionnaire = %payload.questionnaire,
            "questionnaire submitted"
        );

        Ok(receipt)
    }
}
