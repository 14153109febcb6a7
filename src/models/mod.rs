//! Core data models for carehome-advisor
//!
//! Reference data (care homes, scenarios), derived projection results, and
//! the questionnaire's answers, drafts and submissions.

pub mod answers;
pub mod care_home;
pub mod draft;
pub mod money;
pub mod projection;
pub mod scenario;
pub mod submission;

pub use answers::{AnswerValue, Answers};
pub use care_home::{default_catalogue, CareHome, CqcRating};
pub use draft::QuestionnaireDraft;
pub use money::Money;
pub use projection::{AdditionalBreakdown, CalculationRecord, CostProjection, YearlyBreakdown};
pub use scenario::{Scenario, ScenarioConfig};
pub use submission::{ReferenceNumber, SubmissionId, SubmissionPayload, SubmissionReceipt};
