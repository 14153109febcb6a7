//! Questionnaire display formatting
//!
//! Draft status and the local submissions log.

use chrono::{DateTime, Local, Utc};

use crate::models::SubmissionPayload;
use crate::questionnaire::{DraftLoad, QuestionnaireDefinition};

use super::format::format_bar;

/// Describe the stored draft for `definition`
pub fn format_draft_status(
    definition: &QuestionnaireDefinition,
    load: &DraftLoad,
    now: DateTime<Utc>,
) -> String {
    let mut output = format!("{} (v{})\n", definition.title, definition.version);

    match load {
        DraftLoad::Missing => output.push_str("  No saved draft.\n"),
        DraftLoad::Found(draft) => {
            let total = definition.section_count();
            let section = draft.current_section.min(total);
            let pct = section as f64 / total as f64 * 100.0;
            let title = definition
                .section(section)
                .map(|s| s.title.as_str())
                .unwrap_or("");
            let remaining = definition.draft_expiry() - draft.age(now);

            output.push_str(&format!(
                "  Section {} of {}: {}\n",
                section, total, title
            ));
            output.push_str(&format!("  [{}] {:.0}%\n", format_bar(pct, 100.0, 20), pct));
            output.push_str(&format!("  Answers:  {}\n", draft.data.len()));
            output.push_str(&format!(
                "  Saved:    {}\n",
                draft.saved_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
            ));
            output.push_str(&format!(
                "  Expires in {}h {}m\n",
                remaining.num_hours(),
                remaining.num_minutes() % 60
            ));
        }
        DraftLoad::Expired => output.push_str("  Saved draft had expired and was discarded.\n"),
        DraftLoad::VersionMismatch { found } => output.push_str(&format!(
            "  Saved draft was written by version {} and was discarded.\n",
            found
        )),
        DraftLoad::Corrupt => output.push_str("  Saved draft could not be read and was discarded.\n"),
    }

    output
}

/// Submissions from the local log, oldest first
pub fn format_submissions(submissions: &[SubmissionPayload]) -> String {
    if submissions.is_empty() {
        return "No submissions yet.".to_string();
    }

    let id_width = submissions
        .iter()
        .map(|s| s.submission_id.as_str().len())
        .max()
        .unwrap_or(2)
        .max(2);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<id_width$}  {:<10}  {:<8}  {:>8}  {:>8}  {}\n",
        "ID", "Form", "Version", "Sections", "Answers", "Submitted"
    ));
    output.push_str(&format!(
        "{:-<id_width$}  {:-<10}  {:-<8}  {:->8}  {:->8}  {:-<16}\n",
        "", "", "", "", "", ""
    ));

    for submission in submissions {
        output.push_str(&format!(
            "{:<id_width$}  {:<10}  {:<8}  {:>8}  {:>8}  {}\n",
            submission.submission_id.as_str(),
            submission.questionnaire,
            submission.version,
            submission.completed_sections,
            submission.answers.len(),
            submission.timestamp.format("%Y-%m-%d %H:%M"),
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Answers, QuestionnaireDraft, SubmissionId};
    use crate::questionnaire::QuestionnaireVariant;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_status_without_draft() {
        let def = QuestionnaireDefinition::builtin(QuestionnaireVariant::Standard).unwrap();
        let output = format_draft_status(&def, &DraftLoad::Missing, now());
        assert!(output.contains("No saved draft."));
    }

    #[test]
    fn test_status_with_draft() {
        let def = QuestionnaireDefinition::builtin(QuestionnaireVariant::Premium).unwrap();
        let mut answers = Answers::new();
        answers.set_text("q1", "Jo");
        let draft = QuestionnaireDraft::new(
            def.version.clone(),
            4,
            answers,
            now() - Duration::hours(2),
        );

        let output = format_draft_status(&def, &DraftLoad::Found(draft), now());
        assert!(output.contains("Section 4 of 8"));
        assert!(output.contains("50%"));
        assert!(output.contains("Expires in 22h 0m"));
    }

    #[test]
    fn test_format_submissions() {
        let mut answers = Answers::new();
        answers.set_text("contact_001", "Jo");
        let payload = SubmissionPayload {
            answers,
            submission_id: SubmissionId::generate("CARE", now()),
            questionnaire: "standard".to_string(),
            version: "2025.2.1".to_string(),
            completed_sections: 5,
            completion_time: 300,
            timestamp: now(),
        };

        let output = format_submissions(&[payload]);
        assert!(output.contains("CARE-"));
        assert!(output.contains("2025.2.1"));
        assert_eq!(format_submissions(&[]), "No submissions yet.");
    }
}
