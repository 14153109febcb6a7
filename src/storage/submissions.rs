//! Append-only submissions log
//!
//! Each accepted submission is written as a single JSON line (JSONL) and
//! flushed immediately, so the log survives a crash mid-session.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{AdvisorError, AdvisorResult};
use crate::models::SubmissionPayload;

/// Writes and reads the submissions log file
pub struct SubmissionLog {
    log_path: PathBuf,
}

impl SubmissionLog {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append a payload as one JSON line
    pub fn append(&self, payload: &SubmissionPayload) -> AdvisorResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| AdvisorError::Io(format!("Failed to open submissions log: {}", e)))?;

        let json = serde_json::to_string(payload)
            .map_err(|e| AdvisorError::Json(format!("Failed to serialize submission: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| AdvisorError::Io(format!("Failed to write submission: {}", e)))?;

        file.flush()
            .map_err(|e| AdvisorError::Io(format!("Failed to flush submissions log: {}", e)))?;

        Ok(())
    }

    /// Read every submission, oldest first
    pub fn read_all(&self) -> AdvisorResult<Vec<SubmissionPayload>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| AdvisorError::Io(format!("Failed to open submissions log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                AdvisorError::Io(format!(
                    "Failed to read submissions log line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: SubmissionPayload = serde_json::from_str(&line).map_err(|e| {
                AdvisorError::Json(format!(
                    "Failed to parse submission at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read the most recent `count` submissions
    pub fn read_recent(&self, count: usize) -> AdvisorResult<Vec<SubmissionPayload>> {
        let all_entries = self.read_all()?;
        let start = all_entries.len().saturating_sub(count);
        Ok(all_entries[start..].to_vec())
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Answers, SubmissionId};
    use chrono::Utc;
    use tempfile::TempDir;

    fn payload(name: &str) -> SubmissionPayload {
        let mut answers = Answers::new();
        answers.set_text("q1", name);
        SubmissionPayload {
            answers,
            submission_id: SubmissionId::generate("CARE", Utc::now()),
            questionnaire: "standard".into(),
            version: "2025.2.1".into(),
            completed_sections: 5,
            completion_time: 60,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_append_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let log = SubmissionLog::new(temp_dir.path().join("submissions.jsonl"));

        assert!(log.read_all().unwrap().is_empty());

        log.append(&payload("Ada")).unwrap();
        log.append(&payload("Grace")).unwrap();
        log.append(&payload("Mary")).unwrap();

        let all = log.read_all().unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].answers.text("q1"), Some("Ada"));

        let recent = log.read_recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[1].answers.text("q1"), Some("Mary"));
    }
}
