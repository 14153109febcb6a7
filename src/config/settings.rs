//! User settings for carehome-advisor
//!
//! Manages calculator defaults, questionnaire autosave timing and the
//! optional care home catalogue override.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::AdvisorPaths;
use crate::error::AdvisorError;
use crate::models::Scenario;
use crate::questionnaire::QuestionnaireVariant;

/// User settings for carehome-advisor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Scenario used by `calc` when none is given
    #[serde(default)]
    pub default_scenario: Scenario,

    /// Stay duration in years used by `calc` when none is given
    #[serde(default = "default_years")]
    pub default_years: f64,

    /// Currency symbol for display
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Questionnaire started when no variant is given
    #[serde(default)]
    pub default_questionnaire: QuestionnaireVariant,

    /// Quiet period before a changed draft is written
    #[serde(default = "default_autosave_debounce_ms")]
    pub autosave_debounce_ms: u64,

    /// Interval of the periodic draft backup
    #[serde(default = "default_backup_interval_secs")]
    pub backup_interval_secs: u64,

    /// Number of calculations kept in history
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// JSON catalogue replacing the built-in care homes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalogue_file: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_years() -> f64 {
    3.0
}

fn default_currency() -> String {
    "£".to_string()
}

fn default_autosave_debounce_ms() -> u64 {
    500
}

fn default_backup_interval_secs() -> u64 {
    30
}

fn default_history_limit() -> usize {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_scenario: Scenario::default(),
            default_years: default_years(),
            currency_symbol: default_currency(),
            default_questionnaire: QuestionnaireVariant::default(),
            autosave_debounce_ms: default_autosave_debounce_ms(),
            backup_interval_secs: default_backup_interval_secs(),
            history_limit: default_history_limit(),
            catalogue_file: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &AdvisorPaths) -> Result<Self, AdvisorError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                AdvisorError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                AdvisorError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &AdvisorPaths) -> Result<(), AdvisorError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            AdvisorError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            AdvisorError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
