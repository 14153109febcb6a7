//! Path management for carehome-advisor
//!
//! ## Path Resolution Order
//!
//! 1. `CAREHOME_ADVISOR_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory reported by `directories`
//!    (`~/.config/carehome-advisor` on Linux, `%APPDATA%` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::AdvisorError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "CAREHOME_ADVISOR_DATA_DIR";

/// Manages all paths used by carehome-advisor
#[derive(Debug, Clone)]
pub struct AdvisorPaths {
    /// Base directory for all carehome-advisor data
    base_dir: PathBuf,
}

impl AdvisorPaths {
    /// Create a new AdvisorPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no platform configuration directory can be
    /// determined and no override is set.
    pub fn new() -> Result<Self, AdvisorError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create AdvisorPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the export directory (`<base>/exports/`)
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the key/value store backing drafts and history
    pub fn local_storage_file(&self) -> PathBuf {
        self.data_dir().join("local_storage.json")
    }

    /// Get the path to the append-only submissions log
    pub fn submissions_log(&self) -> PathBuf {
        self.data_dir().join("submissions.jsonl")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), AdvisorError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| AdvisorError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| AdvisorError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.export_dir())
            .map_err(|e| AdvisorError::Io(format!("Failed to create export directory: {}", e)))?;

        Ok(())
    }

    /// Check if carehome-advisor has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, AdvisorError> {
    ProjectDirs::from("uk", "RightCareHome", "carehome-advisor")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            AdvisorError::Config(format!(
                "Could not determine a configuration directory; set {}",
                DATA_DIR_ENV
            ))
        })
}
