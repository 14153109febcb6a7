//! Storage layer for carehome-advisor
//!
//! Provides the local key/value store (drafts, calculation history, last
//! submission), the append-only submissions log, and the care home
//! catalogue, all rooted at the configured paths.

pub mod catalogue;
pub mod file_io;
pub mod local_store;
pub mod submissions;

pub use catalogue::Catalogue;
pub use file_io::{read_json_or_set_aside, read_json_required, write_json_atomic};
pub use local_store::{get_json, set_json, FileStore, KeyValueStore, MemoryStore};
pub use submissions::SubmissionLog;

use crate::config::{paths::AdvisorPaths, settings::Settings};
use crate::error::AdvisorError;

/// Main storage coordinator
pub struct Storage {
    paths: AdvisorPaths,
    pub local: FileStore,
    pub submissions: SubmissionLog,
    pub catalogue: Catalogue,
}

impl Storage {
    /// Create a new Storage instance, loading the catalogue named in settings
    pub fn new(paths: AdvisorPaths, settings: &Settings) -> Result<Self, AdvisorError> {
        paths.ensure_directories()?;

        Ok(Self {
            local: FileStore::new(paths.local_storage_file()),
            submissions: SubmissionLog::new(paths.submissions_log()),
            catalogue: Catalogue::load(settings.catalogue_file.as_deref())?,
            paths,
        })
    }

    pub fn paths(&self) -> &AdvisorPaths {
        &self.paths
    }

    /// Load persisted data from disk
    pub fn load_all(&mut self) -> Result<(), AdvisorError> {
        self.local.load()
    }

    /// Check if storage has been initialized (settings written)
    pub fn is_initialized(&self) -> bool {
        self.paths.settings_file().exists()
    }
}
