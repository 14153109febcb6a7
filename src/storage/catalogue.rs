//! Care home catalogue
//!
//! Holds the reference homes the calculator works from: the built-in set,
//! or a JSON file of `CareHome` records named in settings.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AdvisorError, AdvisorResult};
use crate::models::{default_catalogue, CareHome};

use super::file_io::read_json_required;

/// Serializable catalogue file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogueData {
    homes: Vec<CareHome>,
}

/// An ordered, validated set of care homes
#[derive(Debug, Clone)]
pub struct Catalogue {
    homes: Vec<CareHome>,
}

impl Catalogue {
    /// Build a catalogue, rejecting invalid or duplicate homes
    pub fn new(homes: Vec<CareHome>) -> AdvisorResult<Self> {
        if homes.is_empty() {
            return Err(AdvisorError::Validation(
                "Catalogue must contain at least one care home".into(),
            ));
        }

        for (i, home) in homes.iter().enumerate() {
            home.validate()
                .map_err(|e| AdvisorError::Validation(format!("{}: {}", home.key, e)))?;

            if homes[..i].iter().any(|other| other.key == home.key) {
                return Err(AdvisorError::Validation(format!(
                    "Duplicate care home key: {}",
                    home.key
                )));
            }
        }

        Ok(Self { homes })
    }

    /// The built-in Birmingham catalogue
    pub fn builtin() -> Self {
        Self {
            homes: default_catalogue(),
        }
    }

    /// Load a catalogue file (`{"homes": [...]}`)
    pub fn from_file(path: &Path) -> AdvisorResult<Self> {
        let data: CatalogueData = read_json_required(path)?;
        debug!(path = %path.display(), homes = data.homes.len(), "loaded catalogue");
        Self::new(data.homes)
    }

    /// Load from `path` when given, else the built-in catalogue
    pub fn load(path: Option<&Path>) -> AdvisorResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn homes(&self) -> &[CareHome] {
        &self.homes
    }

    /// Find a home by key or name
    pub fn find(&self, query: &str) -> Option<&CareHome> {
        self.homes.iter().find(|home| home.matches(query))
    }

    /// Find a home by key or name, or a not-found error
    pub fn get(&self, query: &str) -> AdvisorResult<&CareHome> {
        self.find(query)
            .ok_or_else(|| AdvisorError::home_not_found(query))
    }
}
