//! carehome-advisor - care home cost calculator and assessment questionnaire
//!
//! This library projects the cost of a care home stay under inflation
//! scenarios, ranks a catalogue of homes by five-year cost, and drives a
//! multi-section questionnaire with validation, autosaved drafts and local
//! submission.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (care homes, projections, answers, drafts)
//! - `storage`: Catalogue, key/value store and submissions log
//! - `services`: Projection, comparison and the calculator session
//! - `questionnaire`: Definitions, validation and the wizard
//! - `reports`: Cost reports and chart series
//! - `display`: Terminal formatting
//! - `export`: CSV, JSON and YAML export
//! - `cli`: Command handlers for the `carehome` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use carehome_advisor::models::Scenario;
//! use carehome_advisor::services::project;
//! use carehome_advisor::storage::Catalogue;
//!
//! let catalogue = Catalogue::builtin();
//! let home = catalogue.get("manor_house")?;
//! let projection = project(home, Scenario::Realistic, 3.0)?;
//! println!("{}", projection.total_projected);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod questionnaire;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{AdvisorError, AdvisorResult};
