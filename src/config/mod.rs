//! Configuration module for carehome-advisor
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence
//! - Calculator and questionnaire defaults

pub mod paths;
pub mod settings;

pub use paths::AdvisorPaths;
pub use settings::Settings;
