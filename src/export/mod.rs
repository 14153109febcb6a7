//! Export module for carehome-advisor
//!
//! Writes a cost report in one of three formats:
//! - CSV: the yearly breakdown (spreadsheet-compatible)
//! - JSON: the full report, machine-readable
//! - YAML: the full report, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_report_csv;
pub use json::{export_report_json, ExportDocument, EXPORT_SCHEMA_VERSION};
pub use yaml::export_report_yaml;
