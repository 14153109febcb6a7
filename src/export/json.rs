//! JSON Export functionality
//!
//! Exports a cost report to JSON with schema versioning.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{AdvisorError, AdvisorResult};
use crate::reports::CostReport;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Exported document wrapping one report
#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument<'a> {
    /// Schema version for compatibility checking
    pub schema_version: &'static str,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: &'static str,

    pub report: &'a CostReport,
}

impl<'a> ExportDocument<'a> {
    pub fn new(report: &'a CostReport) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: report.generated_at,
            app_version: env!("CARGO_PKG_VERSION"),
            report,
        }
    }
}

/// Export a report to JSON
pub fn export_report_json<W: Write>(
    report: &CostReport,
    writer: &mut W,
    pretty: bool,
) -> AdvisorResult<()> {
    let document = ExportDocument::new(report);

    if pretty {
        serde_json::to_writer_pretty(writer, &document)
    } else {
        serde_json::to_writer(writer, &document)
    }
    .map_err(|e| AdvisorError::Export(e.to_string()))?;

    Ok(())
}
