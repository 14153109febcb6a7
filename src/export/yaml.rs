//! YAML Export functionality
//!
//! Exports a cost report to YAML for human reading.

use std::io::Write;

use crate::error::{AdvisorError, AdvisorResult};
use crate::export::json::ExportDocument;
use crate::reports::CostReport;

/// Export a report to YAML
pub fn export_report_yaml<W: Write>(report: &CostReport, writer: &mut W) -> AdvisorResult<()> {
    let document = ExportDocument::new(report);
    let export_err = |e: std::io::Error| AdvisorError::Export(e.to_string());

    writeln!(writer, "# Care Cost Projection: {}", report.home.name).map_err(export_err)?;
    writeln!(writer, "# Generated: {}", document.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", document.app_version).map_err(export_err)?;
    writeln!(writer, "#").map_err(export_err)?;
    writeln!(
        writer,
        "# Figures are projections, not quotes. The deposit is refundable and excluded from totals."
    )
    .map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &document).map_err(|e| AdvisorError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Scenario;
    use crate::storage::Catalogue;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_export_yaml() {
        let now = Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap();
        let report =
            CostReport::generate(&Catalogue::builtin(), "bishops_manor", Scenario::Pessimistic, 1.5, now)
                .unwrap();

        let mut buffer = Vec::new();
        export_report_yaml(&report, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("# Care Cost Projection: Bishops Manor Care Home"));

        let value: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
        assert_eq!(value["report"]["home"]["key"].as_str(), Some("bishops_manor"));
        assert_eq!(value["report"]["projection"]["scenario"].as_str(), Some("pessimistic"));
    }
}
