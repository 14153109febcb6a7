//! Reports module for carehome-advisor
//!
//! Cost reports combine a projection, its chart series and the comparison
//! ranking for terminal display and export.

pub mod chart;
pub mod cost_report;

pub use chart::ChartSeries;
pub use cost_report::CostReport;
