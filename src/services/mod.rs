//! Service layer for carehome-advisor
//!
//! Cost calculations on top of the catalogue: per-home projections, the
//! catalogue-wide comparison, and the calculator session that remembers the
//! current selection and recent results.

pub mod calculator;
pub mod comparison;
pub mod projection;

pub use calculator::CalculatorSession;
pub use comparison::{compare_homes, ComparisonInsights, RankedHome};
pub use projection::project;
